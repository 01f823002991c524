//! In-memory reference implementation of [`LedgerStore`].
//!
//! Rows live in arena vectors indexed by their ids; the account tree stores
//! only parent ids, children are derived by scanning. Commit/rollback is a
//! whole-state checkpoint, which is plenty for the single-writer runs this
//! store backs (tests and the CLI).

use crate::store::{
    AccountId, AccountRecord, BalanceRecord, LedgerStore, PostingId, PostingRecord, TransactionId,
    TransactionRecord,
};
use anyhow::{bail, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default)]
struct State {
    accounts: Vec<AccountRecord>,
    accounts_by_path: HashMap<String, AccountId>,
    transactions: Vec<TransactionRecord>,
    transactions_by_hash: HashMap<String, TransactionId>,
    postings: Vec<PostingRecord>,
    balances: BTreeMap<AccountId, BalanceRecord>,
}

/// Arena-backed in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: State,
    checkpoint: State,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a full account record by path.
    #[must_use]
    pub fn account_by_path(&self, full_path: &str) -> Option<&AccountRecord> {
        let id = self.state.accounts_by_path.get(full_path)?;
        self.state.accounts.get(id.0 as usize)
    }

    /// The cached balance for an account, if one has been computed.
    #[must_use]
    pub fn balance(&self, account: AccountId) -> Option<&BalanceRecord> {
        self.state.balances.get(&account)
    }

    /// All account rows, in creation order.
    #[must_use]
    pub fn account_rows(&self) -> &[AccountRecord] {
        &self.state.accounts
    }

    /// All transaction rows, in creation order.
    #[must_use]
    pub fn transaction_rows(&self) -> &[TransactionRecord] {
        &self.state.transactions
    }

    /// All posting rows, in creation order.
    #[must_use]
    pub fn posting_rows(&self) -> &[PostingRecord] {
        &self.state.postings
    }

    /// Ids of the immediate children of an account, derived by scan.
    #[must_use]
    pub fn children(&self, account: AccountId) -> Vec<AccountId> {
        self.state
            .accounts
            .iter()
            .filter(|record| record.parent == Some(account))
            .map(|record| record.id)
            .collect()
    }
}

impl LedgerStore for MemoryStore {
    fn find_account_by_path(&self, full_path: &str) -> Result<Option<AccountId>> {
        Ok(self.state.accounts_by_path.get(full_path).copied())
    }

    fn create_account(
        &mut self,
        name: &str,
        full_path: &str,
        parent: Option<AccountId>,
    ) -> Result<AccountId> {
        if self.state.accounts_by_path.contains_key(full_path) {
            bail!("account already exists: {full_path}");
        }
        let id = AccountId(self.state.accounts.len() as u64);
        self.state.accounts.push(AccountRecord {
            id,
            name: name.to_string(),
            full_path: full_path.to_string(),
            parent,
        });
        self.state.accounts_by_path.insert(full_path.to_string(), id);
        Ok(id)
    }

    fn find_transaction_by_hash(&self, dedup_hash: &str) -> Result<Option<TransactionId>> {
        Ok(self.state.transactions_by_hash.get(dedup_hash).copied())
    }

    fn create_transaction(
        &mut self,
        date: NaiveDate,
        payee: &str,
        dedup_hash: &str,
    ) -> Result<TransactionId> {
        if self.state.transactions_by_hash.contains_key(dedup_hash) {
            bail!("transaction hash already present: {dedup_hash}");
        }
        let id = TransactionId(self.state.transactions.len() as u64);
        self.state.transactions.push(TransactionRecord {
            id,
            date,
            payee: payee.to_string(),
            description: None,
            dedup_hash: dedup_hash.to_string(),
        });
        self.state
            .transactions_by_hash
            .insert(dedup_hash.to_string(), id);
        Ok(id)
    }

    fn create_posting(
        &mut self,
        transaction: TransactionId,
        account: AccountId,
        amount: Decimal,
        currency: &str,
    ) -> Result<PostingId> {
        if self.state.transactions.get(transaction.0 as usize).is_none() {
            bail!("no such transaction: {}", transaction.0);
        }
        if self.state.accounts.get(account.0 as usize).is_none() {
            bail!("no such account: {account}");
        }
        let id = PostingId(self.state.postings.len() as u64);
        self.state.postings.push(PostingRecord {
            id,
            transaction,
            account,
            amount,
            currency: currency.to_string(),
        });
        Ok(id)
    }

    fn upsert_account_balance(
        &mut self,
        account: AccountId,
        balance: Decimal,
        currency: &str,
    ) -> Result<()> {
        if self.state.accounts.get(account.0 as usize).is_none() {
            bail!("no such account: {account}");
        }
        self.state.balances.insert(
            account,
            BalanceRecord {
                account,
                balance,
                currency: currency.to_string(),
            },
        );
        Ok(())
    }

    fn accounts(&self) -> Result<Vec<AccountRecord>> {
        Ok(self.state.accounts.clone())
    }

    fn postings_for_account(&self, account: AccountId) -> Result<Vec<PostingRecord>> {
        Ok(self
            .state
            .postings
            .iter()
            .filter(|posting| posting.account == account)
            .cloned()
            .collect())
    }

    fn commit(&mut self) -> Result<()> {
        self.checkpoint = self.state.clone();
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.state = self.checkpoint.clone();
        Ok(())
    }
}
