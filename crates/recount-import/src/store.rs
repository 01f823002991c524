//! Persistence interface consumed by the importer.
//!
//! The storage engine itself is an external collaborator; the import
//! pipeline only sees this trait. Implementations are expected to provide
//! checkpoint semantics: `commit` marks the current state durable,
//! `rollback` restores the state at the last commit.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of an account row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub u64);

/// Stable identity of a transaction row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransactionId(pub u64);

/// Stable identity of a posting row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostingId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One node of the account hierarchy.
///
/// `full_path` is the canonical identity; `parent` holds the id of the
/// immediate prefix node. Children are derived by scanning, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Row identity
    pub id: AccountId,
    /// Leaf path segment
    pub name: String,
    /// Full colon-delimited path, unique
    pub full_path: String,
    /// Immediate parent node, `None` for top-level accounts
    pub parent: Option<AccountId>,
}

/// A persisted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Row identity
    pub id: TransactionId,
    /// Transaction date
    pub date: NaiveDate,
    /// Payee free text
    pub payee: String,
    /// Optional long-form description (schema slot, unused by the importer)
    pub description: Option<String>,
    /// Content hash keying re-import deduplication, unique
    pub dedup_hash: String,
}

/// A persisted posting, owned by its transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingRecord {
    /// Row identity
    pub id: PostingId,
    /// Owning transaction
    pub transaction: TransactionId,
    /// Target account
    pub account: AccountId,
    /// Signed amount, two decimal places
    pub amount: Decimal,
    /// Currency code
    pub currency: String,
}

/// Cached raw balance for one account.
///
/// Not authoritative - postings are the source of truth; this is recomputed
/// wholesale after every import batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecord {
    /// The account this balance belongs to
    pub account: AccountId,
    /// Raw sum of the account's postings (display sign NOT applied)
    pub balance: Decimal,
    /// Currency code (last seen across the account's postings)
    pub currency: String,
}

/// Storage operations the import pipeline needs.
///
/// All methods are fallible from the importer's point of view; a failure
/// during one transaction block's writes is rolled back and skipped without
/// aborting the run.
pub trait LedgerStore {
    /// Look up an account by its full path.
    fn find_account_by_path(&self, full_path: &str) -> Result<Option<AccountId>>;

    /// Create an account node. The caller guarantees the parent, if given,
    /// exists and corresponds to the immediate path prefix.
    fn create_account(
        &mut self,
        name: &str,
        full_path: &str,
        parent: Option<AccountId>,
    ) -> Result<AccountId>;

    /// Look up a transaction by its dedup hash.
    fn find_transaction_by_hash(&self, dedup_hash: &str) -> Result<Option<TransactionId>>;

    /// Create a transaction row.
    fn create_transaction(
        &mut self,
        date: NaiveDate,
        payee: &str,
        dedup_hash: &str,
    ) -> Result<TransactionId>;

    /// Create a posting under a transaction.
    fn create_posting(
        &mut self,
        transaction: TransactionId,
        account: AccountId,
        amount: Decimal,
        currency: &str,
    ) -> Result<PostingId>;

    /// Insert or overwrite the cached balance for an account.
    fn upsert_account_balance(
        &mut self,
        account: AccountId,
        balance: Decimal,
        currency: &str,
    ) -> Result<()>;

    /// All account rows. Needed for the full balance recompute.
    fn accounts(&self) -> Result<Vec<AccountRecord>>;

    /// All postings targeting one account.
    fn postings_for_account(&self, account: AccountId) -> Result<Vec<PostingRecord>>;

    /// Make everything written since the last commit durable.
    fn commit(&mut self) -> Result<()>;

    /// Discard everything written since the last commit.
    fn rollback(&mut self) -> Result<()>;
}
