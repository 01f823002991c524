//! Balance cache recomputation.

use crate::store::LedgerStore;
use anyhow::Result;
use recount_core::DEFAULT_CURRENCY;
use rust_decimal::Decimal;

/// Recompute every account's cached raw balance from its postings.
///
/// Runs once per import batch as a full pass - simplicity over
/// incrementality, acceptable at expected ledger sizes. The raw sum is a
/// single scalar: postings in different currencies are not separated, and
/// the last-seen currency labels the balance. Accounts with no postings get
/// a zero balance in the default currency.
///
/// The cache stores the raw sum; the per-kind display-sign transform
/// ([`AccountKind::display_balance`](recount_core::AccountKind::display_balance))
/// is applied at presentation time.
pub fn recompute_balances<S: LedgerStore + ?Sized>(store: &mut S) -> Result<()> {
    for account in store.accounts()? {
        let postings = store.postings_for_account(account.id)?;

        let mut balance = Decimal::ZERO;
        let mut currency = DEFAULT_CURRENCY.to_string();
        for posting in &postings {
            balance += posting.amount;
            currency.clone_from(&posting.currency);
        }

        store.upsert_account_balance(account.id, balance, &currency)?;
    }
    Ok(())
}
