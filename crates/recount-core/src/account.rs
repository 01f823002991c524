//! Account path helpers and the display-sign convention.
//!
//! Account identities are colon-delimited paths like
//! `Assets:Banking:Checking`. The first segment determines the account's
//! kind, which in turn determines how a raw posting sum is presented to a
//! human: credit-normal accounts (Income, Liabilities, Equity) flip sign
//! for display, debit-normal accounts (Assets, Expenses) do not.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level account classification, derived from the first path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    /// `Assets:*` - things owned
    Assets,
    /// `Liabilities:*` - things owed
    Liabilities,
    /// `Equity:*` - opening balances and retained earnings
    Equity,
    /// `Income:*` - money earned
    Income,
    /// `Expenses:*` - money spent
    Expenses,
    /// Any other top segment
    Other,
}

impl AccountKind {
    /// Classify an account path by its first segment.
    ///
    /// # Example
    ///
    /// ```
    /// use recount_core::AccountKind;
    ///
    /// assert_eq!(AccountKind::of_path("Assets:Banking"), AccountKind::Assets);
    /// assert_eq!(AccountKind::of_path("Income:Salary"), AccountKind::Income);
    /// assert_eq!(AccountKind::of_path("Misc"), AccountKind::Other);
    /// ```
    #[must_use]
    pub fn of_path(full_path: &str) -> Self {
        let top = full_path.split(':').next().unwrap_or(full_path);
        match top {
            "Assets" => Self::Assets,
            "Liabilities" => Self::Liabilities,
            "Equity" => Self::Equity,
            "Income" => Self::Income,
            "Expenses" => Self::Expenses,
            _ => Self::Other,
        }
    }

    /// Whether raw posting sums flip sign for display.
    ///
    /// Income, Liabilities, and Equity are credit-normal: ledger postings
    /// leave them with negative raw sums, so display negates.
    #[must_use]
    pub const fn flips_display_sign(self) -> bool {
        matches!(self, Self::Income | Self::Liabilities | Self::Equity)
    }

    /// Convert a raw posting sum into its display balance.
    #[must_use]
    pub fn display_balance(self, raw: Decimal) -> Decimal {
        if self.flips_display_sign() {
            -raw
        } else {
            raw
        }
    }
}

/// The last segment of an account path.
///
/// `leaf_name("Assets:Banking:Checking")` is `"Checking"`.
#[must_use]
pub fn leaf_name(full_path: &str) -> &str {
    full_path.rsplit(':').next().unwrap_or(full_path)
}

/// Every increasing prefix of an account path, shortest first.
///
/// `path_prefixes("Assets:Banking:Checking")` yields `"Assets"`,
/// `"Assets:Banking"`, `"Assets:Banking:Checking"`. An empty path yields
/// nothing.
#[must_use]
pub fn path_prefixes(full_path: &str) -> Vec<&str> {
    if full_path.is_empty() {
        return Vec::new();
    }
    let mut prefixes: Vec<&str> = full_path
        .match_indices(':')
        .map(|(idx, _)| &full_path[..idx])
        .collect();
    prefixes.push(full_path);
    prefixes
}
