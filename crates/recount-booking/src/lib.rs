//! Balancing engine for parsed transactions.
//!
//! This crate fills in missing posting amounts and checks the double-entry
//! invariant: the postings of a transaction sum to zero.
//!
//! # Inference
//!
//! When a transaction has exactly one posting without an amount, that
//! amount is the negation of the sum of the others:
//!
//! ```text
//! 2024/01/15 Grocery store
//!     Expenses:Food  1,250.00
//!     Assets:Banking:Checking      <- inferred as -1250.00
//! ```
//!
//! More than one missing amount is ambiguous and rejected; inference is
//! only well-defined for a single unknown.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod interpolate;

pub use interpolate::{resolve_amounts, BalanceError, ResolvedPosting, ResolvedTransaction};

use rust_decimal::Decimal;

/// Absolute per-transaction tolerance for the zero-sum check.
///
/// Residuals at or below 0.01 are treated as rounding noise.
#[must_use]
pub fn balance_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tolerance_value() {
        assert_eq!(balance_tolerance(), dec!(0.01));
    }
}
