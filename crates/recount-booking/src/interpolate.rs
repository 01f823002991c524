//! Missing-amount inference.

use crate::balance_tolerance;
use chrono::NaiveDate;
use recount_core::{Amount, ParsedTransaction, DEFAULT_CURRENCY};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while balancing a transaction.
#[derive(Debug, Clone, Error)]
pub enum BalanceError {
    /// More than one posting is missing an amount; inference is ambiguous.
    #[error("{count} postings missing amounts, at most one can be inferred")]
    MultipleMissing {
        /// Number of amount-absent postings.
        count: usize,
    },
}

/// A posting whose amount is fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPosting {
    /// Full account path
    pub account: String,
    /// The resolved amount
    pub amount: Amount,
}

/// A transaction with every posting amount resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTransaction {
    /// Transaction date
    pub date: NaiveDate,
    /// Payee free text
    pub payee: String,
    /// Postings, in source order, all amounts present
    pub postings: Vec<ResolvedPosting>,
    /// Sum of all posting amounts after inference
    pub residual: Decimal,
    /// Index of the posting whose amount was inferred, if any
    pub filled_index: Option<usize>,
}

impl ResolvedTransaction {
    /// Whether the residual is within the zero-sum tolerance.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.residual.abs() <= balance_tolerance()
    }
}

/// Infer the missing amount, if any, and compute the residual.
///
/// - No amount-absent postings: pass through, residual is the raw sum.
/// - Exactly one: its amount becomes the negated sum of the others and its
///   currency is inherited from the first amount-bearing posting (the
///   default currency when none exist).
/// - More than one: [`BalanceError::MultipleMissing`].
///
/// Amounts are summed as a single scalar; postings in different currencies
/// are not separated (mixed-currency ledgers are out of scope).
///
/// A residual beyond [`balance_tolerance`](crate::balance_tolerance) does
/// NOT fail resolution - callers decide whether an unbalanced transaction
/// is worth keeping. Check [`ResolvedTransaction::is_balanced`].
pub fn resolve_amounts(
    transaction: &ParsedTransaction,
) -> Result<ResolvedTransaction, BalanceError> {
    let missing: Vec<usize> = transaction
        .postings
        .iter()
        .enumerate()
        .filter_map(|(index, posting)| posting.amount.is_none().then_some(index))
        .collect();

    if missing.len() > 1 {
        return Err(BalanceError::MultipleMissing {
            count: missing.len(),
        });
    }

    let known_sum: Decimal = transaction
        .postings
        .iter()
        .filter_map(|posting| posting.amount.as_ref().map(|amount| amount.number))
        .sum();
    let inherited_currency = transaction
        .postings
        .iter()
        .find_map(|posting| posting.amount.as_ref().map(|amount| amount.currency.clone()))
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    let filled_index = missing.first().copied();
    let postings: Vec<ResolvedPosting> = transaction
        .postings
        .iter()
        .map(|posting| ResolvedPosting {
            account: posting.account.clone(),
            amount: posting.amount.clone().unwrap_or_else(|| {
                Amount::new(-known_sum, inherited_currency.clone())
            }),
        })
        .collect();

    let residual: Decimal = postings.iter().map(|posting| posting.amount.number).sum();

    Ok(ResolvedTransaction {
        date: transaction.date,
        payee: transaction.payee.clone(),
        postings,
        residual,
        filled_index,
    })
}
