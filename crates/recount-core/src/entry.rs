//! Parsed ledger entries.
//!
//! These are the parser's output: transactions as they appear in the source
//! text, before missing-amount inference and before anything is persisted.
//! A posting without an amount (`amount: None`) is a candidate for
//! inference by the balancing engine.

use crate::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single account entry within a parsed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPosting {
    /// Full account path, aliases already expanded
    pub account: String,
    /// The posted amount; `None` when the source left it to be inferred
    pub amount: Option<Amount>,
}

impl ParsedPosting {
    /// Create a posting with an explicit amount.
    #[must_use]
    pub fn new(account: impl Into<String>, amount: Amount) -> Self {
        Self {
            account: account.into(),
            amount: Some(amount),
        }
    }

    /// Create a posting whose amount will be inferred.
    #[must_use]
    pub fn auto(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            amount: None,
        }
    }
}

/// A transaction as read from the ledger source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTransaction {
    /// Transaction date (calendar date, no time component)
    pub date: NaiveDate,
    /// Header remainder after the date - free payee text
    pub payee: String,
    /// Account entries, in source order
    pub postings: Vec<ParsedPosting>,
}

impl ParsedTransaction {
    /// Create a transaction with no postings.
    #[must_use]
    pub fn new(date: NaiveDate, payee: impl Into<String>) -> Self {
        Self {
            date,
            payee: payee.into(),
            postings: Vec::new(),
        }
    }

    /// Add a posting.
    #[must_use]
    pub fn with_posting(mut self, posting: ParsedPosting) -> Self {
        self.postings.push(posting);
        self
    }

    /// Postings that carry an explicit amount.
    pub fn amount_bearing(&self) -> impl Iterator<Item = &ParsedPosting> {
        self.postings.iter().filter(|p| p.amount.is_some())
    }

    /// Count of postings whose amount is still to be inferred.
    #[must_use]
    pub fn missing_amount_count(&self) -> usize {
        self.postings.iter().filter(|p| p.amount.is_none()).count()
    }
}
