//! Core types for recount
//!
//! This crate provides the fundamental types shared across the recount
//! pipeline:
//!
//! - [`Amount`] - A decimal number with a currency code
//! - [`ParsedTransaction`] / [`ParsedPosting`] - Ledger entries as read from
//!   the source text, before inference and persistence
//! - [`AccountKind`] - Top-level account classification carrying the
//!   display-sign convention
//!
//! # Example
//!
//! ```
//! use recount_core::{Amount, ParsedPosting, ParsedTransaction};
//! use rust_decimal_macros::dec;
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! let txn = ParsedTransaction::new(date, "Grocery store")
//!     .with_posting(ParsedPosting::new(
//!         "Expenses:Food",
//!         Amount::new(dec!(1250.00), "INR"),
//!     ))
//!     .with_posting(ParsedPosting::auto("Assets:Banking:Checking"));
//!
//! assert_eq!(txn.postings.len(), 2);
//! assert!(txn.postings[1].amount.is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod account;
pub mod amount;
pub mod entry;

pub use account::{leaf_name, path_prefixes, AccountKind};
pub use amount::{Amount, DEFAULT_CURRENCY};
pub use entry::{ParsedPosting, ParsedTransaction};

// Re-export commonly used external types
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
