//! Import pipeline for recount
//!
//! This crate drives a full ledger import: read the source text, parse it
//! into transaction blocks, deduplicate against previously imported content,
//! infer missing amounts, persist transactions with their postings while
//! materializing the account hierarchy, and finally recompute every
//! account's cached balance.
//!
//! Storage is an external collaborator behind the [`LedgerStore`] trait;
//! [`MemoryStore`] is the in-crate reference implementation.
//!
//! # Recovery model
//!
//! Only an unreadable source file aborts a run. Every per-transaction
//! problem - duplicate content, ambiguous inference, a storage failure
//! while writing one block - is rolled back where needed, recorded on the
//! report, and the run continues.
//!
//! # Example
//!
//! ```
//! use recount_import::{Importer, MemoryStore};
//!
//! let source = "\
//! 2024/01/15 Grocery store
//!     Expenses:Food    1,250.00
//!     Assets:Banking:Checking
//! ";
//!
//! let mut importer = Importer::new(MemoryStore::new());
//! let report = importer.import_source(source).unwrap();
//! assert_eq!(report.imported, 1);
//!
//! // Same content again: deduplicated
//! let report = importer.import_source(source).unwrap();
//! assert_eq!(report.imported, 0);
//! assert_eq!(report.skipped, 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod balance;
pub mod hash;
pub mod hierarchy;
pub mod memory;
pub mod store;

pub use balance::recompute_balances;
pub use hash::dedup_hash;
pub use hierarchy::resolve_account;
pub use memory::MemoryStore;
pub use store::{
    AccountId, AccountRecord, BalanceRecord, LedgerStore, PostingId, PostingRecord, TransactionId,
    TransactionRecord,
};

use anyhow::Context;
use chrono::NaiveDate;
use recount_booking::{resolve_amounts, BalanceError, ResolvedTransaction};
use recount_core::ParsedTransaction;
use recount_parser::LedgerParser;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Failures that abort an import run.
///
/// Anything recoverable per transaction never surfaces here; it lands in
/// [`ImportReport::skips`] instead.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The ledger source file is missing or unreadable.
    #[error("ledger file unavailable: {path}")]
    SourceUnavailable {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A storage failure outside the per-transaction recovery loop
    /// (balance recompute, final commit, or a rollback that itself failed).
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Why a transaction block was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The dedup hash is already present - expected on re-import.
    Duplicate,
    /// More than one posting was missing an amount.
    AmbiguousAmounts,
    /// The storage layer failed while writing this block.
    Storage(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate => write!(f, "duplicate"),
            Self::AmbiguousAmounts => write!(f, "ambiguous amounts"),
            Self::Storage(detail) => write!(f, "storage failure: {detail}"),
        }
    }
}

/// One skipped transaction block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipRecord {
    /// Date of the skipped transaction
    pub date: NaiveDate,
    /// Payee of the skipped transaction
    pub payee: String,
    /// Why it was skipped
    pub reason: SkipReason,
}

/// Outcome of one import run.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    /// Transactions newly persisted
    pub imported: usize,
    /// Transactions skipped (duplicates, rejections, per-block failures)
    pub skipped: usize,
    /// Transaction blocks the parser produced
    pub total_parsed: usize,
    /// Structured record of every skip
    pub skips: Vec<SkipRecord>,
}

impl ImportReport {
    fn new(total_parsed: usize) -> Self {
        Self {
            imported: 0,
            skipped: 0,
            total_parsed,
            skips: Vec::new(),
        }
    }

    fn record_skip(&mut self, transaction: &ParsedTransaction, reason: SkipReason) {
        self.skipped += 1;
        self.skips.push(SkipRecord {
            date: transaction.date,
            payee: transaction.payee.clone(),
            reason,
        });
    }
}

enum BlockOutcome {
    Imported,
    Skipped(SkipReason),
}

/// Drives the import pipeline against one store.
///
/// Holds the store exclusively for the duration of the run: a second
/// writer against the same store is unrepresentable in-process, and
/// cross-process coordination is explicitly not provided.
#[derive(Debug)]
pub struct Importer<S> {
    store: S,
}

impl<S: LedgerStore> Importer<S> {
    /// Create an importer over a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the importer, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Import a ledger file.
    ///
    /// The path is always supplied by the caller; defaulting to a
    /// configured location is a call-site decision, not made here.
    pub fn import_file(&mut self, path: &Path) -> Result<ImportReport, ImportError> {
        info!("parsing ledger file {}", path.display());
        let source = fs::read_to_string(path).map_err(|source| ImportError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        self.import_source(&source)
    }

    /// Import ledger text that has already been read.
    pub fn import_source(&mut self, source: &str) -> Result<ImportReport, ImportError> {
        let parsed = LedgerParser::new().parse(source);
        info!("parsed {} transactions", parsed.len());

        let mut report = ImportReport::new(parsed.len());
        for transaction in &parsed {
            match self.import_block(transaction)? {
                BlockOutcome::Imported => report.imported += 1,
                BlockOutcome::Skipped(reason) => report.record_skip(transaction, reason),
            }
        }

        info!("updating account balances");
        recompute_balances(&mut self.store)?;
        self.store.commit().context("final commit")?;

        info!(
            "import complete: {} imported, {} skipped",
            report.imported, report.skipped
        );
        Ok(report)
    }

    /// Process one transaction block.
    ///
    /// Returns `Err` only when recovery is impossible (the rollback after a
    /// failed write did not succeed); every other problem becomes a skip.
    fn import_block(&mut self, transaction: &ParsedTransaction) -> anyhow::Result<BlockOutcome> {
        let hash = dedup_hash(transaction);

        match self.store.find_transaction_by_hash(&hash) {
            Ok(Some(_)) => {
                debug!("duplicate transaction \"{}\", skipping", transaction.payee);
                return Ok(BlockOutcome::Skipped(SkipReason::Duplicate));
            }
            Ok(None) => {}
            Err(error) => {
                warn!(
                    "hash lookup failed for \"{}\": {error:#}",
                    transaction.payee
                );
                return Ok(BlockOutcome::Skipped(SkipReason::Storage(format!(
                    "{error:#}"
                ))));
            }
        }

        let resolved = match resolve_amounts(transaction) {
            Ok(resolved) => resolved,
            Err(error @ BalanceError::MultipleMissing { .. }) => {
                warn!(
                    "transaction \"{}\" rejected: {error}, skipping",
                    transaction.payee
                );
                return Ok(BlockOutcome::Skipped(SkipReason::AmbiguousAmounts));
            }
        };

        if let Some(index) = resolved.filled_index {
            let posting = &resolved.postings[index];
            debug!(
                "inferred missing amount for {}: {}",
                posting.account, posting.amount
            );
        }
        if !resolved.is_balanced() {
            // Persisted anyway: surfacing bad data beats silently dropping it.
            warn!(
                "transaction \"{}\" does not balance: residual {}",
                resolved.payee, resolved.residual
            );
        }

        if let Err(error) = self.persist(&resolved, &hash) {
            warn!(
                "storage failure importing \"{}\": {error:#}",
                resolved.payee
            );
            self.store
                .rollback()
                .context("rollback after failed block write")?;
            return Ok(BlockOutcome::Skipped(SkipReason::Storage(format!(
                "{error:#}"
            ))));
        }
        Ok(BlockOutcome::Imported)
    }

    /// Write one resolved transaction as a unit: rows plus a commit.
    fn persist(&mut self, resolved: &ResolvedTransaction, hash: &str) -> anyhow::Result<()> {
        let transaction_id = self
            .store
            .create_transaction(resolved.date, &resolved.payee, hash)?;

        for posting in &resolved.postings {
            let account = resolve_account(&mut self.store, &posting.account)?;
            // Stored at two decimal places
            let mut amount = posting.amount.number;
            amount.rescale(2);
            self.store
                .create_posting(transaction_id, account, amount, &posting.amount.currency)?;
        }

        self.store.commit()?;
        Ok(())
    }
}
