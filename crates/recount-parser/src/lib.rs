//! Parser for the recount ledger dialect.
//!
//! Turns raw ledger text into [`ParsedTransaction`]s in three passes:
//! a leading alias-directive run is collected and stripped, remaining lines
//! are grouped into transaction blocks, and each block is parsed into a
//! dated transaction with alias-expanded postings.
//!
//! Malformed input is discarded rather than reported: a header with an
//! impossible calendar date drops its whole block, an unparseable amount
//! leaves the posting amount-absent, and a block with no recognizable
//! postings is dropped entirely.
//!
//! # Example
//!
//! ```
//! use recount_parser::parse_ledger;
//!
//! let source = "\
//! alias A=Assets
//!
//! 2024/01/15 Grocery store
//!     Expenses:Food    1,250.00
//!     A:Banking:Checking
//! ";
//!
//! let transactions = parse_ledger(source);
//! assert_eq!(transactions.len(), 1);
//! assert_eq!(transactions[0].postings[1].account, "Assets:Banking:Checking");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aliases;
mod amount;
mod grammar;

pub use aliases::AliasTable;
pub use amount::AmountParser;

use chrono::NaiveDate;
use grammar::{Block, Grammar};
use recount_core::{ParsedPosting, ParsedTransaction};

/// Parser state for one run: alias table plus compiled line patterns.
///
/// Alias definitions accumulate on the instance, never in shared state, so
/// repeated or concurrent runs cannot leak aliases into each other.
#[derive(Debug)]
pub struct LedgerParser {
    aliases: AliasTable,
    amounts: AmountParser,
    grammar: Grammar,
}

impl LedgerParser {
    /// Create a parser with an empty alias table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            aliases: AliasTable::new(),
            amounts: AmountParser::new(),
            grammar: Grammar::new(),
        }
    }

    /// Parse ledger source text into transactions, in source order.
    pub fn parse(&mut self, source: &str) -> Vec<ParsedTransaction> {
        let lines: Vec<&str> = source.lines().map(str::trim_end).collect();
        let body = self.aliases.strip(&lines);
        let blocks = self.grammar.group(&body);
        blocks
            .iter()
            .filter_map(|block| self.parse_block(block))
            .collect()
    }

    /// The aliases collected from the source's leading directive run.
    #[must_use]
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    fn parse_block(&self, block: &Block<'_>) -> Option<ParsedTransaction> {
        let (date_text, payee) = self.grammar.header_parts(block.header)?;
        // Shape matched already; a non-existent calendar date drops the block.
        let date = NaiveDate::parse_from_str(date_text, "%Y/%m/%d").ok()?;

        let mut postings = Vec::new();
        for &line in &block.postings {
            let Some((token, amount_text)) = Grammar::posting_parts(line) else {
                continue;
            };
            postings.push(ParsedPosting {
                account: self.aliases.expand(token),
                amount: amount_text.and_then(|text| self.amounts.parse(text)),
            });
        }

        if postings.is_empty() {
            return None;
        }
        Some(ParsedTransaction {
            date,
            payee: payee.trim().to_string(),
            postings,
        })
    }
}

impl Default for LedgerParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse ledger source with a fresh parser instance.
#[must_use]
pub fn parse_ledger(source: &str) -> Vec<ParsedTransaction> {
    LedgerParser::new().parse(source)
}
