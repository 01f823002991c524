//! Line classification and transaction-block grouping.
//!
//! The dialect is line-oriented and whitespace-significant:
//!
//! ```text
//! 2024/01/15  Grocery store
//!     Expenses:Food    ₹1,250.00
//!     Assets:Banking:Checking
//! ```
//!
//! A header is `YYYY/MM/DD` followed by free payee text. Posting lines are
//! indented by exactly four spaces. Blank lines and `;` comments are
//! ignored wherever they occur; any other unrecognized line is skipped.

use regex::Regex;

/// A header line plus the candidate posting lines grouped under it.
#[derive(Debug)]
pub(crate) struct Block<'a> {
    pub header: &'a str,
    pub postings: Vec<&'a str>,
}

/// Compiled line patterns for one parser instance.
#[derive(Debug)]
pub(crate) struct Grammar {
    header: Regex,
}

impl Grammar {
    pub fn new() -> Self {
        Self {
            header: Regex::new(r"^(\d{4}/\d{2}/\d{2})\s+(.+)$").expect("header pattern"),
        }
    }

    /// Whether the line's first non-whitespace character starts a comment.
    pub fn is_comment(line: &str) -> bool {
        line.trim_start().starts_with(';')
    }

    /// Split a header line into `(date_text, payee)`.
    ///
    /// Matching here only checks the shape; whether the date is a real
    /// calendar date is decided when the block is parsed.
    pub fn header_parts<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let caps = self.header.captures(line)?;
        Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    }

    /// Split a posting line into `(account_token, amount_text)`.
    ///
    /// Requires exactly four spaces of indentation: a fifth whitespace
    /// character disqualifies the line.
    pub fn posting_parts(line: &str) -> Option<(&str, Option<&str>)> {
        let rest = line.strip_prefix("    ")?;
        if rest.chars().next()?.is_whitespace() {
            return None;
        }
        match rest.find(char::is_whitespace) {
            Some(split) => {
                let amount = rest[split..].trim();
                Some((&rest[..split], (!amount.is_empty()).then_some(amount)))
            }
            None => Some((rest, None)),
        }
    }

    /// Group lines into transaction blocks.
    ///
    /// Every non-blank, non-comment line between one header and the next
    /// is a candidate posting of the earlier header. Lines before the first
    /// header are dropped.
    pub fn group<'a>(&self, lines: &[&'a str]) -> Vec<Block<'a>> {
        let mut blocks = Vec::new();
        let mut current: Option<Block<'a>> = None;

        for &line in lines {
            if line.trim().is_empty() || Self::is_comment(line) {
                continue;
            }
            if self.header.is_match(line) {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
                current = Some(Block {
                    header: line,
                    postings: Vec::new(),
                });
            } else if let Some(block) = current.as_mut() {
                block.postings.push(line);
            }
        }
        if let Some(block) = current {
            blocks.push(block);
        }
        blocks
    }
}
