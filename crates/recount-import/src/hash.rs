//! Content hashing for re-import deduplication.
//!
//! The hash input is canonical: postings are sorted by account path, so the
//! same (date, payee, posting set) hashes identically no matter how the
//! source file orders its lines. Hashing runs before amount inference - a
//! re-imported file must hash to the same value it hashed to the first
//! time, and inference would change the rendered amounts.

use recount_core::{ParsedPosting, ParsedTransaction, DEFAULT_CURRENCY};
use sha2::{Digest, Sha256};

/// Compute the canonical dedup hash of a parsed transaction.
///
/// Input layout: ISO-8601 date, `|`, payee, `|`, then each posting as
/// `account:amount:currency|` sorted by account path ascending. An
/// amount-absent posting renders an empty amount with the default currency.
/// The SHA-256 digest is returned as lowercase hex.
///
/// Collisions are treated as identity; at 256 bits that is accepted by
/// design.
#[must_use]
pub fn dedup_hash(transaction: &ParsedTransaction) -> String {
    let mut canonical = format!("{}|{}|", transaction.date, transaction.payee);

    let mut postings: Vec<&ParsedPosting> = transaction.postings.iter().collect();
    postings.sort_by(|a, b| a.account.cmp(&b.account));

    for posting in postings {
        match &posting.amount {
            Some(amount) => canonical.push_str(&format!(
                "{}:{}:{}|",
                posting.account, amount.number, amount.currency
            )),
            None => canonical.push_str(&format!("{}::{}|", posting.account, DEFAULT_CURRENCY)),
        }
    }

    let digest = Sha256::digest(canonical.as_bytes());
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{byte:02x}"));
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use recount_core::Amount;
    use rust_decimal_macros::dec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_order_independent() {
        let forward = ParsedTransaction::new(date(2024, 1, 15), "Transfer")
            .with_posting(ParsedPosting::new(
                "Assets:A",
                Amount::new(dec!(100.00), "INR"),
            ))
            .with_posting(ParsedPosting::new(
                "Assets:B",
                Amount::new(dec!(-100.00), "INR"),
            ));
        let reversed = ParsedTransaction::new(date(2024, 1, 15), "Transfer")
            .with_posting(ParsedPosting::new(
                "Assets:B",
                Amount::new(dec!(-100.00), "INR"),
            ))
            .with_posting(ParsedPosting::new(
                "Assets:A",
                Amount::new(dec!(100.00), "INR"),
            ));

        assert_eq!(dedup_hash(&forward), dedup_hash(&reversed));
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let txn = ParsedTransaction::new(date(2024, 1, 15), "Anything")
            .with_posting(ParsedPosting::auto("Assets:Cash"));
        let hash = dedup_hash(&txn);

        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_differs_by_date_payee_and_postings() {
        let base = ParsedTransaction::new(date(2024, 1, 15), "Coffee")
            .with_posting(ParsedPosting::new(
                "Expenses:Food",
                Amount::new(dec!(5.00), "INR"),
            ));

        let mut other_date = base.clone();
        other_date.date = date(2024, 1, 16);
        assert_ne!(dedup_hash(&base), dedup_hash(&other_date));

        let mut other_payee = base.clone();
        other_payee.payee = "Tea".to_string();
        assert_ne!(dedup_hash(&base), dedup_hash(&other_payee));

        let mut other_amount = base.clone();
        other_amount.postings[0].amount = Some(Amount::new(dec!(6.00), "INR"));
        assert_ne!(dedup_hash(&base), dedup_hash(&other_amount));
    }

    #[test]
    fn test_absent_amount_renders_empty() {
        // Pre-inference hashing: the amount-absent posting contributes its
        // account and the default currency only. A parsed zero is NOT the
        // same as absent.
        let absent = ParsedTransaction::new(date(2024, 1, 15), "X")
            .with_posting(ParsedPosting::auto("Assets:Cash"));
        let zero = ParsedTransaction::new(date(2024, 1, 15), "X").with_posting(
            ParsedPosting::new("Assets:Cash", Amount::new(dec!(0.00), "INR")),
        );

        assert_ne!(dedup_hash(&absent), dedup_hash(&zero));
    }

    #[test]
    fn test_scale_is_significant() {
        // "1250" and "1250.00" render differently and hash differently,
        // exactly as they differ in the source text.
        let bare = ParsedTransaction::new(date(2024, 1, 15), "X").with_posting(
            ParsedPosting::new("Assets:Cash", Amount::new(dec!(1250), "INR")),
        );
        let scaled = ParsedTransaction::new(date(2024, 1, 15), "X").with_posting(
            ParsedPosting::new("Assets:Cash", Amount::new(dec!(1250.00), "INR")),
        );

        assert_ne!(dedup_hash(&bare), dedup_hash(&scaled));
    }
}
