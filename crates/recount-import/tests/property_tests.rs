//! Property-based tests for the dedup hash and amount inference.

use chrono::NaiveDate;
use proptest::prelude::*;
use recount_booking::resolve_amounts;
use recount_core::{Amount, ParsedPosting, ParsedTransaction};
use recount_import::dedup_hash;
use rust_decimal::Decimal;

fn arb_cents() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Postings with distinct accounts; `None` cents means amount-absent.
fn arb_postings() -> impl Strategy<Value = Vec<ParsedPosting>> {
    prop::collection::vec(prop::option::of(arb_cents()), 1..6).prop_map(|cells| {
        cells
            .into_iter()
            .enumerate()
            .map(|(index, cents)| ParsedPosting {
                account: format!("Assets:Account{index}"),
                amount: cents.map(|number| Amount::new(number, "INR")),
            })
            .collect()
    })
}

fn transaction_with(postings: Vec<ParsedPosting>) -> ParsedTransaction {
    ParsedTransaction {
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        payee: "Property".to_string(),
        postings,
    }
}

proptest! {
    #[test]
    fn hash_invariant_under_rotation(postings in arb_postings(), offset in 0usize..8) {
        let rotation = offset % postings.len();
        let mut rotated = postings.clone();
        rotated.rotate_left(rotation);

        let original = transaction_with(postings);
        let shuffled = transaction_with(rotated);

        prop_assert_eq!(dedup_hash(&original), dedup_hash(&shuffled));
    }

    #[test]
    fn hash_reversal_invariant(postings in arb_postings()) {
        let mut reversed = postings.clone();
        reversed.reverse();

        prop_assert_eq!(
            dedup_hash(&transaction_with(postings)),
            dedup_hash(&transaction_with(reversed))
        );
    }

    #[test]
    fn single_missing_inference_always_balances(
        amounts in prop::collection::vec(arb_cents(), 1..6),
        position in 0usize..6,
    ) {
        let mut postings: Vec<ParsedPosting> = amounts
            .iter()
            .enumerate()
            .map(|(index, &number)| ParsedPosting {
                account: format!("Expenses:Item{index}"),
                amount: Some(Amount::new(number, "INR")),
            })
            .collect();
        let slot = position % (postings.len() + 1);
        postings.insert(slot, ParsedPosting::auto("Assets:Cash"));

        let resolved = resolve_amounts(&transaction_with(postings)).unwrap();

        prop_assert_eq!(resolved.residual, Decimal::ZERO);
        prop_assert!(resolved.is_balanced());
        prop_assert_eq!(resolved.filled_index, Some(slot));

        let expected: Decimal = -amounts.iter().copied().sum::<Decimal>();
        prop_assert_eq!(resolved.postings[slot].amount.number, expected);
    }

    #[test]
    fn fully_specified_residual_is_plain_sum(amounts in prop::collection::vec(arb_cents(), 1..6)) {
        let postings: Vec<ParsedPosting> = amounts
            .iter()
            .enumerate()
            .map(|(index, &number)| ParsedPosting {
                account: format!("Expenses:Item{index}"),
                amount: Some(Amount::new(number, "INR")),
            })
            .collect();

        let resolved = resolve_amounts(&transaction_with(postings)).unwrap();
        let expected: Decimal = amounts.iter().copied().sum();

        prop_assert_eq!(resolved.residual, expected);
        prop_assert_eq!(resolved.filled_index, None);
    }
}
