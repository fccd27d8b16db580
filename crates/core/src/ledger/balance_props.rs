//! Property-based tests for ledger balance math.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::balance::next_balance;
use super::entry::{resolve_entry, validate_amounts};
use super::error::LedgerError;

fn amount() -> impl Strategy<Value = Decimal> {
    // Two-decimal money amounts up to 10M.
    (0i64..=1_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// One side of a journal entry, chosen at random.
fn entry() -> impl Strategy<Value = (Decimal, Decimal, Option<Decimal>)> {
    prop_oneof![
        positive_amount().prop_map(|d| (d, Decimal::ZERO, None)),
        (positive_amount(), proptest::option::of(amount()))
            .prop_map(|(c, disc)| (Decimal::ZERO, c, disc)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The final balance is the initial balance plus the signed sum of all
    /// posted entries, regardless of order or count.
    #[test]
    fn prop_balance_is_signed_sum(
        initial in amount(),
        entries in proptest::collection::vec(entry(), 0..20),
    ) {
        let mut balance = initial;
        let mut signed_sum = Decimal::ZERO;
        for (debit, credit, discount) in entries {
            let resolved = resolve_entry(debit, credit, discount).unwrap();
            signed_sum += resolved.debit - resolved.effective_credit;
            balance = next_balance(balance, resolved.debit, resolved.effective_credit);
        }
        prop_assert_eq!(balance, initial + signed_sum);
    }

    /// Every resolved entry moves exactly one side.
    #[test]
    fn prop_resolved_entry_is_single_sided(
        (debit, credit, discount) in entry(),
    ) {
        let resolved = resolve_entry(debit, credit, discount).unwrap();
        prop_assert!(resolved.debit.is_zero() || resolved.effective_credit.is_zero());
        prop_assert_eq!(resolved.effective_credit, resolved.credit + resolved.discount);
    }

    /// Both sides positive is always rejected.
    #[test]
    fn prop_both_sides_rejected(debit in positive_amount(), credit in positive_amount()) {
        prop_assert_eq!(
            validate_amounts(debit, credit),
            Err(LedgerError::BothSidesPositive)
        );
    }

    /// A payment followed by an equal purchase leaves the balance unchanged.
    #[test]
    fn prop_equal_debit_credit_cancel(initial in amount(), x in positive_amount()) {
        let after_debit = next_balance(initial, x, Decimal::ZERO);
        let after_credit = next_balance(after_debit, Decimal::ZERO, x);
        prop_assert_eq!(after_credit, initial);
    }
}
