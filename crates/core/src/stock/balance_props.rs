//! Property tests for stock balance computation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::balance::apply_movement;
use super::movement::{Direction, MovementType};

/// Strategy for strictly positive base quantities with two decimal places.
fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for movement types.
fn movement_type_strategy() -> impl Strategy<Value = MovementType> {
    prop_oneof![
        Just(MovementType::In),
        Just(MovementType::Out),
        Just(MovementType::AdjustmentIn),
        Just(MovementType::AdjustmentOut),
        Just(MovementType::ReturnIn),
        Just(MovementType::ReturnOut),
        Just(MovementType::ProjectIssue),
        Just(MovementType::ProjectReturn),
    ]
}

/// Strategy for a sequence of movements.
fn movements_strategy(max_len: usize) -> impl Strategy<Value = Vec<(MovementType, Decimal)>> {
    prop::collection::vec((movement_type_strategy(), quantity_strategy()), 1..=max_len)
}

fn signed(ty: MovementType, qty: Decimal) -> Decimal {
    match ty.direction() {
        Direction::Inbound => qty,
        Direction::Outbound => -qty,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// For any accepted sequence of movements, the final balance equals the
    /// initial stock plus the sum of signed base quantities.
    #[test]
    fn prop_final_balance_is_signed_sum(
        initial in (0i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2)),
        movements in movements_strategy(30),
    ) {
        let mut balance = initial;
        let mut applied_sum = Decimal::ZERO;

        for (ty, qty) in movements {
            // Rejected movements must not change the balance.
            if let Ok(next) = apply_movement(balance, ty, qty) {
                applied_sum += signed(ty, qty);
                balance = next;
            }
        }

        prop_assert_eq!(balance, initial + applied_sum);
    }

    /// An accepted movement never leaves a negative balance unless the type
    /// is exempt from the rule.
    #[test]
    fn prop_accepted_balance_non_negative_unless_exempt(
        baseline in (0i64..100_000i64).prop_map(|n| Decimal::new(n, 2)),
        ty in movement_type_strategy(),
        qty in quantity_strategy(),
    ) {
        if let Ok(balance_after) = apply_movement(baseline, ty, qty) {
            if !ty.allows_negative_balance() {
                prop_assert!(balance_after >= Decimal::ZERO);
            }
        }
    }

    /// A rejected outbound movement is exactly one that would overdraw.
    #[test]
    fn prop_outbound_rejection_boundary(
        baseline in (0i64..100_000i64).prop_map(|n| Decimal::new(n, 2)),
        qty in quantity_strategy(),
    ) {
        let result = apply_movement(baseline, MovementType::Out, qty);
        if qty > baseline {
            prop_assert!(result.is_err());
        } else {
            prop_assert_eq!(result.unwrap(), baseline - qty);
        }
    }

    /// Inbound and outbound of the same quantity cancel out.
    #[test]
    fn prop_in_then_out_cancels(
        baseline in (0i64..100_000i64).prop_map(|n| Decimal::new(n, 2)),
        qty in quantity_strategy(),
    ) {
        let up = apply_movement(baseline, MovementType::In, qty).unwrap();
        let down = apply_movement(up, MovementType::Out, qty).unwrap();
        prop_assert_eq!(down, baseline);
    }
}
