//! Property tests for unit conversion.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use mortar_shared::types::UnitId;

use super::conversion::{convert, from_base, to_base, UnitRef};
use super::error::UnitError;

const TOLERANCE: Decimal = dec!(0.000000001);

/// Strategy for quantities with two decimal places.
fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for strictly positive conversion factors with three decimal places.
fn factor_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 3))
}

fn unit(category: &str, factor: Decimal) -> UnitRef {
    UnitRef::derived(UnitId::new(), category, factor)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Converting A -> B -> A returns the original quantity within tolerance.
    #[test]
    fn prop_round_trip(
        qty in quantity_strategy(),
        factor_a in factor_strategy(),
        factor_b in factor_strategy(),
    ) {
        let a = unit("weight", factor_a);
        let b = unit("weight", factor_b);

        let there = convert(qty, &a, &b).unwrap();
        let back = convert(there, &b, &a).unwrap();

        prop_assert!((back - qty).abs() <= TOLERANCE, "round trip drifted: {qty} -> {back}");
    }

    /// Converting a unit to itself returns the input unchanged.
    #[test]
    fn prop_identity_conversion_exact(
        qty in quantity_strategy(),
        factor in factor_strategy(),
    ) {
        let a = unit("weight", factor);
        prop_assert_eq!(convert(qty, &a, &a).unwrap(), qty);
    }

    /// Converting between units of different categories always fails.
    #[test]
    fn prop_cross_category_always_fails(
        qty in quantity_strategy(),
        factor_a in factor_strategy(),
        factor_b in factor_strategy(),
    ) {
        let a = unit("weight", factor_a);
        let b = unit("volume", factor_b);
        let result = convert(qty, &a, &b);
        prop_assert!(
            matches!(result, Err(UnitError::CategoryMismatch { .. })),
            "cross-category conversion did not fail: {result:?}"
        );
    }

    /// to_base and from_base invert each other.
    #[test]
    fn prop_base_round_trip(
        qty in quantity_strategy(),
        factor in factor_strategy(),
    ) {
        let a = unit("weight", factor);
        let based = to_base(qty, &a).unwrap();
        let back = from_base(based, &a).unwrap();
        prop_assert!((back - qty).abs() <= TOLERANCE);
    }

    /// Conversion via an explicit base unit agrees with direct conversion.
    #[test]
    fn prop_conversion_mediated_by_base(
        qty in quantity_strategy(),
        factor_a in factor_strategy(),
        factor_b in factor_strategy(),
    ) {
        let base = UnitRef::base(UnitId::new(), "weight");
        let a = unit("weight", factor_a);
        let b = unit("weight", factor_b);

        let direct = convert(qty, &a, &b).unwrap();
        let via_base = convert(convert(qty, &a, &base).unwrap(), &base, &b).unwrap();

        prop_assert!((direct - via_base).abs() <= TOLERANCE);
    }
}
