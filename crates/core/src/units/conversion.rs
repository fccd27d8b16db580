//! Quantity conversion between units of a shared category.
//!
//! Conversion is always mediated through the category's base unit:
//! `quantity * from.conversion_factor / to.conversion_factor`.

use mortar_shared::types::UnitId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::UnitError;

/// Snapshot of a unit needed for conversion and validation.
///
/// This is a plain value type; `mortar-db` builds it from the persisted
/// `units` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRef {
    /// The unit ID.
    pub id: UnitId,
    /// The measurement category (e.g. "weight", "volume").
    pub category: String,
    /// Whether this is the category's base unit.
    pub is_base: bool,
    /// Factor relative to the category base unit (1 for base units).
    pub conversion_factor: Decimal,
}

impl UnitRef {
    /// Creates a base unit snapshot (factor fixed at 1).
    #[must_use]
    pub fn base(id: UnitId, category: impl Into<String>) -> Self {
        Self {
            id,
            category: category.into(),
            is_base: true,
            conversion_factor: Decimal::ONE,
        }
    }

    /// Creates a derived unit snapshot.
    #[must_use]
    pub fn derived(id: UnitId, category: impl Into<String>, conversion_factor: Decimal) -> Self {
        Self {
            id,
            category: category.into(),
            is_base: false,
            conversion_factor,
        }
    }
}

/// Converts a quantity from one unit to another within the same category.
///
/// # Errors
///
/// Returns `CategoryMismatch` if the units belong to different categories,
/// or `NonPositiveFactor` if either factor is not strictly positive.
pub fn convert(quantity: Decimal, from: &UnitRef, to: &UnitRef) -> Result<Decimal, UnitError> {
    if from.category != to.category {
        return Err(UnitError::CategoryMismatch {
            from: from.category.clone(),
            to: to.category.clone(),
        });
    }
    if from.conversion_factor <= Decimal::ZERO || to.conversion_factor <= Decimal::ZERO {
        return Err(UnitError::NonPositiveFactor);
    }
    // Identity conversions stay exact, no division round-off.
    if from.id == to.id {
        return Ok(quantity);
    }

    Ok(quantity * from.conversion_factor / to.conversion_factor)
}

/// Converts a quantity from the given unit into its category base unit.
///
/// # Errors
///
/// Returns `NonPositiveFactor` if the unit's factor is not strictly positive.
pub fn to_base(quantity: Decimal, unit: &UnitRef) -> Result<Decimal, UnitError> {
    if unit.conversion_factor <= Decimal::ZERO {
        return Err(UnitError::NonPositiveFactor);
    }
    Ok(quantity * unit.conversion_factor)
}

/// Converts a base-unit quantity into the given unit.
///
/// # Errors
///
/// Returns `NonPositiveFactor` if the unit's factor is not strictly positive.
pub fn from_base(quantity: Decimal, unit: &UnitRef) -> Result<Decimal, UnitError> {
    if unit.conversion_factor <= Decimal::ZERO {
        return Err(UnitError::NonPositiveFactor);
    }
    Ok(quantity / unit.conversion_factor)
}

/// Validates a derived unit definition against its referenced base unit.
///
/// A derived unit must carry a strictly positive factor and point at a unit
/// that is itself the base of the same category.
///
/// # Errors
///
/// Returns the specific definition violation.
pub fn validate_derived_unit(
    unit_id: UnitId,
    category: &str,
    conversion_factor: Decimal,
    base: &UnitRef,
) -> Result<(), UnitError> {
    if conversion_factor <= Decimal::ZERO {
        return Err(UnitError::NonPositiveFactor);
    }
    if !base.is_base {
        return Err(UnitError::BaseUnitNotBase {
            unit: unit_id,
            base: base.id,
        });
    }
    if base.category != category {
        return Err(UnitError::BaseUnitCategoryMismatch {
            unit: unit_id,
            base: base.id,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn kg() -> UnitRef {
        UnitRef::base(UnitId::new(), "weight")
    }

    fn ton() -> UnitRef {
        UnitRef::derived(UnitId::new(), "weight", dec!(1000))
    }

    fn gram() -> UnitRef {
        UnitRef::derived(UnitId::new(), "weight", dec!(0.001))
    }

    fn liter() -> UnitRef {
        UnitRef::base(UnitId::new(), "volume")
    }

    #[test]
    fn test_convert_to_base() {
        let qty = convert(dec!(2), &ton(), &kg()).unwrap();
        assert_eq!(qty, dec!(2000));
    }

    #[test]
    fn test_convert_from_base() {
        let qty = convert(dec!(500), &kg(), &ton()).unwrap();
        assert_eq!(qty, dec!(0.5));
    }

    #[test]
    fn test_convert_between_derived_units() {
        // 3 tons = 3_000_000 grams
        let qty = convert(dec!(3), &ton(), &gram()).unwrap();
        assert_eq!(qty, dec!(3000000));
    }

    #[test]
    fn test_convert_same_unit_is_exact() {
        let unit = ton();
        let qty = convert(dec!(7.123456), &unit, &unit).unwrap();
        assert_eq!(qty, dec!(7.123456));
    }

    #[test]
    fn test_convert_category_mismatch() {
        let err = convert(dec!(1), &kg(), &liter()).unwrap_err();
        assert!(matches!(err, UnitError::CategoryMismatch { .. }));
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-2))]
    fn test_convert_rejects_non_positive_factor(#[case] factor: Decimal) {
        let bad = UnitRef::derived(UnitId::new(), "weight", factor);
        assert_eq!(
            convert(dec!(1), &bad, &kg()).unwrap_err(),
            UnitError::NonPositiveFactor
        );
        assert_eq!(to_base(dec!(1), &bad).unwrap_err(), UnitError::NonPositiveFactor);
        assert_eq!(
            from_base(dec!(1), &bad).unwrap_err(),
            UnitError::NonPositiveFactor
        );
    }

    #[test]
    fn test_to_base_and_from_base() {
        assert_eq!(to_base(dec!(2), &ton()).unwrap(), dec!(2000));
        assert_eq!(from_base(dec!(2000), &ton()).unwrap(), dec!(2));
    }

    #[test]
    fn test_validate_derived_unit_ok() {
        let base = kg();
        assert!(validate_derived_unit(UnitId::new(), "weight", dec!(50), &base).is_ok());
    }

    #[test]
    fn test_validate_derived_unit_rejects_non_base_reference() {
        let not_base = ton();
        let err = validate_derived_unit(UnitId::new(), "weight", dec!(50), &not_base).unwrap_err();
        assert!(matches!(err, UnitError::BaseUnitNotBase { .. }));
    }

    #[test]
    fn test_validate_derived_unit_rejects_category_mismatch() {
        let base = liter();
        let err = validate_derived_unit(UnitId::new(), "weight", dec!(50), &base).unwrap_err();
        assert!(matches!(err, UnitError::BaseUnitCategoryMismatch { .. }));
    }

    #[test]
    fn test_validate_derived_unit_rejects_zero_factor() {
        let base = kg();
        assert_eq!(
            validate_derived_unit(UnitId::new(), "weight", dec!(0), &base).unwrap_err(),
            UnitError::NonPositiveFactor
        );
    }
}
