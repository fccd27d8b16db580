//! Material-specific unit resolution.
//!
//! A material stores stock in its base unit but may be purchased or issued
//! in alternative units. The factor of an alternative unit is defined on the
//! material itself, not taken from the unit's global conversion factor.

use mortar_shared::types::UnitId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::UnitError;

/// An alternative unit attached to a material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialUnit {
    /// The unit being mapped.
    pub unit_id: UnitId,
    /// Base units per one of this unit, specific to the material.
    pub conversion_factor: Decimal,
    /// Whether purchases default to this unit.
    pub is_default_purchase: bool,
    /// Whether issues default to this unit.
    pub is_default_issue: bool,
}

/// Resolves the base-unit factor for a unit used against a material.
///
/// Factor 1 when the unit is the material's base unit; otherwise the
/// material-specific factor from its alternative-unit table.
///
/// # Errors
///
/// Returns `InvalidUnitForMaterial` when the unit is neither the base unit
/// nor a registered alternative, or `NonPositiveFactor` when the registered
/// factor is invalid.
pub fn material_base_factor(
    base_unit_id: UnitId,
    alternative_units: &[MaterialUnit],
    unit_id: UnitId,
) -> Result<Decimal, UnitError> {
    if unit_id == base_unit_id {
        return Ok(Decimal::ONE);
    }

    let entry = alternative_units
        .iter()
        .find(|alt| alt.unit_id == unit_id)
        .ok_or(UnitError::InvalidUnitForMaterial(unit_id))?;

    if entry.conversion_factor <= Decimal::ZERO {
        return Err(UnitError::NonPositiveFactor);
    }

    Ok(entry.conversion_factor)
}

/// Validates the default-purchase/default-issue flags of a material's
/// alternative units: at most one of each.
///
/// # Errors
///
/// Returns `DuplicateDefaultPurchaseUnit` or `DuplicateDefaultIssueUnit`.
pub fn validate_default_flags(alternative_units: &[MaterialUnit]) -> Result<(), UnitError> {
    let purchase_defaults = alternative_units
        .iter()
        .filter(|alt| alt.is_default_purchase)
        .count();
    if purchase_defaults > 1 {
        return Err(UnitError::DuplicateDefaultPurchaseUnit);
    }

    let issue_defaults = alternative_units
        .iter()
        .filter(|alt| alt.is_default_issue)
        .count();
    if issue_defaults > 1 {
        return Err(UnitError::DuplicateDefaultIssueUnit);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn alt(unit_id: UnitId, factor: Decimal) -> MaterialUnit {
        MaterialUnit {
            unit_id,
            conversion_factor: factor,
            is_default_purchase: false,
            is_default_issue: false,
        }
    }

    #[test]
    fn test_base_unit_factor_is_one() {
        let base = UnitId::new();
        let factor = material_base_factor(base, &[], base).unwrap();
        assert_eq!(factor, Decimal::ONE);
    }

    #[test]
    fn test_alternative_unit_uses_material_factor() {
        let base = UnitId::new();
        let bag = UnitId::new();
        // A bag of this material weighs 50 base units, regardless of any
        // global factor the bag unit might carry.
        let factor = material_base_factor(base, &[alt(bag, dec!(50))], bag).unwrap();
        assert_eq!(factor, dec!(50));
    }

    #[test]
    fn test_unknown_unit_is_rejected() {
        let base = UnitId::new();
        let bag = UnitId::new();
        let truck = UnitId::new();
        let err = material_base_factor(base, &[alt(bag, dec!(50))], truck).unwrap_err();
        assert_eq!(err, UnitError::InvalidUnitForMaterial(truck));
    }

    #[test]
    fn test_non_positive_material_factor_is_rejected() {
        let base = UnitId::new();
        let bag = UnitId::new();
        let err = material_base_factor(base, &[alt(bag, dec!(0))], bag).unwrap_err();
        assert_eq!(err, UnitError::NonPositiveFactor);
    }

    #[test]
    fn test_default_flags_single_of_each_ok() {
        let mut a = alt(UnitId::new(), dec!(5));
        a.is_default_purchase = true;
        let mut b = alt(UnitId::new(), dec!(10));
        b.is_default_issue = true;
        assert!(validate_default_flags(&[a, b]).is_ok());
    }

    #[test]
    fn test_duplicate_default_purchase_rejected() {
        let mut a = alt(UnitId::new(), dec!(5));
        a.is_default_purchase = true;
        let mut b = alt(UnitId::new(), dec!(10));
        b.is_default_purchase = true;
        assert_eq!(
            validate_default_flags(&[a, b]).unwrap_err(),
            UnitError::DuplicateDefaultPurchaseUnit
        );
    }

    #[test]
    fn test_duplicate_default_issue_rejected() {
        let mut a = alt(UnitId::new(), dec!(5));
        a.is_default_issue = true;
        let mut b = alt(UnitId::new(), dec!(10));
        b.is_default_issue = true;
        assert_eq!(
            validate_default_flags(&[a, b]).unwrap_err(),
            UnitError::DuplicateDefaultIssueUnit
        );
    }
}
