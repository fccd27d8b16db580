//! Unit conversion and definition error types.

use mortar_shared::error::AppError;
use mortar_shared::types::UnitId;
use thiserror::Error;

/// Errors that can occur during unit conversion or unit registration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitError {
    /// The two units belong to different measurement categories.
    #[error("Cannot convert between categories '{from}' and '{to}'")]
    CategoryMismatch {
        /// Category of the source unit.
        from: String,
        /// Category of the target unit.
        to: String,
    },

    /// The unit is neither the material's base unit nor one of its
    /// alternative units.
    #[error("Unit {0} is not valid for this material")]
    InvalidUnitForMaterial(UnitId),

    /// A conversion factor must be strictly positive.
    #[error("Conversion factor must be positive")]
    NonPositiveFactor,

    /// A derived unit must reference a base unit of its own category.
    #[error("Unit {unit} references base unit {base} of a different category")]
    BaseUnitCategoryMismatch {
        /// The derived unit being defined.
        unit: UnitId,
        /// The referenced base unit.
        base: UnitId,
    },

    /// A derived unit must reference a unit that is itself a base unit.
    #[error("Unit {unit} references {base}, which is not a base unit")]
    BaseUnitNotBase {
        /// The derived unit being defined.
        unit: UnitId,
        /// The referenced unit.
        base: UnitId,
    },

    /// At most one alternative unit may be the default purchase unit.
    #[error("Material defines more than one default purchase unit")]
    DuplicateDefaultPurchaseUnit,

    /// At most one alternative unit may be the default issue unit.
    #[error("Material defines more than one default issue unit")]
    DuplicateDefaultIssueUnit,
}

impl UnitError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CategoryMismatch { .. } => "CATEGORY_MISMATCH",
            Self::InvalidUnitForMaterial(_) => "INVALID_UNIT_FOR_MATERIAL",
            Self::NonPositiveFactor => "NON_POSITIVE_FACTOR",
            Self::BaseUnitCategoryMismatch { .. } => "BASE_UNIT_CATEGORY_MISMATCH",
            Self::BaseUnitNotBase { .. } => "BASE_UNIT_NOT_BASE",
            Self::DuplicateDefaultPurchaseUnit => "DUPLICATE_DEFAULT_PURCHASE_UNIT",
            Self::DuplicateDefaultIssueUnit => "DUPLICATE_DEFAULT_ISSUE_UNIT",
        }
    }
}

impl From<UnitError> for AppError {
    fn from(err: UnitError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            UnitError::CategoryMismatch {
                from: "weight".into(),
                to: "volume".into(),
            }
            .error_code(),
            "CATEGORY_MISMATCH"
        );
        assert_eq!(
            UnitError::InvalidUnitForMaterial(UnitId::new()).error_code(),
            "INVALID_UNIT_FOR_MATERIAL"
        );
        assert_eq!(UnitError::NonPositiveFactor.error_code(), "NON_POSITIVE_FACTOR");
    }

    #[test]
    fn test_maps_to_validation_app_error() {
        let app = AppError::from(UnitError::NonPositiveFactor);
        assert_eq!(app.status_code(), 400);
        assert_eq!(app.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_error_display() {
        let err = UnitError::CategoryMismatch {
            from: "weight".into(),
            to: "volume".into(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot convert between categories 'weight' and 'volume'"
        );
    }
}
