//! Stock ledger error types.

use mortar_shared::error::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while recording stock movements.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StockError {
    /// The movement would drive the on-hand balance negative.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        /// Requested quantity in base units.
        requested: Decimal,
        /// Available balance in base units.
        available: Decimal,
    },

    /// Movement quantities must be strictly positive.
    #[error("Movement quantity must be positive")]
    NonPositiveQuantity,

    /// The counted quantity matches the recorded stock; nothing to adjust.
    #[error("Counted quantity matches recorded stock, no adjustment needed")]
    NoAdjustmentNeeded,
}

impl StockError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::NonPositiveQuantity => "NON_POSITIVE_QUANTITY",
            Self::NoAdjustmentNeeded => "NO_ADJUSTMENT_NEEDED",
        }
    }
}

impl From<StockError> for AppError {
    fn from(err: StockError) -> Self {
        match &err {
            StockError::NonPositiveQuantity => Self::Validation(err.to_string()),
            StockError::InsufficientStock { .. } | StockError::NoAdjustmentNeeded => {
                Self::BusinessRule(err.to_string())
            }
        }
    }
}
