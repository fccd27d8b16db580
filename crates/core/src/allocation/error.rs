//! Allocation error types.

use mortar_shared::error::AppError;
use thiserror::Error;

/// Errors that can occur while building an allocation plan.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllocationError {
    /// Allocation amounts must be positive.
    #[error("Allocation amount must be positive")]
    NonPositiveAmount,

    /// An invoice in the candidate list has paid > total or negative amounts.
    #[error("Invoice {invoice_number} has inconsistent amounts")]
    InconsistentInvoice {
        /// Business number of the offending invoice.
        invoice_number: String,
    },
}

impl AllocationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::InconsistentInvoice { .. } => "INCONSISTENT_INVOICE",
        }
    }
}

impl From<AllocationError> for AppError {
    fn from(err: AllocationError) -> Self {
        match &err {
            AllocationError::NonPositiveAmount => Self::Validation(err.to_string()),
            AllocationError::InconsistentInvoice { .. } => Self::BusinessRule(err.to_string()),
        }
    }
}
