//! Party ledger error types.

use mortar_shared::error::AppError;
use thiserror::Error;

/// Errors that can occur while posting ledger entries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Debit amounts cannot be negative.
    #[error("Debit amount cannot be negative")]
    NegativeDebit,

    /// Credit amounts cannot be negative.
    #[error("Credit amount cannot be negative")]
    NegativeCredit,

    /// An entry must move exactly one side of the journal.
    #[error("Entry must have either a debit or a credit amount")]
    ZeroEntry,

    /// Debit and credit cannot both be positive on one entry.
    #[error("Entry cannot have both debit and credit amounts")]
    BothSidesPositive,

    /// Discount amounts cannot be negative.
    #[error("Discount amount cannot be negative")]
    NegativeDiscount,

    /// A discount only makes sense on the credit side of the journal.
    #[error("Discount is not applicable to a debit entry")]
    DiscountOnDebit,
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeDebit => "NEGATIVE_DEBIT",
            Self::NegativeCredit => "NEGATIVE_CREDIT",
            Self::ZeroEntry => "INVALID_ENTRY",
            Self::BothSidesPositive => "INVALID_ENTRY",
            Self::NegativeDiscount => "NEGATIVE_DISCOUNT",
            Self::DiscountOnDebit => "DISCOUNT_ON_DEBIT",
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        Self::Validation(err.to_string())
    }
}
