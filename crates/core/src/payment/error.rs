//! Payment guard error types.

use mortar_shared::error::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by payment and refund guards.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
    /// Payment amounts must be positive.
    #[error("Payment amount must be positive")]
    NonPositiveAmount,

    /// The supplier balance is zero or negative; there is nothing to pay.
    #[error("No outstanding balance to pay")]
    NoBalanceDue,

    /// The payment is larger than what the company owes.
    #[error("Payment of {amount} exceeds outstanding balance of {balance}")]
    ExceedsBalance {
        /// Requested payment amount.
        amount: Decimal,
        /// Current outstanding balance.
        balance: Decimal,
    },

    /// The supplier balance is not negative; there is nothing to refund.
    #[error("No overpayment to refund")]
    NoRefundDue,

    /// The refund is larger than the overpaid amount.
    #[error("Refund of {amount} exceeds overpayment of {overpaid}")]
    RefundExceedsBalance {
        /// Requested refund amount.
        amount: Decimal,
        /// Absolute overpaid amount.
        overpaid: Decimal,
    },

    /// Contract and additional parts must sum to a positive total.
    #[error("Payment split must have a positive total")]
    InvalidSplit,

    /// The contract part is larger than what remains on the contract.
    #[error("Contract payment of {amount} exceeds contract remaining of {remaining}")]
    ExceedsContract {
        /// Requested contract part.
        amount: Decimal,
        /// Contract amount minus total paid so far.
        remaining: Decimal,
    },

    /// While contract value is outstanding, a payment with an additional
    /// part must also carry a contract part.
    #[error("Contract balance must be paid before additional work")]
    ContractMustBePaidFirst,

    /// Additional part requested but the client ledger owes nothing.
    #[error("No additional-work balance to pay")]
    NoAdditionalBalance,

    /// The additional part is larger than the client ledger balance.
    #[error("Additional payment of {amount} exceeds ledger balance of {balance}")]
    ExceedsLedger {
        /// Requested additional part.
        amount: Decimal,
        /// Current client/project ledger balance.
        balance: Decimal,
    },
}

impl PaymentError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::NoBalanceDue => "NO_BALANCE_DUE",
            Self::ExceedsBalance { .. } => "EXCEEDS_BALANCE",
            Self::NoRefundDue => "NO_REFUND_DUE",
            Self::RefundExceedsBalance { .. } => "REFUND_EXCEEDS_BALANCE",
            Self::InvalidSplit => "INVALID_SPLIT",
            Self::ExceedsContract { .. } => "EXCEEDS_CONTRACT",
            Self::ContractMustBePaidFirst => "CONTRACT_MUST_BE_PAID_FIRST",
            Self::NoAdditionalBalance => "NO_ADDITIONAL_BALANCE",
            Self::ExceedsLedger { .. } => "EXCEEDS_LEDGER",
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match &err {
            PaymentError::NonPositiveAmount | PaymentError::InvalidSplit => {
                Self::Validation(err.to_string())
            }
            _ => Self::BusinessRule(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_app_error_mapping() {
        let guard = AppError::from(PaymentError::ExceedsBalance {
            amount: dec!(500),
            balance: dec!(300),
        });
        assert_eq!(guard.status_code(), 422);
        assert_eq!(guard.error_code(), "BUSINESS_RULE_VIOLATION");

        let validation = AppError::from(PaymentError::InvalidSplit);
        assert_eq!(validation.status_code(), 400);
    }
}
