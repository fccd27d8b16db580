//! Supplier payment and refund guards.

use rust_decimal::Decimal;

use super::error::PaymentError;

/// Validates a supplier payment against the current ledger balance.
///
/// A positive balance means the company owes the supplier; a payment may
/// never exceed it.
///
/// # Errors
///
/// `NonPositiveAmount`, `NoBalanceDue` when nothing is owed,
/// `ExceedsBalance` when the amount overshoots.
pub fn validate_supplier_payment(amount: Decimal, balance: Decimal) -> Result<(), PaymentError> {
    if amount <= Decimal::ZERO {
        return Err(PaymentError::NonPositiveAmount);
    }
    if balance <= Decimal::ZERO {
        return Err(PaymentError::NoBalanceDue);
    }
    if amount > balance {
        return Err(PaymentError::ExceedsBalance { amount, balance });
    }
    Ok(())
}

/// Validates a supplier refund against the current ledger balance.
///
/// A refund only makes sense when the balance is negative (the supplier
/// owes the company back), and may never exceed the overpaid amount.
///
/// # Errors
///
/// `NonPositiveAmount`, `NoRefundDue` when the balance is not negative,
/// `RefundExceedsBalance` when the amount overshoots the overpayment.
pub fn validate_supplier_refund(amount: Decimal, balance: Decimal) -> Result<(), PaymentError> {
    if amount <= Decimal::ZERO {
        return Err(PaymentError::NonPositiveAmount);
    }
    if balance >= Decimal::ZERO {
        return Err(PaymentError::NoRefundDue);
    }
    let overpaid = -balance;
    if amount > overpaid {
        return Err(PaymentError::RefundExceedsBalance { amount, overpaid });
    }
    Ok(())
}
