//! Client payment split validation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::PaymentError;

/// A client payment split into its contract and additional-work parts.
///
/// Produced only by [`validate_client_split`]; holding one means the split
/// passed every guard against the snapshot it was validated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSplit {
    /// Part applied against the project contract value.
    pub contract_amount: Decimal,
    /// Part applied against additional work billed through the ledger.
    pub additional_amount: Decimal,
}

impl PaymentSplit {
    /// Total cash received.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.contract_amount + self.additional_amount
    }
}

/// Validates a client payment split.
///
/// `contract_remaining` is the project's contract amount minus what has
/// been paid against the contract so far; `ledger_balance` is the current
/// (client, project) ledger balance covering additional work.
///
/// Rules, checked in order:
/// - both parts ≥ 0 and total > 0;
/// - the contract part never exceeds `contract_remaining`;
/// - while contract value remains, a payment carrying an additional part
///   must also carry a nonzero contract part;
/// - the additional part requires a positive ledger balance and never
///   exceeds it.
///
/// # Errors
///
/// Returns the first violated rule as a [`PaymentError`].
pub fn validate_client_split(
    contract_amount: Decimal,
    additional_amount: Decimal,
    contract_remaining: Decimal,
    ledger_balance: Decimal,
) -> Result<PaymentSplit, PaymentError> {
    if contract_amount < Decimal::ZERO || additional_amount < Decimal::ZERO {
        return Err(PaymentError::InvalidSplit);
    }
    let split = PaymentSplit {
        contract_amount,
        additional_amount,
    };
    if split.total() <= Decimal::ZERO {
        return Err(PaymentError::InvalidSplit);
    }

    if contract_amount > contract_remaining {
        return Err(PaymentError::ExceedsContract {
            amount: contract_amount,
            remaining: contract_remaining,
        });
    }

    if additional_amount > Decimal::ZERO {
        if contract_amount.is_zero() && contract_remaining > Decimal::ZERO {
            return Err(PaymentError::ContractMustBePaidFirst);
        }
        if ledger_balance <= Decimal::ZERO {
            return Err(PaymentError::NoAdditionalBalance);
        }
        if additional_amount > ledger_balance {
            return Err(PaymentError::ExceedsLedger {
                amount: additional_amount,
                balance: ledger_balance,
            });
        }
    }

    Ok(split)
}
