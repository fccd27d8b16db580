//! Ledger entry validation and resolution.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// Classification of a ledger entry by the event that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A purchase invoice (supplier debit) or material issue (client debit).
    Purchase,
    /// A cash payment.
    Payment,
    /// A goods return.
    Return,
    /// A refund of an overpayment.
    Refund,
    /// An opening balance carried in from outside the system.
    Opening,
    /// A manual correction.
    Adjustment,
}

impl EntryKind {
    /// The storage string for this entry kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Payment => "payment",
            Self::Return => "return",
            Self::Refund => "refund",
            Self::Opening => "opening",
            Self::Adjustment => "adjustment",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "purchase" => Ok(Self::Purchase),
            "payment" => Ok(Self::Payment),
            "return" => Ok(Self::Return),
            "refund" => Ok(Self::Refund),
            "opening" => Ok(Self::Opening),
            "adjustment" => Ok(Self::Adjustment),
            _ => Err(format!("Unknown entry kind: {s}")),
        }
    }
}

/// A validated entry with the discount folded into the credit side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAmounts {
    /// Debit amount (≥ 0).
    pub debit: Decimal,
    /// Cash credit amount (≥ 0, before discount).
    pub credit: Decimal,
    /// Discount granted on top of the cash credit (≥ 0).
    pub discount: Decimal,
    /// Credit applied to the balance: `credit + discount`.
    pub effective_credit: Decimal,
}

/// Validates the debit/credit combination of an entry.
///
/// Exactly one of the two must be positive.
///
/// # Errors
///
/// Returns the specific violation (`NegativeDebit`, `NegativeCredit`,
/// `ZeroEntry`, `BothSidesPositive`).
pub fn validate_amounts(debit: Decimal, credit: Decimal) -> Result<(), LedgerError> {
    if debit < Decimal::ZERO {
        return Err(LedgerError::NegativeDebit);
    }
    if credit < Decimal::ZERO {
        return Err(LedgerError::NegativeCredit);
    }
    if debit.is_zero() && credit.is_zero() {
        return Err(LedgerError::ZeroEntry);
    }
    if debit > Decimal::ZERO && credit > Decimal::ZERO {
        return Err(LedgerError::BothSidesPositive);
    }
    Ok(())
}

/// Validates an entry and resolves its effective credit.
///
/// A discount on a payment increases the credit side (it reduces what the
/// company still owes) without being paid in cash. Discounts are only valid
/// on credit entries.
///
/// # Errors
///
/// Returns `LedgerError` for any amount violation.
pub fn resolve_entry(
    debit: Decimal,
    credit: Decimal,
    discount: Option<Decimal>,
) -> Result<ResolvedAmounts, LedgerError> {
    validate_amounts(debit, credit)?;

    let discount = discount.unwrap_or(Decimal::ZERO);
    if discount < Decimal::ZERO {
        return Err(LedgerError::NegativeDiscount);
    }
    if discount > Decimal::ZERO && debit > Decimal::ZERO {
        return Err(LedgerError::DiscountOnDebit);
    }

    Ok(ResolvedAmounts {
        debit,
        credit,
        discount,
        effective_credit: credit + discount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[rstest]
    #[case(dec!(100), dec!(0))]
    #[case(dec!(0), dec!(100))]
    #[case(dec!(0.01), dec!(0))]
    fn test_valid_amounts(#[case] debit: Decimal, #[case] credit: Decimal) {
        assert!(validate_amounts(debit, credit).is_ok());
    }

    #[rstest]
    #[case(dec!(-1), dec!(0), LedgerError::NegativeDebit)]
    #[case(dec!(0), dec!(-1), LedgerError::NegativeCredit)]
    #[case(dec!(0), dec!(0), LedgerError::ZeroEntry)]
    #[case(dec!(10), dec!(10), LedgerError::BothSidesPositive)]
    fn test_invalid_amounts(
        #[case] debit: Decimal,
        #[case] credit: Decimal,
        #[case] expected: LedgerError,
    ) {
        assert_eq!(validate_amounts(debit, credit).unwrap_err(), expected);
    }

    #[test]
    fn test_resolve_entry_without_discount() {
        let resolved = resolve_entry(dec!(0), dec!(400), None).unwrap();
        assert_eq!(resolved.effective_credit, dec!(400));
        assert_eq!(resolved.discount, dec!(0));
    }

    #[test]
    fn test_discount_increases_effective_credit() {
        // Paying 400 cash with a 50 discount settles 450 of debt.
        let resolved = resolve_entry(dec!(0), dec!(400), Some(dec!(50))).unwrap();
        assert_eq!(resolved.credit, dec!(400));
        assert_eq!(resolved.effective_credit, dec!(450));
    }

    #[test]
    fn test_discount_on_debit_rejected() {
        let err = resolve_entry(dec!(400), dec!(0), Some(dec!(50))).unwrap_err();
        assert_eq!(err, LedgerError::DiscountOnDebit);
    }

    #[test]
    fn test_negative_discount_rejected() {
        let err = resolve_entry(dec!(0), dec!(400), Some(dec!(-1))).unwrap_err();
        assert_eq!(err, LedgerError::NegativeDiscount);
    }

    #[test]
    fn test_entry_kind_roundtrip() {
        for kind in [
            EntryKind::Purchase,
            EntryKind::Payment,
            EntryKind::Return,
            EntryKind::Refund,
            EntryKind::Opening,
            EntryKind::Adjustment,
        ] {
            assert_eq!(EntryKind::from_str(kind.as_str()).unwrap(), kind);
        }
        assert!(EntryKind::from_str("gift").is_err());
    }
}
