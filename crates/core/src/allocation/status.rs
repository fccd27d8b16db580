//! Derived invoice payment status.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment status of a purchase invoice, derived from its amounts.
///
/// Status is never stored as an independent fact; it is always recomputed
/// from `paid_amount` vs `total_amount` so the two cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Nothing paid yet.
    Open,
    /// Partially paid.
    Partial,
    /// Fully paid.
    Paid,
}

impl InvoiceStatus {
    /// Derives the status from the invoice amounts.
    #[must_use]
    pub fn derive(total_amount: Decimal, paid_amount: Decimal) -> Self {
        if paid_amount >= total_amount {
            Self::Paid
        } else if paid_amount > Decimal::ZERO {
            Self::Partial
        } else {
            Self::Open
        }
    }

    /// The storage string for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Partial => "partial",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "partial" => Ok(Self::Partial),
            "paid" => Ok(Self::Paid),
            _ => Err(format!("Unknown invoice status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_derive_status() {
        assert_eq!(InvoiceStatus::derive(dec!(1000), dec!(0)), InvoiceStatus::Open);
        assert_eq!(InvoiceStatus::derive(dec!(1000), dec!(400)), InvoiceStatus::Partial);
        assert_eq!(InvoiceStatus::derive(dec!(1000), dec!(1000)), InvoiceStatus::Paid);
    }

    #[test]
    fn test_zero_total_invoice_is_paid() {
        assert_eq!(InvoiceStatus::derive(dec!(0), dec!(0)), InvoiceStatus::Paid);
    }
}
