//! FIFO allocation walk.

use mortar_shared::types::InvoiceId;
use rust_decimal::Decimal;

use super::error::AllocationError;
use super::status::InvoiceStatus;

/// A snapshot of an invoice that can still absorb payment.
///
/// Candidates must be supplied oldest-first (by invoice date, then by
/// invoice number); the walk itself never re-sorts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenInvoice {
    /// Invoice identifier.
    pub id: InvoiceId,
    /// Business number, carried for error messages and audit trails.
    pub invoice_number: String,
    /// Invoice grand total.
    pub total_amount: Decimal,
    /// Amount already settled against this invoice.
    pub paid_amount: Decimal,
}

impl OpenInvoice {
    /// How much this invoice can still absorb.
    #[must_use]
    pub fn remaining(&self) -> Decimal {
        self.total_amount - self.paid_amount
    }
}

/// One invoice's share of an allocated payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    /// Invoice the amount was applied to.
    pub invoice_id: InvoiceId,
    /// Business number of that invoice.
    pub invoice_number: String,
    /// Amount applied by this allocation.
    pub applied: Decimal,
    /// `paid_amount` after applying.
    pub new_paid_amount: Decimal,
    /// Status derived from the new paid amount.
    pub new_status: InvoiceStatus,
}

/// The outcome of allocating one payment across open invoices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationPlan {
    /// Per-invoice applications, in the order they were settled.
    pub applications: Vec<Application>,
    /// Remainder the invoices could not absorb.
    pub unapplied: Decimal,
}

impl AllocationPlan {
    /// Total amount the plan applies to invoices.
    #[must_use]
    pub fn applied_total(&self) -> Decimal {
        self.applications
            .iter()
            .map(|a| a.applied)
            .sum()
    }
}

/// Spreads `amount` across `invoices` oldest-first.
///
/// Each invoice absorbs `min(remaining, amount left)`. Invoices that are
/// already fully paid are skipped. The walk stops early once the amount is
/// exhausted; any surplus comes back as [`AllocationPlan::unapplied`].
///
/// # Errors
///
/// Returns `NonPositiveAmount` for a zero or negative amount, and
/// `InconsistentInvoice` if a candidate has negative amounts or
/// `paid_amount > total_amount`.
pub fn allocate(
    amount: Decimal,
    invoices: &[OpenInvoice],
) -> Result<AllocationPlan, AllocationError> {
    if amount <= Decimal::ZERO {
        return Err(AllocationError::NonPositiveAmount);
    }

    let mut remaining = amount;
    let mut applications = Vec::new();

    for invoice in invoices {
        if invoice.total_amount < Decimal::ZERO
            || invoice.paid_amount < Decimal::ZERO
            || invoice.paid_amount > invoice.total_amount
        {
            return Err(AllocationError::InconsistentInvoice {
                invoice_number: invoice.invoice_number.clone(),
            });
        }

        if remaining.is_zero() {
            break;
        }

        let open = invoice.remaining();
        if open.is_zero() {
            continue;
        }

        let applied = open.min(remaining);
        let new_paid = invoice.paid_amount + applied;
        applications.push(Application {
            invoice_id: invoice.id,
            invoice_number: invoice.invoice_number.clone(),
            applied,
            new_paid_amount: new_paid,
            new_status: InvoiceStatus::derive(invoice.total_amount, new_paid),
        });
        remaining -= applied;
    }

    Ok(AllocationPlan {
        applications,
        unapplied: remaining,
    })
}
