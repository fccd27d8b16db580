//! Property-based tests for the FIFO allocation walk.

use mortar_shared::types::InvoiceId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::plan::{allocate, OpenInvoice};
use super::status::InvoiceStatus;

fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn open_invoice() -> impl Strategy<Value = OpenInvoice> {
    (1i64..=100_000_00, 0i64..=100_000_00).prop_map(|(total, paid)| {
        let paid = paid.min(total);
        OpenInvoice {
            id: InvoiceId::new(),
            invoice_number: "PI-PROP".to_string(),
            total_amount: money(total),
            paid_amount: money(paid),
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Conservation: applied total plus unapplied remainder equals the
    /// payment amount, always.
    #[test]
    fn prop_amount_is_conserved(
        amount in 1i64..=500_000_00,
        invoices in proptest::collection::vec(open_invoice(), 0..12),
    ) {
        let amount = money(amount);
        let plan = allocate(amount, &invoices).unwrap();
        prop_assert_eq!(plan.applied_total() + plan.unapplied, amount);
        prop_assert!(plan.unapplied >= Decimal::ZERO);
    }

    /// No invoice is ever pushed past its total, and every application is
    /// strictly positive.
    #[test]
    fn prop_no_invoice_overfilled(
        amount in 1i64..=500_000_00,
        invoices in proptest::collection::vec(open_invoice(), 1..12),
    ) {
        let plan = allocate(money(amount), &invoices).unwrap();
        for (application, invoice) in plan.applications.iter().zip(
            invoices.iter().filter(|i| !i.remaining().is_zero()),
        ) {
            prop_assert!(application.applied > Decimal::ZERO);
            prop_assert!(application.new_paid_amount <= invoice.total_amount);
        }
    }

    /// FIFO order: every application except the last settles its invoice in
    /// full. Only the final application may leave an invoice partial.
    #[test]
    fn prop_only_last_application_may_be_partial(
        amount in 1i64..=500_000_00,
        invoices in proptest::collection::vec(open_invoice(), 1..12),
    ) {
        let plan = allocate(money(amount), &invoices).unwrap();
        if let Some((_last, rest)) = plan.applications.split_last() {
            for application in rest {
                prop_assert_eq!(application.new_status, InvoiceStatus::Paid);
            }
        }
    }
}
