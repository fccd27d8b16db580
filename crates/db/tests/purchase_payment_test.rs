//! Purchase, payment, refund and return workflow tests.

mod common;

use common::{seed_material, seed_supplier, seed_units, setup_db};
use mortar_core::allocation::InvoiceStatus;
use mortar_core::payment::PaymentError;
use mortar_core::stock::StockError;
use mortar_db::entities::{materials, stock_movements, supplier_transactions};
use mortar_db::repositories::purchase::{
    CreatePurchaseInput, PurchaseError, PurchaseLineInput, PurchaseRepository,
};
use mortar_db::repositories::stock::StockRepoError;
use mortar_db::repositories::{EntityLocks, SupplierLedgerRepository};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

struct Harness {
    db: DatabaseConnection,
    purchases: PurchaseRepository,
    ledger: SupplierLedgerRepository,
    supplier: Uuid,
    material: Uuid,
    kg: Uuid,
}

async fn harness(opening_stock: Decimal) -> Harness {
    let db = setup_db().await;
    let locks = EntityLocks::new();
    let (kg, sack) = seed_units(&db).await;
    let material = seed_material(&db, kg, sack, opening_stock).await;
    let supplier = seed_supplier(&db, "SUP-01").await;
    Harness {
        purchases: PurchaseRepository::new(db.clone(), locks.clone()),
        ledger: SupplierLedgerRepository::new(db.clone(), locks),
        db,
        supplier,
        material,
        kg,
    }
}

fn line(material_id: Uuid, unit_id: Uuid, quantity: Decimal, price: Decimal) -> PurchaseLineInput {
    PurchaseLineInput {
        material_id,
        unit_id,
        quantity,
        unit_price: price,
    }
}

async fn purchase_for(h: &Harness, quantity: Decimal, price: Decimal) -> Uuid {
    h.purchases
        .create_purchase(CreatePurchaseInput {
            supplier_id: h.supplier,
            lines: vec![line(h.material, h.kg, quantity, price)],
            due_date: None,
            notes: None,
            created_by: None,
        })
        .await
        .expect("create purchase")
        .invoice
        .id
}

#[tokio::test]
async fn test_purchase_creates_invoice_stock_and_debt() {
    let h = harness(dec!(0)).await;
    let due = chrono::Utc::now() + chrono::Duration::days(30);

    let outcome = h
        .purchases
        .create_purchase(CreatePurchaseInput {
            supplier_id: h.supplier,
            lines: vec![line(h.material, h.kg, dec!(100), dec!(10))],
            due_date: Some(due.into()),
            notes: None,
            created_by: None,
        })
        .await
        .expect("create purchase");

    assert_eq!(outcome.invoice.total_amount, dec!(1000));
    assert_eq!(outcome.invoice.paid_amount, dec!(0));
    assert_eq!(outcome.invoice.status, "open");
    assert_eq!(outcome.invoice.invoice_number, "PI-0001");
    assert_eq!(
        outcome.invoice.due_date.map(|d| d.timestamp()),
        Some(due.timestamp())
    );
    assert_eq!(outcome.lines.len(), 1);
    assert_eq!(outcome.lines[0].line_total, dec!(1000));

    // Stock went in.
    let stored = materials::Entity::find_by_id(h.material)
        .one(&h.db)
        .await
        .expect("query")
        .expect("material");
    assert_eq!(stored.current_stock, dec!(100));
    assert_eq!(stored.last_purchase_price, Some(dec!(10)));

    // Supplier now carries the debt.
    assert_eq!(
        h.ledger.current_balance(h.supplier).await.expect("balance"),
        dec!(1000)
    );
}

#[tokio::test]
async fn test_payments_walk_invoice_to_paid() {
    let h = harness(dec!(0)).await;
    let invoice_id = purchase_for(&h, dec!(100), dec!(10)).await;

    // Pay 400: invoice partial, 600 outstanding.
    let first = h
        .purchases
        .record_payment(h.supplier, dec!(400), None, None, None)
        .await
        .expect("first payment");
    assert_eq!(first.plan.applied_total(), dec!(400));
    assert_eq!(first.plan.unapplied, dec!(0));
    assert_eq!(
        first.plan.applications[0].new_status,
        InvoiceStatus::Partial
    );

    let invoice = h.purchases.find_invoice(invoice_id).await.expect("invoice");
    assert_eq!(invoice.paid_amount, dec!(400));
    assert_eq!(invoice.status, "partial");
    assert_eq!(
        h.ledger.current_balance(h.supplier).await.expect("balance"),
        dec!(600)
    );

    // Pay the remaining 600: invoice paid, balance zero.
    let second = h
        .purchases
        .record_payment(h.supplier, dec!(600), None, None, None)
        .await
        .expect("second payment");
    assert_eq!(second.plan.applications[0].new_status, InvoiceStatus::Paid);

    let invoice = h.purchases.find_invoice(invoice_id).await.expect("invoice");
    assert_eq!(invoice.paid_amount, dec!(1000));
    assert_eq!(invoice.status, "paid");
    assert_eq!(
        h.ledger.current_balance(h.supplier).await.expect("balance"),
        dec!(0)
    );
}

#[tokio::test]
async fn test_payment_guards() {
    let h = harness(dec!(0)).await;

    // Nothing owed yet.
    let err = h
        .purchases
        .record_payment(h.supplier, dec!(100), None, None, None)
        .await
        .expect_err("no balance");
    assert!(matches!(err, PurchaseError::Guard(PaymentError::NoBalanceDue)));

    purchase_for(&h, dec!(100), dec!(10)).await;

    let err = h
        .purchases
        .record_payment(h.supplier, dec!(1001), None, None, None)
        .await
        .expect_err("exceeds");
    assert!(matches!(
        err,
        PurchaseError::Guard(PaymentError::ExceedsBalance { .. })
    ));
}

#[tokio::test]
async fn test_refund_requires_overpayment() {
    let h = harness(dec!(0)).await;
    purchase_for(&h, dec!(50), dec!(10)).await;

    // Balance is +500: a refund makes no sense.
    let err = h
        .purchases
        .record_refund(h.supplier, dec!(100), None, None)
        .await
        .expect_err("no refund due");
    assert!(matches!(err, PurchaseError::Guard(PaymentError::NoRefundDue)));
}

#[tokio::test]
async fn test_fifo_allocation_across_invoices() {
    let h = harness(dec!(0)).await;
    let first = purchase_for(&h, dec!(30), dec!(10)).await; // 300
    let second = purchase_for(&h, dec!(50), dec!(10)).await; // 500

    let outcome = h
        .purchases
        .record_payment(h.supplier, dec!(450), None, None, None)
        .await
        .expect("payment");

    // Oldest invoice settles in full, the newer one takes the rest.
    assert_eq!(outcome.plan.applications.len(), 2);
    assert_eq!(outcome.plan.applications[0].applied, dec!(300));
    assert_eq!(outcome.plan.applications[1].applied, dec!(150));

    let first = h.purchases.find_invoice(first).await.expect("invoice");
    assert_eq!(first.status, "paid");
    let second = h.purchases.find_invoice(second).await.expect("invoice");
    assert_eq!(second.status, "partial");
    assert_eq!(second.paid_amount, dec!(150));
}

#[tokio::test]
async fn test_return_credits_and_reduces_stock() {
    let h = harness(dec!(0)).await;
    let invoice_id = purchase_for(&h, dec!(100), dec!(10)).await;

    let outcome = h
        .purchases
        .record_return(
            h.supplier,
            vec![line(h.material, h.kg, dec!(20), dec!(10))],
            None,
            None,
        )
        .await
        .expect("return");

    assert_eq!(outcome.total_value, dec!(200));
    // The credit was allocated against the open invoice.
    assert_eq!(outcome.plan.applied_total(), dec!(200));
    let invoice = h.purchases.find_invoice(invoice_id).await.expect("invoice");
    assert_eq!(invoice.paid_amount, dec!(200));

    let stored = materials::Entity::find_by_id(h.material)
        .one(&h.db)
        .await
        .expect("query")
        .expect("material");
    assert_eq!(stored.current_stock, dec!(80));

    let return_moves = stock_movements::Entity::find()
        .filter(stock_movements::Column::MovementType.eq("RETURN_OUT"))
        .all(&h.db)
        .await
        .expect("query");
    assert_eq!(return_moves.len(), 1);

    // Debt shrank by the return value.
    assert_eq!(
        h.ledger.current_balance(h.supplier).await.expect("balance"),
        dec!(800)
    );
}

#[tokio::test]
async fn test_return_with_insufficient_stock_writes_nothing() {
    let h = harness(dec!(0)).await;
    purchase_for(&h, dec!(10), dec!(10)).await;

    let err = h
        .purchases
        .record_return(
            h.supplier,
            vec![line(h.material, h.kg, dec!(11), dec!(10))],
            None,
            None,
        )
        .await
        .expect_err("insufficient");
    assert!(matches!(
        err,
        PurchaseError::Stock(StockRepoError::Stock(StockError::InsufficientStock { .. }))
    ));

    // Ledger untouched beyond the purchase debit.
    let entries = supplier_transactions::Entity::find()
        .all(&h.db)
        .await
        .expect("query");
    assert_eq!(entries.len(), 1);
    assert_eq!(
        h.ledger.current_balance(h.supplier).await.expect("balance"),
        dec!(100)
    );
}

#[tokio::test]
async fn test_empty_purchase_rejected() {
    let h = harness(dec!(0)).await;
    let err = h
        .purchases
        .create_purchase(CreatePurchaseInput {
            supplier_id: h.supplier,
            lines: vec![],
            due_date: None,
            notes: None,
            created_by: None,
        })
        .await
        .expect_err("empty");
    assert!(matches!(err, PurchaseError::EmptyPurchase));
}
