//! Supplier ledger posting and balance tests.

mod common;

use common::{seed_supplier, setup_db};
use mortar_core::ledger::{EntryKind, LedgerError};
use mortar_db::repositories::supplier_ledger::{
    PostSupplierEntry, SupplierLedgerError, SupplierLedgerRepository,
};
use mortar_db::repositories::EntityLocks;
use mortar_shared::types::PageRequest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn debit(supplier_id: Uuid, amount: Decimal) -> PostSupplierEntry {
    PostSupplierEntry {
        supplier_id,
        entry_kind: EntryKind::Purchase,
        debit: amount,
        credit: Decimal::ZERO,
        discount: None,
        reference_type: None,
        reference_id: None,
        description: None,
        created_by: None,
    }
}

fn credit(supplier_id: Uuid, amount: Decimal, discount: Option<Decimal>) -> PostSupplierEntry {
    PostSupplierEntry {
        supplier_id,
        entry_kind: EntryKind::Payment,
        debit: Decimal::ZERO,
        credit: amount,
        discount,
        reference_type: None,
        reference_id: None,
        description: None,
        created_by: None,
    }
}

#[tokio::test]
async fn test_running_balance_accumulates() {
    let db = setup_db().await;
    let supplier = seed_supplier(&db, "SUP-01").await;
    let repo = SupplierLedgerRepository::new(db.clone(), EntityLocks::new());

    let first = repo.post_entry(debit(supplier, dec!(1000))).await.expect("debit");
    assert_eq!(first.balance_after, dec!(1000));

    let second = repo.post_entry(credit(supplier, dec!(400), None)).await.expect("credit");
    assert_eq!(second.balance_after, dec!(600));

    assert_eq!(
        repo.current_balance(supplier).await.expect("balance"),
        dec!(600)
    );
}

#[tokio::test]
async fn test_discount_extends_credit() {
    let db = setup_db().await;
    let supplier = seed_supplier(&db, "SUP-02").await;
    let repo = SupplierLedgerRepository::new(db.clone(), EntityLocks::new());

    repo.post_entry(debit(supplier, dec!(1000))).await.expect("debit");
    // 400 cash with 50 discount settles 450.
    let entry = repo
        .post_entry(credit(supplier, dec!(400), Some(dec!(50))))
        .await
        .expect("credit");
    assert_eq!(entry.credit, dec!(400));
    assert_eq!(entry.discount, dec!(50));
    assert_eq!(entry.balance_after, dec!(550));
}

#[tokio::test]
async fn test_invalid_entries_rejected() {
    let db = setup_db().await;
    let supplier = seed_supplier(&db, "SUP-03").await;
    let repo = SupplierLedgerRepository::new(db.clone(), EntityLocks::new());

    let mut both = debit(supplier, dec!(10));
    both.credit = dec!(10);
    let err = repo.post_entry(both).await.expect_err("both sides");
    assert!(matches!(
        err,
        SupplierLedgerError::Ledger(LedgerError::BothSidesPositive)
    ));

    let err = repo
        .post_entry(debit(supplier, Decimal::ZERO))
        .await
        .expect_err("zero entry");
    assert!(matches!(
        err,
        SupplierLedgerError::Ledger(LedgerError::ZeroEntry)
    ));
}

#[tokio::test]
async fn test_unknown_supplier_rejected() {
    let db = setup_db().await;
    let repo = SupplierLedgerRepository::new(db.clone(), EntityLocks::new());

    let err = repo
        .post_entry(debit(Uuid::new_v4(), dec!(100)))
        .await
        .expect_err("unknown supplier");
    assert!(matches!(err, SupplierLedgerError::SupplierNotFound(_)));
}

#[tokio::test]
async fn test_history_paginates_newest_first() {
    let db = setup_db().await;
    let supplier = seed_supplier(&db, "SUP-04").await;
    let repo = SupplierLedgerRepository::new(db.clone(), EntityLocks::new());

    for i in 1..=5 {
        repo.post_entry(debit(supplier, Decimal::from(i * 100)))
            .await
            .expect("debit");
    }

    let page = repo
        .history(supplier, PageRequest { page: 1, per_page: 2 })
        .await
        .expect("history");
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.meta.total, 5);
    assert_eq!(page.meta.total_pages, 3);
    // Newest first: the last debit (500) heads the page.
    assert_eq!(page.data[0].debit, dec!(500));
}
