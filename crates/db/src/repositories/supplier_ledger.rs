//! Supplier ledger repository.
//!
//! Append-only journal per supplier; a positive running balance means the
//! company owes the supplier.

use chrono::Utc;
use mortar_core::ledger::{self, EntryKind, LedgerError};
use mortar_shared::error::AppError;
use mortar_shared::types::{PageRequest, PageResponse};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entities::{supplier_transactions, suppliers};
use crate::repositories::locks::EntityLocks;
use crate::repositories::sequence::{self, SequenceError, SequenceRepository};

/// Error types for supplier ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum SupplierLedgerError {
    /// Supplier not found or inactive.
    #[error("Supplier not found: {0}")]
    SupplierNotFound(Uuid),

    /// Entry amount rule violation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Sequence allocation failure.
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<SupplierLedgerError> for AppError {
    fn from(err: SupplierLedgerError) -> Self {
        match err {
            SupplierLedgerError::SupplierNotFound(_) => Self::NotFound(err.to_string()),
            SupplierLedgerError::Ledger(inner) => inner.into(),
            SupplierLedgerError::Sequence(inner) => inner.into(),
            SupplierLedgerError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for posting a supplier ledger entry.
#[derive(Debug, Clone)]
pub struct PostSupplierEntry {
    /// Supplier the entry belongs to.
    pub supplier_id: Uuid,
    /// What produced the entry.
    pub entry_kind: EntryKind,
    /// Debit amount (company owes more).
    pub debit: Decimal,
    /// Credit amount (company owes less).
    pub credit: Decimal,
    /// Discount on top of a credit.
    pub discount: Option<Decimal>,
    /// Source document type.
    pub reference_type: Option<String>,
    /// Source document id.
    pub reference_id: Option<Uuid>,
    /// Free-form description.
    pub description: Option<String>,
    /// Actor posting the entry.
    pub created_by: Option<Uuid>,
}

/// Repository for the supplier ledger.
#[derive(Debug, Clone)]
pub struct SupplierLedgerRepository {
    db: DatabaseConnection,
    locks: EntityLocks,
}

impl SupplierLedgerRepository {
    /// Creates a new supplier ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, locks: EntityLocks) -> Self {
        Self { db, locks }
    }

    /// Posts one entry to a supplier's ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the supplier is missing, the amounts violate the
    /// entry rules, or the database fails.
    #[instrument(skip(self), fields(supplier_id = %input.supplier_id))]
    pub async fn post_entry(
        &self,
        input: PostSupplierEntry,
    ) -> Result<supplier_transactions::Model, SupplierLedgerError> {
        let _guard = self
            .locks
            .acquire(&EntityLocks::supplier_key(input.supplier_id))
            .await;

        let txn = self.db.begin().await?;
        let entry = post_entry_in(&txn, &input).await?;
        txn.commit().await?;

        info!(
            sequence = entry.sequence,
            entry_kind = %input.entry_kind,
            balance_after = %entry.balance_after,
            "supplier ledger entry posted"
        );
        Ok(entry)
    }

    /// Current supplier balance: the latest entry's running balance, or
    /// zero when the ledger is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn current_balance(&self, supplier_id: Uuid) -> Result<Decimal, SupplierLedgerError> {
        balance_in(&self.db, supplier_id).await
    }

    /// Paginated entry history, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn history(
        &self,
        supplier_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResponse<supplier_transactions::Model>, SupplierLedgerError> {
        let query = supplier_transactions::Entity::find()
            .filter(supplier_transactions::Column::SupplierId.eq(supplier_id))
            .order_by_desc(supplier_transactions::Column::TransactionDate)
            .order_by_desc(supplier_transactions::Column::Sequence);

        let total = query.clone().count(&self.db).await?;
        let items = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(items, page.page, page.per_page, total))
    }
}

/// Posts an entry on an existing connection.
///
/// Callers must hold the supplier's [`EntityLocks`] key and run inside a
/// transaction; the purchase and payment workflows use this directly.
pub(crate) async fn post_entry_in<C: ConnectionTrait>(
    conn: &C,
    input: &PostSupplierEntry,
) -> Result<supplier_transactions::Model, SupplierLedgerError> {
    suppliers::Entity::find_by_id(input.supplier_id)
        .filter(suppliers::Column::IsActive.eq(true))
        .one(conn)
        .await?
        .ok_or(SupplierLedgerError::SupplierNotFound(input.supplier_id))?;

    let resolved = ledger::resolve_entry(input.debit, input.credit, input.discount)?;
    let previous = balance_in(conn, input.supplier_id).await?;
    let balance_after = ledger::next_balance(previous, resolved.debit, resolved.effective_credit);

    let seq = SequenceRepository::next_value_in(conn, sequence::names::SUPPLIER_TRANSACTION).await?;
    let now = Utc::now().into();

    let entry = supplier_transactions::ActiveModel {
        id: Set(Uuid::new_v4()),
        sequence: Set(seq),
        supplier_id: Set(input.supplier_id),
        entry_kind: Set(input.entry_kind.as_str().to_string()),
        debit: Set(resolved.debit),
        credit: Set(resolved.credit),
        discount: Set(resolved.discount),
        balance_after: Set(balance_after),
        reference_type: Set(input.reference_type.clone()),
        reference_id: Set(input.reference_id),
        description: Set(input.description.clone()),
        created_by: Set(input.created_by),
        transaction_date: Set(now),
        created_at: Set(now),
    };

    Ok(entry.insert(conn).await?)
}

/// Latest running balance for a supplier on any connection.
pub(crate) async fn balance_in<C: ConnectionTrait>(
    conn: &C,
    supplier_id: Uuid,
) -> Result<Decimal, SupplierLedgerError> {
    let latest = supplier_transactions::Entity::find()
        .filter(supplier_transactions::Column::SupplierId.eq(supplier_id))
        .order_by_desc(supplier_transactions::Column::TransactionDate)
        .order_by_desc(supplier_transactions::Column::Sequence)
        .limit(1)
        .one(conn)
        .await?;

    Ok(latest.map_or(Decimal::ZERO, |entry| entry.balance_after))
}
