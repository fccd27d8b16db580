//! Allocation repository: applies payment and return credit to open
//! purchase invoices, oldest first.

use chrono::Utc;
use mortar_core::allocation::{self, AllocationError, AllocationPlan, InvoiceStatus, OpenInvoice};
use mortar_shared::error::AppError;
use mortar_shared::types::InvoiceId;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entities::purchase_invoices;
use crate::repositories::locks::EntityLocks;

/// Error types for allocation operations.
#[derive(Debug, thiserror::Error)]
pub enum AllocationRepoError {
    /// Allocation plan failure.
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AllocationRepoError> for AppError {
    fn from(err: AllocationRepoError) -> Self {
        match err {
            AllocationRepoError::Allocation(inner) => inner.into(),
            AllocationRepoError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Repository for FIFO invoice allocation.
#[derive(Debug, Clone)]
pub struct AllocationRepository {
    db: DatabaseConnection,
    locks: EntityLocks,
}

impl AllocationRepository {
    /// Creates a new allocation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, locks: EntityLocks) -> Self {
        Self { db, locks }
    }

    /// Allocates an amount across a supplier's open invoices.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is invalid or the database fails.
    #[instrument(skip(self))]
    pub async fn allocate_to_supplier_invoices(
        &self,
        supplier_id: Uuid,
        amount: Decimal,
    ) -> Result<AllocationPlan, AllocationRepoError> {
        let _guard = self
            .locks
            .acquire(&EntityLocks::supplier_key(supplier_id))
            .await;

        let txn = self.db.begin().await?;
        let plan = allocate_in(&txn, supplier_id, amount).await?;
        txn.commit().await?;

        info!(
            applied = %plan.applied_total(),
            unapplied = %plan.unapplied,
            invoices = plan.applications.len(),
            "payment allocated to supplier invoices"
        );
        Ok(plan)
    }
}

/// Runs the FIFO allocation on an existing connection and writes the
/// results back to the touched invoices. Callers hold the supplier lock.
pub(crate) async fn allocate_in<C: ConnectionTrait>(
    conn: &C,
    supplier_id: Uuid,
    amount: Decimal,
) -> Result<AllocationPlan, AllocationRepoError> {
    // Open and partial invoices, oldest first; ties break on invoice number
    // so the order is deterministic.
    let candidates = purchase_invoices::Entity::find()
        .filter(purchase_invoices::Column::SupplierId.eq(supplier_id))
        .filter(purchase_invoices::Column::Status.is_in([
            InvoiceStatus::Open.as_str(),
            InvoiceStatus::Partial.as_str(),
        ]))
        .order_by_asc(purchase_invoices::Column::InvoiceDate)
        .order_by_asc(purchase_invoices::Column::InvoiceNumber)
        .all(conn)
        .await?;

    let open: Vec<OpenInvoice> = candidates
        .iter()
        .map(|invoice| OpenInvoice {
            id: InvoiceId::from_uuid(invoice.id),
            invoice_number: invoice.invoice_number.clone(),
            total_amount: invoice.total_amount,
            paid_amount: invoice.paid_amount,
        })
        .collect();

    let plan = allocation::allocate(amount, &open)?;

    let now = Utc::now().into();
    for application in &plan.applications {
        let invoice = candidates
            .iter()
            .find(|i| i.id == application.invoice_id.into_inner())
            .cloned();
        if let Some(invoice) = invoice {
            let mut active: purchase_invoices::ActiveModel = invoice.into();
            active.paid_amount = Set(application.new_paid_amount);
            active.status = Set(application.new_status.as_str().to_string());
            active.updated_at = Set(now);
            active.update(conn).await?;
        }
    }

    Ok(plan)
}
