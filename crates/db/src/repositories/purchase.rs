//! Purchase repository: purchase invoices and the supplier-side money
//! workflows built on them.
//!
//! Every workflow here is one database transaction. Purchases touch stock,
//! the supplier ledger and the invoice in one commit; payments and returns
//! post their ledger entry and run FIFO allocation in the same commit.

use chrono::Utc;
use mortar_core::allocation::{AllocationPlan, InvoiceStatus};
use mortar_core::ledger::EntryKind;
use mortar_core::payment::{self, PaymentError};
use mortar_core::stock::{MovementType, StockError};
use mortar_shared::error::AppError;
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tokio::sync::OwnedMutexGuard;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entities::{
    purchase_invoice_lines, purchase_invoices, supplier_payments, supplier_transactions,
};
use crate::repositories::allocation::{allocate_in, AllocationRepoError};
use crate::repositories::locks::EntityLocks;
use crate::repositories::sequence::{self, format_number, SequenceError, SequenceRepository};
use crate::repositories::stock::{
    find_active_material, record_movement_in, resolve_base_quantity, RecordMovementInput,
    StockRepoError,
};
use crate::repositories::supplier_ledger::{post_entry_in, PostSupplierEntry, SupplierLedgerError};

/// Error types for purchase workflows.
#[derive(Debug, thiserror::Error)]
pub enum PurchaseError {
    /// A purchase needs at least one line.
    #[error("Purchase must have at least one line")]
    EmptyPurchase,

    /// A line has a non-positive quantity or a negative price.
    #[error("Invalid purchase line for material {material_id}")]
    InvalidLine {
        /// Material of the offending line.
        material_id: Uuid,
    },

    /// Invoice not found.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(Uuid),

    /// Stock-side failure.
    #[error(transparent)]
    Stock(#[from] StockRepoError),

    /// Supplier-ledger failure.
    #[error(transparent)]
    Ledger(#[from] SupplierLedgerError),

    /// Allocation failure.
    #[error(transparent)]
    Allocation(#[from] AllocationRepoError),

    /// Payment or refund guard violation.
    #[error(transparent)]
    Guard(#[from] PaymentError),

    /// Sequence allocation failure.
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<PurchaseError> for AppError {
    fn from(err: PurchaseError) -> Self {
        match err {
            PurchaseError::EmptyPurchase | PurchaseError::InvalidLine { .. } => {
                Self::Validation(err.to_string())
            }
            PurchaseError::InvoiceNotFound(_) => Self::NotFound(err.to_string()),
            PurchaseError::Stock(inner) => inner.into(),
            PurchaseError::Ledger(inner) => inner.into(),
            PurchaseError::Allocation(inner) => inner.into(),
            PurchaseError::Guard(inner) => inner.into(),
            PurchaseError::Sequence(inner) => inner.into(),
            PurchaseError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// One line of a purchase or return.
#[derive(Debug, Clone)]
pub struct PurchaseLineInput {
    /// Material being purchased or returned.
    pub material_id: Uuid,
    /// Unit the quantity was entered in.
    pub unit_id: Uuid,
    /// Quantity in that unit.
    pub quantity: Decimal,
    /// Price per entered unit.
    pub unit_price: Decimal,
}

/// Input for creating a purchase.
#[derive(Debug, Clone)]
pub struct CreatePurchaseInput {
    /// Supplier invoicing the purchase.
    pub supplier_id: Uuid,
    /// Invoice lines.
    pub lines: Vec<PurchaseLineInput>,
    /// When payment falls due, if the supplier set a term.
    pub due_date: Option<DateTimeWithTimeZone>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Actor creating the purchase.
    pub created_by: Option<Uuid>,
}

/// Result of a purchase: the invoice and its lines.
#[derive(Debug, Clone)]
pub struct PurchaseOutcome {
    /// Created invoice, status `open`.
    pub invoice: purchase_invoices::Model,
    /// Created lines.
    pub lines: Vec<purchase_invoice_lines::Model>,
}

/// Result of a supplier payment.
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    /// Payment document.
    pub payment: supplier_payments::Model,
    /// Ledger credit entry.
    pub ledger_entry: supplier_transactions::Model,
    /// FIFO allocation of the cash amount.
    pub plan: AllocationPlan,
}

/// Result of a purchase return.
#[derive(Debug, Clone)]
pub struct ReturnOutcome {
    /// Total value credited back.
    pub total_value: Decimal,
    /// Ledger credit entry.
    pub ledger_entry: supplier_transactions::Model,
    /// FIFO allocation of the return value.
    pub plan: AllocationPlan,
}

/// Repository for purchase invoices and supplier money workflows.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    db: DatabaseConnection,
    locks: EntityLocks,
}

impl PurchaseRepository {
    /// Creates a new purchase repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, locks: EntityLocks) -> Self {
        Self { db, locks }
    }

    /// Creates a purchase: invoice + lines, one inbound stock movement per
    /// line, and one supplier debit entry, all in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any line is invalid, any material or unit cannot
    /// be resolved, or the database fails.
    #[instrument(skip(self, input), fields(supplier_id = %input.supplier_id))]
    pub async fn create_purchase(
        &self,
        input: CreatePurchaseInput,
    ) -> Result<PurchaseOutcome, PurchaseError> {
        if input.lines.is_empty() {
            return Err(PurchaseError::EmptyPurchase);
        }
        for line in &input.lines {
            if line.quantity <= Decimal::ZERO || line.unit_price < Decimal::ZERO {
                return Err(PurchaseError::InvalidLine {
                    material_id: line.material_id,
                });
            }
        }

        let _guards = self.acquire_locks(input.supplier_id, &input.lines).await;
        let txn = self.db.begin().await?;

        let seq = SequenceRepository::next_value_in(&txn, sequence::names::PURCHASE_INVOICE).await?;
        let invoice_number = format_number("PI", seq);
        let now = Utc::now().into();
        let invoice_id = Uuid::new_v4();

        // Resolve and price every line before writing anything.
        let mut resolved_lines = Vec::with_capacity(input.lines.len());
        let mut total_amount = Decimal::ZERO;
        for line in &input.lines {
            let material = find_active_material(&txn, line.material_id).await?;
            let base_quantity =
                resolve_base_quantity(&txn, &material, line.unit_id, line.quantity).await?;
            let line_total = line.quantity * line.unit_price;
            total_amount += line_total;
            resolved_lines.push((line.clone(), base_quantity, line_total));
        }

        let invoice = purchase_invoices::ActiveModel {
            id: Set(invoice_id),
            invoice_number: Set(invoice_number.clone()),
            supplier_id: Set(input.supplier_id),
            total_amount: Set(total_amount),
            paid_amount: Set(Decimal::ZERO),
            status: Set(InvoiceStatus::Open.as_str().to_string()),
            notes: Set(input.notes.clone()),
            created_by: Set(input.created_by),
            invoice_date: Set(now),
            due_date: Set(input.due_date),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let mut lines = Vec::with_capacity(resolved_lines.len());
        for (line, base_quantity, line_total) in &resolved_lines {
            let model = purchase_invoice_lines::ActiveModel {
                id: Set(Uuid::new_v4()),
                invoice_id: Set(invoice_id),
                material_id: Set(line.material_id),
                unit_id: Set(line.unit_id),
                quantity: Set(line.quantity),
                base_quantity: Set(*base_quantity),
                unit_price: Set(line.unit_price),
                line_total: Set(*line_total),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
            lines.push(model);

            record_movement_in(
                &txn,
                &RecordMovementInput {
                    material_id: line.material_id,
                    movement_type: MovementType::In,
                    quantity: line.quantity,
                    unit_id: line.unit_id,
                    unit_price: Some(line.unit_price),
                    project_id: None,
                    reference_type: Some("purchase-invoice".to_string()),
                    reference_id: Some(invoice_id),
                    notes: None,
                    created_by: input.created_by,
                },
            )
            .await?;
        }

        post_entry_in(
            &txn,
            &PostSupplierEntry {
                supplier_id: input.supplier_id,
                entry_kind: EntryKind::Purchase,
                debit: total_amount,
                credit: Decimal::ZERO,
                discount: None,
                reference_type: Some("purchase-invoice".to_string()),
                reference_id: Some(invoice_id),
                description: Some(format!("Purchase {invoice_number}")),
                created_by: input.created_by,
            },
        )
        .await?;

        txn.commit().await?;

        info!(%invoice_number, %total_amount, lines = lines.len(), "purchase created");
        Ok(PurchaseOutcome { invoice, lines })
    }

    /// Records a supplier payment: guard, payment document, ledger credit
    /// entry, FIFO allocation of the cash amount.
    ///
    /// # Errors
    ///
    /// Returns `NoBalanceDue`/`ExceedsBalance` guard violations before any
    /// write, or a database error.
    #[instrument(skip(self))]
    pub async fn record_payment(
        &self,
        supplier_id: Uuid,
        amount: Decimal,
        discount: Option<Decimal>,
        notes: Option<String>,
        created_by: Option<Uuid>,
    ) -> Result<PaymentOutcome, PurchaseError> {
        let _guard = self
            .locks
            .acquire(&EntityLocks::supplier_key(supplier_id))
            .await;
        let txn = self.db.begin().await?;

        let balance = crate::repositories::supplier_ledger::balance_in(&txn, supplier_id).await?;
        payment::validate_supplier_payment(amount, balance)?;

        let payment = insert_payment_document(
            &txn,
            supplier_id,
            "payment",
            amount,
            discount.unwrap_or(Decimal::ZERO),
            notes,
            created_by,
        )
        .await?;

        let ledger_entry = post_entry_in(
            &txn,
            &PostSupplierEntry {
                supplier_id,
                entry_kind: EntryKind::Payment,
                debit: Decimal::ZERO,
                credit: amount,
                discount,
                reference_type: Some("supplier-payment".to_string()),
                reference_id: Some(payment.id),
                description: Some(format!("Payment {}", payment.payment_number)),
                created_by,
            },
        )
        .await?;

        // Allocation spreads the cash amount; the discount only moves the
        // ledger balance.
        let plan = allocate_in(&txn, supplier_id, amount).await?;

        txn.commit().await?;

        info!(
            payment_number = %payment.payment_number,
            %amount,
            unapplied = %plan.unapplied,
            "supplier payment recorded"
        );
        Ok(PaymentOutcome {
            payment,
            ledger_entry,
            plan,
        })
    }

    /// Records a refund of a supplier overpayment: guard, refund document,
    /// ledger debit entry.
    ///
    /// # Errors
    ///
    /// Returns `NoRefundDue`/`RefundExceedsBalance` guard violations before
    /// any write, or a database error.
    #[instrument(skip(self))]
    pub async fn record_refund(
        &self,
        supplier_id: Uuid,
        amount: Decimal,
        notes: Option<String>,
        created_by: Option<Uuid>,
    ) -> Result<(supplier_payments::Model, supplier_transactions::Model), PurchaseError> {
        let _guard = self
            .locks
            .acquire(&EntityLocks::supplier_key(supplier_id))
            .await;
        let txn = self.db.begin().await?;

        let balance = crate::repositories::supplier_ledger::balance_in(&txn, supplier_id).await?;
        payment::validate_supplier_refund(amount, balance)?;

        let refund = insert_payment_document(
            &txn,
            supplier_id,
            "refund",
            amount,
            Decimal::ZERO,
            notes,
            created_by,
        )
        .await?;

        let ledger_entry = post_entry_in(
            &txn,
            &PostSupplierEntry {
                supplier_id,
                entry_kind: EntryKind::Refund,
                debit: amount,
                credit: Decimal::ZERO,
                discount: None,
                reference_type: Some("supplier-payment".to_string()),
                reference_id: Some(refund.id),
                description: Some(format!("Refund {}", refund.payment_number)),
                created_by,
            },
        )
        .await?;

        txn.commit().await?;

        info!(payment_number = %refund.payment_number, %amount, "supplier refund recorded");
        Ok((refund, ledger_entry))
    }

    /// Records a purchase return: per-line stock check and `ReturnOut`
    /// movement, supplier credit entry for the total value, FIFO allocation
    /// of that value against open invoices.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientStock` before any write if a line cannot be
    /// covered, or a database error.
    #[instrument(skip(self, lines), fields(supplier_id = %supplier_id))]
    pub async fn record_return(
        &self,
        supplier_id: Uuid,
        lines: Vec<PurchaseLineInput>,
        notes: Option<String>,
        created_by: Option<Uuid>,
    ) -> Result<ReturnOutcome, PurchaseError> {
        if lines.is_empty() {
            return Err(PurchaseError::EmptyPurchase);
        }
        for line in &lines {
            if line.quantity <= Decimal::ZERO || line.unit_price < Decimal::ZERO {
                return Err(PurchaseError::InvalidLine {
                    material_id: line.material_id,
                });
            }
        }

        let _guards = self.acquire_locks(supplier_id, &lines).await;
        let txn = self.db.begin().await?;

        // Verify every line against current stock before writing anything.
        let mut total_value = Decimal::ZERO;
        for line in &lines {
            let material = find_active_material(&txn, line.material_id).await?;
            let base_quantity =
                resolve_base_quantity(&txn, &material, line.unit_id, line.quantity).await?;
            if material.current_stock < base_quantity {
                return Err(StockRepoError::Stock(StockError::InsufficientStock {
                    requested: base_quantity,
                    available: material.current_stock,
                })
                .into());
            }
            total_value += line.quantity * line.unit_price;
        }

        let return_id = Uuid::new_v4();
        for line in &lines {
            record_movement_in(
                &txn,
                &RecordMovementInput {
                    material_id: line.material_id,
                    movement_type: MovementType::ReturnOut,
                    quantity: line.quantity,
                    unit_id: line.unit_id,
                    unit_price: Some(line.unit_price),
                    project_id: None,
                    reference_type: Some("purchase-return".to_string()),
                    reference_id: Some(return_id),
                    notes: notes.clone(),
                    created_by,
                },
            )
            .await?;
        }

        let ledger_entry = post_entry_in(
            &txn,
            &PostSupplierEntry {
                supplier_id,
                entry_kind: EntryKind::Return,
                debit: Decimal::ZERO,
                credit: total_value,
                discount: None,
                reference_type: Some("purchase-return".to_string()),
                reference_id: Some(return_id),
                description: None,
                created_by,
            },
        )
        .await?;

        let plan = allocate_in(&txn, supplier_id, total_value).await?;

        txn.commit().await?;

        info!(%total_value, lines = lines.len(), "purchase return recorded");
        Ok(ReturnOutcome {
            total_value,
            ledger_entry,
            plan,
        })
    }

    /// Finds an invoice by id.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceNotFound` or a database error.
    pub async fn find_invoice(
        &self,
        invoice_id: Uuid,
    ) -> Result<purchase_invoices::Model, PurchaseError> {
        purchase_invoices::Entity::find_by_id(invoice_id)
            .one(&self.db)
            .await?
            .ok_or(PurchaseError::InvoiceNotFound(invoice_id))
    }

    /// Lists a supplier's invoices, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a database error.
    pub async fn supplier_invoices(
        &self,
        supplier_id: Uuid,
    ) -> Result<Vec<purchase_invoices::Model>, PurchaseError> {
        let invoices = purchase_invoices::Entity::find()
            .filter(purchase_invoices::Column::SupplierId.eq(supplier_id))
            .order_by_asc(purchase_invoices::Column::InvoiceDate)
            .order_by_asc(purchase_invoices::Column::InvoiceNumber)
            .all(&self.db)
            .await?;
        Ok(invoices)
    }

    /// Acquires the supplier lock plus each touched material's lock, in a
    /// fixed order so concurrent workflows cannot deadlock.
    async fn acquire_locks(
        &self,
        supplier_id: Uuid,
        lines: &[PurchaseLineInput],
    ) -> Vec<OwnedMutexGuard<()>> {
        let mut guards = Vec::with_capacity(lines.len() + 1);
        guards.push(self.locks.acquire(&EntityLocks::supplier_key(supplier_id)).await);

        let mut material_ids: Vec<Uuid> = lines.iter().map(|l| l.material_id).collect();
        material_ids.sort_unstable();
        material_ids.dedup();
        for material_id in material_ids {
            guards.push(
                self.locks
                    .acquire(&EntityLocks::material_key(material_id))
                    .await,
            );
        }
        guards
    }
}

async fn insert_payment_document(
    txn: &DatabaseTransaction,
    supplier_id: Uuid,
    kind: &str,
    amount: Decimal,
    discount: Decimal,
    notes: Option<String>,
    created_by: Option<Uuid>,
) -> Result<supplier_payments::Model, PurchaseError> {
    let seq = SequenceRepository::next_value_in(txn, sequence::names::SUPPLIER_PAYMENT).await?;
    let now = Utc::now().into();

    let payment = supplier_payments::ActiveModel {
        id: Set(Uuid::new_v4()),
        payment_number: Set(format_number("SP", seq)),
        supplier_id: Set(supplier_id),
        kind: Set(kind.to_string()),
        amount: Set(amount),
        discount: Set(discount),
        notes: Set(notes),
        created_by: Set(created_by),
        payment_date: Set(now),
        created_at: Set(now),
    };

    Ok(payment.insert(txn).await?)
}
