//! Client payment repository.
//!
//! A client payment is split into a contract part (tracked on the project)
//! and an additional-work part (tracked on the client ledger). One credit
//! entry for the full total lands in the (client, project) ledger scope.

use chrono::Utc;
use mortar_core::ledger::EntryKind;
use mortar_core::payment::{self, PaymentError, PaymentSplit};
use mortar_shared::error::AppError;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entities::{client_payments, client_transactions, projects};
use crate::repositories::client_ledger::{self, ClientLedgerError, PostClientEntry};
use crate::repositories::locks::EntityLocks;
use crate::repositories::sequence::{self, format_number, SequenceError, SequenceRepository};

/// Error types for client payment workflows.
#[derive(Debug, thiserror::Error)]
pub enum ClientPaymentError {
    /// Project not found, inactive, or not owned by the client.
    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    /// Split guard violation.
    #[error(transparent)]
    Guard(#[from] PaymentError),

    /// Client-ledger failure.
    #[error(transparent)]
    Ledger(#[from] ClientLedgerError),

    /// Sequence allocation failure.
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ClientPaymentError> for AppError {
    fn from(err: ClientPaymentError) -> Self {
        match err {
            ClientPaymentError::ProjectNotFound(_) => Self::NotFound(err.to_string()),
            ClientPaymentError::Guard(inner) => inner.into(),
            ClientPaymentError::Ledger(inner) => inner.into(),
            ClientPaymentError::Sequence(inner) => inner.into(),
            ClientPaymentError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Result of a client payment.
#[derive(Debug, Clone)]
pub struct ClientPaymentOutcome {
    /// Payment document.
    pub payment: client_payments::Model,
    /// Ledger credit entry for the full total.
    pub ledger_entry: client_transactions::Model,
    /// The validated split.
    pub split: PaymentSplit,
}

/// Repository for client payments.
#[derive(Debug, Clone)]
pub struct ClientPaymentRepository {
    db: DatabaseConnection,
    locks: EntityLocks,
}

impl ClientPaymentRepository {
    /// Creates a new client payment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, locks: EntityLocks) -> Self {
        Self { db, locks }
    }

    /// Records a client payment.
    ///
    /// Validates the split against the project's contract remainder and the
    /// (client, project) ledger balance, inserts the payment document,
    /// bumps the project's `total_paid` by the contract part only, and
    /// posts one ledger credit entry for the full total. One transaction.
    ///
    /// # Errors
    ///
    /// Returns a split guard violation before any write, or a database
    /// error.
    #[instrument(skip(self))]
    pub async fn record_payment(
        &self,
        client_id: Uuid,
        project_id: Uuid,
        contract_amount: Decimal,
        additional_amount: Decimal,
        notes: Option<String>,
        created_by: Option<Uuid>,
    ) -> Result<ClientPaymentOutcome, ClientPaymentError> {
        let _guard = self
            .locks
            .acquire(&EntityLocks::client_project_key(client_id, project_id))
            .await;
        let txn = self.db.begin().await?;

        let project = projects::Entity::find_by_id(project_id)
            .filter(projects::Column::ClientId.eq(client_id))
            .filter(projects::Column::IsActive.eq(true))
            .one(&txn)
            .await?
            .ok_or(ClientPaymentError::ProjectNotFound(project_id))?;

        let contract_remaining = project.contract_amount - project.total_paid;
        let ledger_balance = client_ledger::balance_in(&txn, client_id, project_id).await?;

        let split = payment::validate_client_split(
            contract_amount,
            additional_amount,
            contract_remaining,
            ledger_balance,
        )?;

        let seq = SequenceRepository::next_value_in(&txn, sequence::names::CLIENT_PAYMENT).await?;
        let now = Utc::now().into();
        let payment_id = Uuid::new_v4();

        let payment = client_payments::ActiveModel {
            id: Set(payment_id),
            payment_number: Set(format_number("CP", seq)),
            client_id: Set(client_id),
            project_id: Set(project_id),
            contract_amount: Set(split.contract_amount),
            additional_amount: Set(split.additional_amount),
            total_amount: Set(split.total()),
            notes: Set(notes),
            created_by: Set(created_by),
            payment_date: Set(now),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        if split.contract_amount > Decimal::ZERO {
            let new_total_paid = project.total_paid + split.contract_amount;
            let mut active: projects::ActiveModel = project.into();
            active.total_paid = Set(new_total_paid);
            active.updated_at = Set(now);
            active.update(&txn).await?;
        }

        let ledger_entry = client_ledger::post_entry_in(
            &txn,
            &PostClientEntry {
                client_id,
                project_id,
                entry_kind: EntryKind::Payment,
                debit: Decimal::ZERO,
                credit: split.total(),
                discount: None,
                reference_type: Some("client-payment".to_string()),
                reference_id: Some(payment_id),
                description: Some(format!("Payment {}", payment.payment_number)),
                created_by,
            },
        )
        .await?;

        txn.commit().await?;

        info!(
            payment_number = %payment.payment_number,
            total = %split.total(),
            contract = %split.contract_amount,
            additional = %split.additional_amount,
            "client payment recorded"
        );
        Ok(ClientPaymentOutcome {
            payment,
            ledger_entry,
            split,
        })
    }
}
