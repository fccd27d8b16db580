//! Client ledger repository.
//!
//! Same journal math as the supplier ledger, scoped by (client, project). A
//! positive running balance means the client owes the company. Scoping by
//! project keeps one client's unrelated sites from netting against each
//! other.

use std::collections::HashMap;

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

use crate::entities::{client_transactions, clients, projects};
use crate::repositories::locks::EntityLocks;
use crate::repositories::sequence::{self, SequenceError, SequenceRepository};

/// Error types for client ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientLedgerError {
    /// Client not found or inactive.
    #[error("Client not found: {0}")]
    ClientNotFound(Uuid),

    /// Project not found, inactive, or not owned by the client.
    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

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

impl From<ClientLedgerError> for AppError {
    fn from(err: ClientLedgerError) -> Self {
        match err {
            ClientLedgerError::ClientNotFound(_) | ClientLedgerError::ProjectNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            ClientLedgerError::Ledger(inner) => inner.into(),
            ClientLedgerError::Sequence(inner) => inner.into(),
            ClientLedgerError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for posting a client ledger entry.
#[derive(Debug, Clone)]
pub struct PostClientEntry {
    /// Client the entry belongs to.
    pub client_id: Uuid,
    /// Project scope of the entry.
    pub project_id: Uuid,
    /// What produced the entry.
    pub entry_kind: EntryKind,
    /// Debit amount (client owes more).
    pub debit: Decimal,
    /// Credit amount (client owes less).
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

/// One project's share of a client's outstanding balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectBalance {
    /// Project id.
    pub project_id: Uuid,
    /// Latest running balance in that scope.
    pub balance: Decimal,
}

/// Repository for the client ledger.
#[derive(Debug, Clone)]
pub struct ClientLedgerRepository {
    db: DatabaseConnection,
    locks: EntityLocks,
}

impl ClientLedgerRepository {
    /// Creates a new client ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, locks: EntityLocks) -> Self {
        Self { db, locks }
    }

    /// Posts one entry to a (client, project) ledger scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the client or project is missing, the amounts
    /// violate the entry rules, or the database fails.
    #[instrument(skip(self), fields(client_id = %input.client_id, project_id = %input.project_id))]
    pub async fn post_entry(
        &self,
        input: PostClientEntry,
    ) -> Result<client_transactions::Model, ClientLedgerError> {
        let _guard = self
            .locks
            .acquire(&EntityLocks::client_project_key(
                input.client_id,
                input.project_id,
            ))
            .await;

        let txn = self.db.begin().await?;
        let entry = post_entry_in(&txn, &input).await?;
        txn.commit().await?;

        info!(
            sequence = entry.sequence,
            entry_kind = %input.entry_kind,
            balance_after = %entry.balance_after,
            "client ledger entry posted"
        );
        Ok(entry)
    }

    /// Current balance of one (client, project) scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn current_balance(
        &self,
        client_id: Uuid,
        project_id: Uuid,
    ) -> Result<Decimal, ClientLedgerError> {
        balance_in(&self.db, client_id, project_id).await
    }

    /// Sum of the client's per-project balances.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn total_balance(&self, client_id: Uuid) -> Result<Decimal, ClientLedgerError> {
        let breakdown = self.balance_breakdown(client_id).await?;
        Ok(breakdown.iter().map(|b| b.balance).sum())
    }

    /// Non-zero per-project balances for a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn balance_breakdown(
        &self,
        client_id: Uuid,
    ) -> Result<Vec<ProjectBalance>, ClientLedgerError> {
        // Newest first, so the first entry seen per project is its latest.
        let entries = client_transactions::Entity::find()
            .filter(client_transactions::Column::ClientId.eq(client_id))
            .order_by_desc(client_transactions::Column::TransactionDate)
            .order_by_desc(client_transactions::Column::Sequence)
            .all(&self.db)
            .await?;

        let mut latest: HashMap<Uuid, Decimal> = HashMap::new();
        for entry in entries {
            latest.entry(entry.project_id).or_insert(entry.balance_after);
        }

        let mut breakdown: Vec<ProjectBalance> = latest
            .into_iter()
            .filter(|(_, balance)| !balance.is_zero())
            .map(|(project_id, balance)| ProjectBalance {
                project_id,
                balance,
            })
            .collect();
        breakdown.sort_by_key(|b| b.project_id);
        Ok(breakdown)
    }

    /// Paginated entry history for one scope, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn history(
        &self,
        client_id: Uuid,
        project_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResponse<client_transactions::Model>, ClientLedgerError> {
        let query = client_transactions::Entity::find()
            .filter(client_transactions::Column::ClientId.eq(client_id))
            .filter(client_transactions::Column::ProjectId.eq(project_id))
            .order_by_desc(client_transactions::Column::TransactionDate)
            .order_by_desc(client_transactions::Column::Sequence);

        let total = query.clone().count(&self.db).await?;
        let items = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(items, page.page, page.per_page, total))
    }
}

/// Posts an entry on an existing connection. Callers hold the scope lock.
pub(crate) async fn post_entry_in<C: ConnectionTrait>(
    conn: &C,
    input: &PostClientEntry,
) -> Result<client_transactions::Model, ClientLedgerError> {
    clients::Entity::find_by_id(input.client_id)
        .filter(clients::Column::IsActive.eq(true))
        .one(conn)
        .await?
        .ok_or(ClientLedgerError::ClientNotFound(input.client_id))?;
    projects::Entity::find_by_id(input.project_id)
        .filter(projects::Column::ClientId.eq(input.client_id))
        .filter(projects::Column::IsActive.eq(true))
        .one(conn)
        .await?
        .ok_or(ClientLedgerError::ProjectNotFound(input.project_id))?;

    let resolved = ledger::resolve_entry(input.debit, input.credit, input.discount)?;
    let previous = balance_in(conn, input.client_id, input.project_id).await?;
    let balance_after = ledger::next_balance(previous, resolved.debit, resolved.effective_credit);

    let seq = SequenceRepository::next_value_in(conn, sequence::names::CLIENT_TRANSACTION).await?;
    let now = Utc::now().into();

    let entry = client_transactions::ActiveModel {
        id: Set(Uuid::new_v4()),
        sequence: Set(seq),
        client_id: Set(input.client_id),
        project_id: Set(input.project_id),
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

/// Latest running balance for one (client, project) scope.
pub(crate) async fn balance_in<C: ConnectionTrait>(
    conn: &C,
    client_id: Uuid,
    project_id: Uuid,
) -> Result<Decimal, ClientLedgerError> {
    let latest = client_transactions::Entity::find()
        .filter(client_transactions::Column::ClientId.eq(client_id))
        .filter(client_transactions::Column::ProjectId.eq(project_id))
        .order_by_desc(client_transactions::Column::TransactionDate)
        .order_by_desc(client_transactions::Column::Sequence)
        .limit(1)
        .one(conn)
        .await?;

    Ok(latest.map_or(Decimal::ZERO, |entry| entry.balance_after))
}
