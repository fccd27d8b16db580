//! Named sequence generator backed by the counters table.

use chrono::Utc;
use mortar_shared::error::AppError;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Statement};

/// Counter names used by the workflows.
pub mod names {
    /// Stock movement sequence.
    pub const STOCK_MOVEMENT: &str = "stock-movement";
    /// Supplier ledger entry sequence.
    pub const SUPPLIER_TRANSACTION: &str = "supplier-transaction";
    /// Client ledger entry sequence.
    pub const CLIENT_TRANSACTION: &str = "client-transaction";
    /// Purchase invoice number sequence.
    pub const PURCHASE_INVOICE: &str = "purchase-invoice";
    /// Supplier payment number sequence.
    pub const SUPPLIER_PAYMENT: &str = "supplier-payment";
    /// Client payment number sequence.
    pub const CLIENT_PAYMENT: &str = "client-payment";
}

/// Error types for sequence operations.
#[derive(Debug, thiserror::Error)]
pub enum SequenceError {
    /// The upsert returned no row.
    #[error("Counter upsert for '{0}' returned no value")]
    NoValue(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<SequenceError> for AppError {
    fn from(err: SequenceError) -> Self {
        match err {
            SequenceError::NoValue(_) => Self::Internal(err.to_string()),
            SequenceError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Repository for monotonically increasing named counters.
#[derive(Debug, Clone)]
pub struct SequenceRepository {
    db: DatabaseConnection,
}

impl SequenceRepository {
    /// Creates a new sequence repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the next value of the named counter, starting at 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub async fn next_value(&self, name: &str) -> Result<i64, SequenceError> {
        Self::next_value_in(&self.db, name).await
    }

    /// Returns the next counter value on an existing connection, so the
    /// increment commits or rolls back with the enclosing transaction.
    ///
    /// The increment is a single upsert-returning statement; two concurrent
    /// callers can never observe the same value.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails or returns no row.
    pub async fn next_value_in<C: ConnectionTrait>(
        conn: &C,
        name: &str,
    ) -> Result<i64, SequenceError> {
        let backend = conn.get_database_backend();
        let now = Utc::now();
        // ON CONFLICT .. RETURNING runs on both Postgres and SQLite.
        let stmt = Statement::from_sql_and_values(
            backend,
            "INSERT INTO counters (name, value, updated_at) VALUES ($1, 1, $2) \
             ON CONFLICT (name) DO UPDATE SET value = counters.value + 1, \
             updated_at = excluded.updated_at \
             RETURNING value",
            [name.into(), now.into()],
        );

        let row = conn
            .query_one(stmt)
            .await?
            .ok_or_else(|| SequenceError::NoValue(name.to_string()))?;
        let value: i64 = row.try_get("", "value")?;
        Ok(value)
    }
}

/// Formats a document number from a prefix and a sequence value.
///
/// `format_number("PI", 7)` is `PI-0007`; values past four digits keep all
/// their digits.
#[must_use]
pub fn format_number(prefix: &str, value: i64) -> String {
    format!("{prefix}-{value:04}")
}
