//! Stock repository: the movement log and the denormalized material balance.

use chrono::Utc;
use mortar_core::stock::{self, MovementType};
use mortar_core::units::{self, MaterialUnit, UnitError};
use mortar_shared::error::AppError;
use mortar_shared::types::UnitId;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entities::{material_units, materials, stock_movements};
use crate::repositories::locks::EntityLocks;
use crate::repositories::sequence::{self, SequenceError, SequenceRepository};

/// Error types for stock operations.
#[derive(Debug, thiserror::Error)]
pub enum StockRepoError {
    /// Material not found or inactive.
    #[error("Material not found: {0}")]
    MaterialNotFound(Uuid),

    /// Unit resolution or conversion failure.
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// Balance rule violation.
    #[error(transparent)]
    Stock(#[from] stock::StockError),

    /// Sequence allocation failure.
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<StockRepoError> for AppError {
    fn from(err: StockRepoError) -> Self {
        match err {
            StockRepoError::MaterialNotFound(_) => Self::NotFound(err.to_string()),
            StockRepoError::Unit(inner) => inner.into(),
            StockRepoError::Stock(inner) => inner.into(),
            StockRepoError::Sequence(inner) => inner.into(),
            StockRepoError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for recording a stock movement.
#[derive(Debug, Clone)]
pub struct RecordMovementInput {
    /// Material being moved.
    pub material_id: Uuid,
    /// Movement type.
    pub movement_type: MovementType,
    /// Quantity in the unit the user entered.
    pub quantity: Decimal,
    /// Unit the quantity was entered in.
    pub unit_id: Uuid,
    /// Unit price, per entered unit; tracked as last purchase price on
    /// inbound purchase movements.
    pub unit_price: Option<Decimal>,
    /// Project the movement belongs to, for issues and returns.
    pub project_id: Option<Uuid>,
    /// Source document type.
    pub reference_type: Option<String>,
    /// Source document id.
    pub reference_id: Option<Uuid>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Actor recording the movement.
    pub created_by: Option<Uuid>,
}

/// Repository for the append-only stock movement log.
#[derive(Debug, Clone)]
pub struct StockRepository {
    db: DatabaseConnection,
    locks: EntityLocks,
}

impl StockRepository {
    /// Creates a new stock repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, locks: EntityLocks) -> Self {
        Self { db, locks }
    }

    /// Records a stock movement.
    ///
    /// Resolves the entered quantity to base units through the material's
    /// unit table, checks the balance rule, allocates a sequence number,
    /// inserts the movement and updates the material's denormalized stock.
    /// All of it commits or rolls back together.
    ///
    /// # Errors
    ///
    /// Returns an error if the material is missing, the unit is not valid
    /// for the material, the balance would go negative, or the database
    /// fails.
    #[instrument(skip(self), fields(material_id = %input.material_id))]
    pub async fn record_movement(
        &self,
        input: RecordMovementInput,
    ) -> Result<stock_movements::Model, StockRepoError> {
        let _guard = self
            .locks
            .acquire(&EntityLocks::material_key(input.material_id))
            .await;

        let txn = self.db.begin().await?;
        let movement = record_movement_in(&txn, &input).await?;
        txn.commit().await?;

        info!(
            sequence = movement.sequence,
            movement_type = %input.movement_type,
            balance_after = %movement.balance_after,
            "stock movement recorded"
        );
        Ok(movement)
    }

    /// Records a physical-count adjustment.
    ///
    /// Converts the counted quantity to base units, compares it against the
    /// current balance and records the difference as an `AdjustmentIn` or
    /// `AdjustmentOut` movement in the base unit.
    ///
    /// # Errors
    ///
    /// Returns `NoAdjustmentNeeded` (via `StockError`) when the count
    /// matches, or any movement-recording error.
    #[instrument(skip(self))]
    pub async fn record_adjustment(
        &self,
        material_id: Uuid,
        unit_id: Uuid,
        counted_quantity: Decimal,
        reason: Option<String>,
        created_by: Option<Uuid>,
    ) -> Result<stock_movements::Model, StockRepoError> {
        let _guard = self
            .locks
            .acquire(&EntityLocks::material_key(material_id))
            .await;

        let txn = self.db.begin().await?;

        let material = find_active_material(&txn, material_id).await?;
        let counted_base =
            resolve_base_quantity(&txn, &material, unit_id, counted_quantity).await?;

        let baseline = latest_balance(&txn, &material).await?;
        let (movement_type, base_quantity) = stock::adjustment_for(counted_base, baseline)?;

        let input = RecordMovementInput {
            material_id,
            movement_type,
            // Adjustments are always recorded in the base unit.
            quantity: base_quantity,
            unit_id: material.base_unit_id,
            unit_price: None,
            project_id: None,
            reference_type: Some("stock-count".to_string()),
            reference_id: None,
            notes: reason,
            created_by,
        };

        let movement = record_movement_in(&txn, &input).await?;
        let balance_after = movement.balance_after;

        txn.commit().await?;

        info!(sequence = movement.sequence, %balance_after, "stock adjustment recorded");
        Ok(movement)
    }

    /// Replays the whole movement log for a material and returns the
    /// derived balance.
    ///
    /// Intended as a drift guard for the denormalized
    /// `materials.current_stock`; callers compare the two and investigate a
    /// mismatch.
    ///
    /// # Errors
    ///
    /// Returns an error if the material is missing or the query fails.
    pub async fn recompute_stock(&self, material_id: Uuid) -> Result<Decimal, StockRepoError> {
        let material = find_active_material(&self.db, material_id).await?;

        let movements = stock_movements::Entity::find()
            .filter(stock_movements::Column::MaterialId.eq(material.id))
            .order_by_asc(stock_movements::Column::MovementDate)
            .order_by_asc(stock_movements::Column::Sequence)
            .all(&self.db)
            .await?;

        let mut balance = Decimal::ZERO;
        for movement in &movements {
            let movement_type: MovementType = movement
                .movement_type
                .parse()
                .map_err(|_| DbErr::Custom(format!(
                    "Unknown movement type in log: {}",
                    movement.movement_type
                )))?;
            balance = match movement_type.direction() {
                stock::Direction::Inbound => balance + movement.base_quantity,
                stock::Direction::Outbound => balance - movement.base_quantity,
            };
        }

        Ok(balance)
    }

    /// Lists the movement history of a material, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn history(
        &self,
        material_id: Uuid,
        limit: u64,
    ) -> Result<Vec<stock_movements::Model>, StockRepoError> {
        let movements = stock_movements::Entity::find()
            .filter(stock_movements::Column::MaterialId.eq(material_id))
            .order_by_desc(stock_movements::Column::MovementDate)
            .order_by_desc(stock_movements::Column::Sequence)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(movements)
    }
}

/// Loads an active material or fails with `MaterialNotFound`.
pub(crate) async fn find_active_material<C: ConnectionTrait>(
    conn: &C,
    material_id: Uuid,
) -> Result<materials::Model, StockRepoError> {
    materials::Entity::find_by_id(material_id)
        .filter(materials::Column::IsActive.eq(true))
        .one(conn)
        .await?
        .ok_or(StockRepoError::MaterialNotFound(material_id))
}

/// Resolves an entered quantity into the material's base unit.
pub(crate) async fn resolve_base_quantity<C: ConnectionTrait>(
    conn: &C,
    material: &materials::Model,
    unit_id: Uuid,
    quantity: Decimal,
) -> Result<Decimal, StockRepoError> {
    let alternatives: Vec<MaterialUnit> = material_units::Entity::find()
        .filter(material_units::Column::MaterialId.eq(material.id))
        .all(conn)
        .await?
        .into_iter()
        .map(|row| MaterialUnit {
            unit_id: UnitId::from_uuid(row.unit_id),
            conversion_factor: row.conversion_factor,
            is_default_purchase: row.is_default_purchase,
            is_default_issue: row.is_default_issue,
        })
        .collect();

    let factor = units::material_base_factor(
        UnitId::from_uuid(material.base_unit_id),
        &alternatives,
        UnitId::from_uuid(unit_id),
    )?;

    Ok(quantity * factor)
}

/// Records a movement on an existing transaction.
///
/// Callers must hold the material's [`EntityLocks`] key; the purchase and
/// return workflows use this to put stock movements inside their own
/// transaction.
pub(crate) async fn record_movement_in(
    txn: &DatabaseTransaction,
    input: &RecordMovementInput,
) -> Result<stock_movements::Model, StockRepoError> {
    let material = find_active_material(txn, input.material_id).await?;
    let base_quantity =
        resolve_base_quantity(txn, &material, input.unit_id, input.quantity).await?;

    let baseline = latest_balance(txn, &material).await?;
    let balance_after = stock::apply_movement(baseline, input.movement_type, base_quantity)?;

    let movement = insert_movement(txn, &material, input, base_quantity, balance_after).await?;
    update_material_stock(txn, material, input, balance_after).await?;
    Ok(movement)
}

/// Baseline for the next movement: the latest logged balance, or the
/// denormalized stock when the log is empty (opening balances).
async fn latest_balance(
    txn: &DatabaseTransaction,
    material: &materials::Model,
) -> Result<Decimal, StockRepoError> {
    let latest = stock_movements::Entity::find()
        .filter(stock_movements::Column::MaterialId.eq(material.id))
        .order_by_desc(stock_movements::Column::MovementDate)
        .order_by_desc(stock_movements::Column::Sequence)
        .limit(1)
        .one(txn)
        .await?;

    Ok(latest.map_or(material.current_stock, |m| m.balance_after))
}

async fn insert_movement(
    txn: &DatabaseTransaction,
    material: &materials::Model,
    input: &RecordMovementInput,
    base_quantity: Decimal,
    balance_after: Decimal,
) -> Result<stock_movements::Model, StockRepoError> {
    let seq = SequenceRepository::next_value_in(txn, sequence::names::STOCK_MOVEMENT).await?;
    let now = Utc::now().into();

    let movement = stock_movements::ActiveModel {
        id: Set(Uuid::new_v4()),
        sequence: Set(seq),
        material_id: Set(material.id),
        movement_type: Set(input.movement_type.as_str().to_string()),
        quantity: Set(input.quantity),
        unit_id: Set(input.unit_id),
        base_quantity: Set(base_quantity),
        balance_after: Set(balance_after),
        unit_price: Set(input.unit_price),
        project_id: Set(input.project_id),
        reference_type: Set(input.reference_type.clone()),
        reference_id: Set(input.reference_id),
        notes: Set(input.notes.clone()),
        created_by: Set(input.created_by),
        movement_date: Set(now),
        created_at: Set(now),
    };

    Ok(movement.insert(txn).await?)
}

async fn update_material_stock(
    txn: &DatabaseTransaction,
    material: materials::Model,
    input: &RecordMovementInput,
    balance_after: Decimal,
) -> Result<(), StockRepoError> {
    let now = Utc::now().into();
    let track_price = input.movement_type.tracks_purchase_price() && input.unit_price.is_some();

    let mut active: materials::ActiveModel = material.into();
    active.current_stock = Set(balance_after);
    active.updated_at = Set(now);
    if track_price {
        active.last_purchase_price = Set(input.unit_price);
        active.last_purchase_date = Set(Some(now));
    }
    active.update(txn).await?;
    Ok(())
}
