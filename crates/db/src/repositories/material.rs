//! Material master-data repository.

use chrono::Utc;
use mortar_core::units::{self, MaterialUnit, UnitError};
use mortar_shared::error::AppError;
use mortar_shared::types::UnitId;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::instrument;
use uuid::Uuid;

use crate::entities::{material_units, materials, units as unit_entity};

/// Error types for material master-data operations.
#[derive(Debug, thiserror::Error)]
pub enum MaterialRepoError {
    /// Material not found or inactive.
    #[error("Material not found: {0}")]
    MaterialNotFound(Uuid),

    /// Referenced unit not found or inactive.
    #[error("Unit not found: {0}")]
    UnitNotFound(Uuid),

    /// Unit definition violation.
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<MaterialRepoError> for AppError {
    fn from(err: MaterialRepoError) -> Self {
        match err {
            MaterialRepoError::MaterialNotFound(_) | MaterialRepoError::UnitNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            MaterialRepoError::Unit(inner) => inner.into(),
            MaterialRepoError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// One alternative unit attached at material creation.
#[derive(Debug, Clone)]
pub struct AlternativeUnitInput {
    /// The unit being attached.
    pub unit_id: Uuid,
    /// Base units per one of this unit, for this material.
    pub conversion_factor: Decimal,
    /// Whether purchases default to this unit.
    pub is_default_purchase: bool,
    /// Whether issues default to this unit.
    pub is_default_issue: bool,
}

/// Input for creating a material.
#[derive(Debug, Clone)]
pub struct CreateMaterialInput {
    /// Unique material code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Free-form category.
    pub category: Option<String>,
    /// The unit stock is kept in.
    pub base_unit_id: Uuid,
    /// Reorder threshold in base units.
    pub minimum_stock: Decimal,
    /// Opening stock in base units, becomes `current_stock` directly; the
    /// movement log starts from it as its baseline.
    pub opening_stock: Decimal,
    /// Material-specific alternative units.
    pub alternative_units: Vec<AlternativeUnitInput>,
}

/// Repository for materials and their alternative units.
#[derive(Debug, Clone)]
pub struct MaterialRepository {
    db: DatabaseConnection,
}

impl MaterialRepository {
    /// Creates a new material repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a material with its alternative units, in one transaction.
    ///
    /// Every alternative factor must be positive and at most one unit may
    /// carry each default flag.
    ///
    /// # Errors
    ///
    /// Returns a definition violation before any write, `UnitNotFound` for
    /// a missing unit reference, or a database error.
    #[instrument(skip(self, input), fields(code = %input.code))]
    pub async fn create(
        &self,
        input: CreateMaterialInput,
    ) -> Result<materials::Model, MaterialRepoError> {
        let alternatives: Vec<MaterialUnit> = input
            .alternative_units
            .iter()
            .map(|alt| MaterialUnit {
                unit_id: UnitId::from_uuid(alt.unit_id),
                conversion_factor: alt.conversion_factor,
                is_default_purchase: alt.is_default_purchase,
                is_default_issue: alt.is_default_issue,
            })
            .collect();
        for alt in &alternatives {
            if alt.conversion_factor <= Decimal::ZERO {
                return Err(UnitError::NonPositiveFactor.into());
            }
        }
        units::validate_default_flags(&alternatives)?;

        let txn = self.db.begin().await?;

        find_active_unit(&txn, input.base_unit_id).await?;
        for alt in &input.alternative_units {
            find_active_unit(&txn, alt.unit_id).await?;
        }

        let now = Utc::now().into();
        let material_id = Uuid::new_v4();
        let material = materials::ActiveModel {
            id: Set(material_id),
            code: Set(input.code.clone()),
            name: Set(input.name.clone()),
            category: Set(input.category.clone()),
            base_unit_id: Set(input.base_unit_id),
            current_stock: Set(input.opening_stock),
            minimum_stock: Set(input.minimum_stock),
            last_purchase_price: Set(None),
            last_purchase_date: Set(None),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        for alt in &input.alternative_units {
            material_units::ActiveModel {
                id: Set(Uuid::new_v4()),
                material_id: Set(material_id),
                unit_id: Set(alt.unit_id),
                conversion_factor: Set(alt.conversion_factor),
                is_default_purchase: Set(alt.is_default_purchase),
                is_default_issue: Set(alt.is_default_issue),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(material)
    }

    /// Loads an active material.
    ///
    /// # Errors
    ///
    /// Returns `MaterialNotFound` or a database error.
    pub async fn find_active(
        &self,
        material_id: Uuid,
    ) -> Result<materials::Model, MaterialRepoError> {
        materials::Entity::find_by_id(material_id)
            .filter(materials::Column::IsActive.eq(true))
            .one(&self.db)
            .await?
            .ok_or(MaterialRepoError::MaterialNotFound(material_id))
    }

    /// Lists active materials.
    ///
    /// # Errors
    ///
    /// Returns a database error.
    pub async fn list_active(&self) -> Result<Vec<materials::Model>, MaterialRepoError> {
        let list = materials::Entity::find()
            .filter(materials::Column::IsActive.eq(true))
            .all(&self.db)
            .await?;
        Ok(list)
    }

    /// Soft-deletes a material. History stays; the material stops resolving
    /// in stock workflows.
    ///
    /// # Errors
    ///
    /// Returns `MaterialNotFound` or a database error.
    pub async fn deactivate(&self, material_id: Uuid) -> Result<(), MaterialRepoError> {
        let material = self.find_active(material_id).await?;
        let mut active: materials::ActiveModel = material.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await?;
        Ok(())
    }
}

async fn find_active_unit<C: sea_orm::ConnectionTrait>(
    conn: &C,
    unit_id: Uuid,
) -> Result<unit_entity::Model, MaterialRepoError> {
    unit_entity::Entity::find_by_id(unit_id)
        .filter(unit_entity::Column::IsActive.eq(true))
        .one(conn)
        .await?
        .ok_or(MaterialRepoError::UnitNotFound(unit_id))
}
