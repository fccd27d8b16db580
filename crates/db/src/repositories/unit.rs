//! Unit master-data repository.

use chrono::Utc;
use mortar_core::units::{self, UnitError, UnitRef};
use mortar_shared::error::AppError;
use mortar_shared::types::UnitId;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::units as unit_entity;

/// Error types for unit master-data operations.
#[derive(Debug, thiserror::Error)]
pub enum UnitRepoError {
    /// Unit not found or inactive.
    #[error("Unit not found: {0}")]
    UnitNotFound(Uuid),

    /// Unit definition violation.
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<UnitRepoError> for AppError {
    fn from(err: UnitRepoError) -> Self {
        match err {
            UnitRepoError::UnitNotFound(_) => Self::NotFound(err.to_string()),
            UnitRepoError::Unit(inner) => inner.into(),
            UnitRepoError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Repository for measurement units.
#[derive(Debug, Clone)]
pub struct UnitRepository {
    db: DatabaseConnection,
}

impl UnitRepository {
    /// Creates a new unit repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates the base unit of a category (conversion factor fixed at 1).
    ///
    /// # Errors
    ///
    /// Returns a database error.
    pub async fn create_base(
        &self,
        code: &str,
        name: &str,
        category: &str,
    ) -> Result<unit_entity::Model, UnitRepoError> {
        let now = Utc::now().into();
        let unit = unit_entity::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            category: Set(category.to_string()),
            is_base: Set(true),
            conversion_factor: Set(Decimal::ONE),
            base_unit_id: Set(None),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(unit.insert(&self.db).await?)
    }

    /// Creates a derived unit defined as `conversion_factor` base units.
    ///
    /// # Errors
    ///
    /// Returns a definition violation (non-positive factor, wrong-category
    /// or non-base reference) before writing, or a database error.
    pub async fn create_derived(
        &self,
        code: &str,
        name: &str,
        category: &str,
        conversion_factor: Decimal,
        base_unit_id: Uuid,
    ) -> Result<unit_entity::Model, UnitRepoError> {
        let base = self.find_active(base_unit_id).await?;
        let id = Uuid::new_v4();
        units::validate_derived_unit(
            UnitId::from_uuid(id),
            category,
            conversion_factor,
            &unit_ref(&base),
        )?;

        let now = Utc::now().into();
        let unit = unit_entity::ActiveModel {
            id: Set(id),
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            category: Set(category.to_string()),
            is_base: Set(false),
            conversion_factor: Set(conversion_factor),
            base_unit_id: Set(Some(base_unit_id)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(unit.insert(&self.db).await?)
    }

    /// Loads an active unit.
    ///
    /// # Errors
    ///
    /// Returns `UnitNotFound` or a database error.
    pub async fn find_active(&self, unit_id: Uuid) -> Result<unit_entity::Model, UnitRepoError> {
        unit_entity::Entity::find_by_id(unit_id)
            .filter(unit_entity::Column::IsActive.eq(true))
            .one(&self.db)
            .await?
            .ok_or(UnitRepoError::UnitNotFound(unit_id))
    }
}

/// Builds the conversion snapshot for a persisted unit.
#[must_use]
pub fn unit_ref(unit: &unit_entity::Model) -> UnitRef {
    UnitRef {
        id: UnitId::from_uuid(unit.id),
        category: unit.category.clone(),
        is_base: unit.is_base,
        conversion_factor: unit.conversion_factor,
    }
}
