//! `SeaORM` Entity for units table.
//!
//! A unit is either a base unit of its category (`is_base`, factor 1) or a
//! derived unit defined as `conversion_factor` base units.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "units")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub category: String,
    pub is_base: bool,
    pub conversion_factor: Decimal,
    pub base_unit_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::BaseUnitId",
        to = "Column::Id"
    )]
    BaseUnit,
}

impl ActiveModelBehavior for ActiveModel {}
