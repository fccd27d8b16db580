//! `SeaORM` Entity for materials table.
//!
//! `current_stock` is a denormalized copy of the stock movement log's last
//! balance, always in the material's base unit.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub category: Option<String>,
    pub base_unit_id: Uuid,
    pub current_stock: Decimal,
    pub minimum_stock: Decimal,
    pub last_purchase_price: Option<Decimal>,
    pub last_purchase_date: Option<DateTimeWithTimeZone>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::units::Entity",
        from = "Column::BaseUnitId",
        to = "super::units::Column::Id"
    )]
    BaseUnit,
    #[sea_orm(has_many = "super::material_units::Entity")]
    MaterialUnits,
    #[sea_orm(has_many = "super::stock_movements::Entity")]
    StockMovements,
}

impl Related<super::material_units::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaterialUnits.def()
    }
}

impl Related<super::stock_movements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockMovements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
