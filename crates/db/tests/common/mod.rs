//! Shared harness for repository integration tests.
//!
//! Each test runs against its own in-memory SQLite database with the full
//! migration applied. The pool is pinned to one connection so the in-memory
//! database is shared across the test's queries.

use chrono::Utc;
use mortar_db::entities::{clients, projects, suppliers};
use mortar_db::migration::Migrator;
use mortar_db::repositories::material::{
    AlternativeUnitInput, CreateMaterialInput, MaterialRepository,
};
use mortar_db::repositories::unit::UnitRepository;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

pub async fn setup_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1);
    let db = Database::connect(opts).await.expect("connect to sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

/// Base unit plus one derived unit in the same category.
pub async fn seed_units(db: &DatabaseConnection) -> (Uuid, Uuid) {
    let units = UnitRepository::new(db.clone());
    let kg = units
        .create_base("kg", "Kilogram", "weight")
        .await
        .expect("create base unit");
    let sack = units
        .create_derived("sack", "Sack", "weight", Decimal::from(5), kg.id)
        .await
        .expect("create derived unit");
    (kg.id, sack.id)
}

/// Material with an opening stock and one alternative unit (factor 5).
pub async fn seed_material(
    db: &DatabaseConnection,
    base_unit_id: Uuid,
    alt_unit_id: Uuid,
    opening_stock: Decimal,
) -> Uuid {
    let materials = MaterialRepository::new(db.clone());
    let material = materials
        .create(CreateMaterialInput {
            code: "CEM-01".to_string(),
            name: "Portland cement".to_string(),
            category: Some("cement".to_string()),
            base_unit_id,
            minimum_stock: Decimal::ZERO,
            opening_stock,
            alternative_units: vec![AlternativeUnitInput {
                unit_id: alt_unit_id,
                conversion_factor: Decimal::from(5),
                is_default_purchase: true,
                is_default_issue: true,
            }],
        })
        .await
        .expect("create material");
    material.id
}

pub async fn seed_supplier(db: &DatabaseConnection, code: &str) -> Uuid {
    let now = Utc::now().into();
    let supplier = suppliers::ActiveModel {
        id: Set(Uuid::new_v4()),
        code: Set(code.to_string()),
        name: Set(format!("Supplier {code}")),
        contact_person: Set(None),
        phone: Set(None),
        address: Set(None),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("create supplier");
    supplier.id
}

pub async fn seed_client(db: &DatabaseConnection, code: &str) -> Uuid {
    let now = Utc::now().into();
    let client = clients::ActiveModel {
        id: Set(Uuid::new_v4()),
        code: Set(code.to_string()),
        name: Set(format!("Client {code}")),
        contact_person: Set(None),
        phone: Set(None),
        address: Set(None),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("create client");
    client.id
}

pub async fn seed_project(
    db: &DatabaseConnection,
    client_id: Uuid,
    contract_amount: Decimal,
) -> Uuid {
    let now = Utc::now().into();
    let project = projects::ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(client_id),
        name: Set("Site A".to_string()),
        location: Set(None),
        contract_amount: Set(contract_amount),
        total_paid: Set(Decimal::ZERO),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("create project");
    project.id
}
