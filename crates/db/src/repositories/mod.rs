//! Repository layer for data access.
//!
//! Each repository owns a `DatabaseConnection` and exposes the workflows the
//! domain defines. Multi-step workflows run in a single database
//! transaction; read-balance-then-insert sequences additionally serialize on
//! a per-entity key via [`EntityLocks`].

pub mod allocation;
pub mod client_ledger;
pub mod client_payment;
pub mod locks;
pub mod material;
pub mod purchase;
pub mod sequence;
pub mod stock;
pub mod supplier_ledger;
pub mod unit;

pub use allocation::AllocationRepository;
pub use client_ledger::ClientLedgerRepository;
pub use client_payment::ClientPaymentRepository;
pub use locks::EntityLocks;
pub use material::MaterialRepository;
pub use purchase::PurchaseRepository;
pub use sequence::SequenceRepository;
pub use stock::StockRepository;
pub use supplier_ledger::SupplierLedgerRepository;
pub use unit::UnitRepository;
