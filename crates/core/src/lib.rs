//! Core business logic for Mortar.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here; persistence is layered on top by `mortar-db`.
//!
//! # Modules
//!
//! - `units` - Measurement unit conversion and material unit resolution
//! - `stock` - Stock movement types and on-hand balance rules
//! - `ledger` - Supplier/client debit-credit journal rules
//! - `allocation` - FIFO payment allocation against open invoices
//! - `payment` - Payment and refund guard validation

pub mod allocation;
pub mod ledger;
pub mod payment;
pub mod stock;
pub mod units;
