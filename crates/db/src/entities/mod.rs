//! `SeaORM` entity definitions for the Mortar schema.

pub mod client_payments;
pub mod client_transactions;
pub mod clients;
pub mod counters;
pub mod material_units;
pub mod materials;
pub mod projects;
pub mod purchase_invoice_lines;
pub mod purchase_invoices;
pub mod stock_movements;
pub mod supplier_payments;
pub mod supplier_transactions;
pub mod suppliers;
pub mod units;
