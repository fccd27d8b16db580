//! FIFO payment allocation against open purchase invoices.
//!
//! When a supplier payment comes in, it is spread across that supplier's
//! unpaid invoices oldest-first. Each invoice absorbs as much of the payment
//! as it still needs; whatever cannot be absorbed is returned to the caller
//! as an unapplied remainder, never silently dropped.

pub mod error;
pub mod plan;
pub mod status;

#[cfg(test)]
mod plan_props;

pub use error::AllocationError;
pub use plan::{allocate, AllocationPlan, Application, OpenInvoice};
pub use status::InvoiceStatus;
