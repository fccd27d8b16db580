//! Payment and refund guard validation.
//!
//! Pure guards that run before any payment workflow writes a row. Each guard
//! takes a balance snapshot and the requested amounts, and either passes or
//! names the exact rule that was violated.

pub mod error;
pub mod guard;
pub mod split;

pub use error::PaymentError;
pub use guard::{validate_supplier_payment, validate_supplier_refund};
pub use split::{validate_client_split, PaymentSplit};
