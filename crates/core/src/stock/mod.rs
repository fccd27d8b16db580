//! Stock movement types and on-hand balance rules.
//!
//! Every inventory change is an immutable movement with a signed direction.
//! Balances are kept in the material's base unit; quantities arrive in any
//! unit the material accepts and are resolved through `units`.

pub mod balance;
pub mod error;
pub mod movement;

#[cfg(test)]
mod balance_props;

pub use balance::{adjustment_for, apply_movement};
pub use error::StockError;
pub use movement::{Direction, MovementType};
