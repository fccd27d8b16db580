//! Supplier and client debit-credit journal rules.
//!
//! Both party ledgers are append-only journals where every entry carries a
//! running balance. The supplier ledger is scoped per supplier (positive
//! balance = company owes the supplier); the client ledger is scoped per
//! (client, project) pair (positive balance = client owes the company).
//! The math is identical; only the scope differs.

pub mod balance;
pub mod entry;
pub mod error;

#[cfg(test)]
mod balance_props;

pub use balance::next_balance;
pub use entry::{resolve_entry, validate_amounts, EntryKind, ResolvedAmounts};
pub use error::LedgerError;
