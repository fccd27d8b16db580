//! Running balance computation for party ledgers.

use rust_decimal::Decimal;

/// Computes the balance after an entry.
///
/// `previous` is the balance of the most recent entry in the same scope (a
/// supplier, or a client/project pair), or zero if none exists. The credit
/// passed here is the effective credit (cash plus discount).
#[must_use]
pub fn next_balance(previous: Decimal, debit: Decimal, effective_credit: Decimal) -> Decimal {
    previous + debit - effective_credit
}
