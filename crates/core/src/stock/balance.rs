//! On-hand balance computation for stock movements.

use rust_decimal::Decimal;

use super::error::StockError;
use super::movement::{Direction, MovementType};

/// Applies a movement to a baseline balance and returns the new balance.
///
/// `base_quantity` is the movement quantity already resolved into the
/// material's base unit and must be strictly positive; the sign comes from
/// the movement type.
///
/// # Errors
///
/// Returns `NonPositiveQuantity` for zero/negative quantities, or
/// `InsufficientStock` when the result would be negative and the movement
/// type is not exempt (only `In` and `AdjustmentIn` are).
pub fn apply_movement(
    baseline: Decimal,
    movement_type: MovementType,
    base_quantity: Decimal,
) -> Result<Decimal, StockError> {
    if base_quantity <= Decimal::ZERO {
        return Err(StockError::NonPositiveQuantity);
    }

    let balance_after = match movement_type.direction() {
        Direction::Inbound => baseline + base_quantity,
        Direction::Outbound => baseline - base_quantity,
    };

    if balance_after < Decimal::ZERO && !movement_type.allows_negative_balance() {
        return Err(StockError::InsufficientStock {
            requested: base_quantity,
            available: baseline,
        });
    }

    Ok(balance_after)
}

/// Computes the adjustment movement for a physical stock count.
///
/// `counted_base_qty` is the counted quantity resolved into base units.
/// Returns the movement type and the (positive) quantity to record, both in
/// the material's base unit.
///
/// # Errors
///
/// Returns `NoAdjustmentNeeded` when the count matches the recorded stock.
pub fn adjustment_for(
    counted_base_qty: Decimal,
    current_stock: Decimal,
) -> Result<(MovementType, Decimal), StockError> {
    let difference = counted_base_qty - current_stock;

    if difference.is_zero() {
        return Err(StockError::NoAdjustmentNeeded);
    }

    if difference > Decimal::ZERO {
        Ok((MovementType::AdjustmentIn, difference))
    } else {
        Ok((MovementType::AdjustmentOut, difference.abs()))
    }
}
