//! Measurement unit conversion and material unit resolution.
//!
//! Units belong to a category (weight, volume, length, count, ...). Each
//! category has exactly one base unit with conversion factor 1; every other
//! unit carries a positive factor relative to that base. Materials may
//! additionally define their own alternative units whose factors are
//! material-specific (a "bag" of cement is not a "bag" of sand).

pub mod conversion;
pub mod error;
pub mod material;

#[cfg(test)]
mod conversion_props;

pub use conversion::{convert, from_base, to_base, validate_derived_unit, UnitRef};
pub use error::UnitError;
pub use material::{material_base_factor, validate_default_flags, MaterialUnit};
