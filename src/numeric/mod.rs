// ============================================================================
// Numeric Module
// Fixed-point prices and quantities
// ============================================================================
//
// Prices are bucketed into levels by exact equality, so every price must have
// exactly one representation. FixedDecimal stores `value × 10^D` as an i64;
// decimal conversion happens only at the wire boundary.

mod errors;
mod fixed_decimal;

pub use errors::{NumericError, NumericResult};
pub use fixed_decimal::{FixedDecimal, Price, Quantity, DECIMALS};
