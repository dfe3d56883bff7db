// ============================================================================
// Engine Module
// Matching, per-symbol books and the book registry
// ============================================================================

mod exchange;
mod matching_engine;
mod price_time;

pub use exchange::Exchange;
pub use matching_engine::{Execution, OrderBook};
pub use price_time::PriceTimePriority;

#[cfg(test)]
mod property_tests;
