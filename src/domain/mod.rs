// ============================================================================
// Domain Models Module
// Orders, trades, price levels and configuration
// ============================================================================

pub mod config;
pub mod order;
pub mod order_book;
pub mod trade;

pub use config::{ConfigError, ExchangeConfig, DEFAULT_SYMBOL};
pub use order::{now_nanos, Order, OrderId, OrderType, Side, Timestamp};
pub use order_book::{BookSide, BookUpdate, PriceLevel, PriceQty};
pub use trade::Trade;
