// ============================================================================
// Limit Order Book Library
// Price-time priority order books with per-symbol registry
// ============================================================================

//! # L1 Book
//!
//! In-memory limit order books with strict price-time priority.
//!
//! ## Features
//!
//! - **Fixed-point prices and quantities**, so equal prices share a level
//! - **One book per symbol**, created on first use by an [`engine::Exchange`]
//! - **Limit and market orders**; limit remainders rest, market remainders drop
//! - **Top-of-book updates and trades** pushed to pluggable event handlers
//!
//! ## Example
//!
//! ```rust
//! use l1_book::prelude::*;
//! use l1_book::numeric::{Price, Quantity};
//!
//! let exchange = Exchange::default();
//! let px = |n| Price::from_integer(n).unwrap();
//! let qty = |n| Quantity::from_integer(n).unwrap();
//!
//! exchange.submit(OrderRequest::limit("s1", Side::Sell, px(101), qty(5))).unwrap();
//! exchange.submit(OrderRequest::limit("s2", Side::Sell, px(100), qty(3))).unwrap();
//!
//! let execution = exchange.submit(OrderRequest::market("b1", Side::Buy, qty(4))).unwrap();
//!
//! assert_eq!(execution.trades.len(), 2);
//! assert_eq!(execution.trades[0].price, px(100));
//! assert_eq!(execution.trades[1].price, px(101));
//! assert_eq!(execution.book_update.best_ask, PriceQty::new(px(101), qty(4)));
//! assert_eq!(execution.book_update.last_trade_price, Some(px(101)));
//! ```

pub mod api;
pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::api::{OrderRequest, RejectReason};
    pub use crate::domain::{
        BookSide, BookUpdate, ExchangeConfig, Order, OrderId, OrderType, PriceLevel, PriceQty,
        Side, Trade,
    };
    pub use crate::engine::{Exchange, Execution, OrderBook, PriceTimePriority};
    pub use crate::interfaces::{
        ChannelBroadcaster, EventHandler, LoggingEventHandler, MarketEvent, MatchingAlgorithm,
        NoOpEventHandler,
    };
}
