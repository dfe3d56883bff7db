// ============================================================================
// Matching Algorithm Interface
// ============================================================================

use crate::domain::{BookSide, Order, OrderType, Side, Trade};
use crate::numeric::Price;

/// Crossing procedure run by a book for each incoming order
pub trait MatchingAlgorithm: Send + Sync {
    /// Match an incoming order against the opposite side of the book
    ///
    /// # Arguments
    /// * `incoming_order` - The new order; its remaining quantity is reduced
    ///   by every fill
    /// * `opposite_side` - The opposite side of the order book; drained
    ///   levels are removed from it
    ///
    /// # Returns
    /// Trades in the order they happened
    fn match_order(&self, incoming_order: &mut Order, opposite_side: &mut BookSide) -> Vec<Trade>;

    /// Get the algorithm name for logging
    fn name(&self) -> &str;

    /// Whether the incoming order may trade at `book_price`.
    ///
    /// Market orders cross any price. A limit buy crosses asks at or below
    /// its limit, a limit sell crosses bids at or above it.
    fn prices_cross(&self, incoming: &Order, book_price: Price) -> bool {
        match (incoming.order_type, incoming.side) {
            (OrderType::Market, _) => true,
            (OrderType::Limit, Side::Buy) => book_price <= incoming.price,
            (OrderType::Limit, Side::Sell) => book_price >= incoming.price,
            (OrderType::Cancel, _) => false,
        }
    }
}
