// ============================================================================
// Matching Engine
// One symbol's book: both sides, last trade price, serialized submission
// ============================================================================

use crate::domain::{now_nanos, BookSide, BookUpdate, Order, OrderType, PriceQty, Side, Trade};
use crate::interfaces::MatchingAlgorithm;
use crate::numeric::{Price, Quantity};
use parking_lot::Mutex;

use super::PriceTimePriority;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What one submission produced: its fills in execution order and the top of
/// book right after it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Execution {
    pub book_update: BookUpdate,
    pub trades: Vec<Trade>,
}

impl Execution {
    /// Total quantity traded by the submission
    pub fn filled_quantity(&self) -> Quantity {
        let raw: i128 = self.trades.iter().map(|t| i128::from(t.qty.raw_value())).sum();
        Quantity::from_raw(i64::try_from(raw).unwrap_or(i64::MAX))
    }
}

/// Everything guarded by the book lock
struct BookState {
    bids: BookSide,
    asks: BookSide,
    last_trade_price: Option<Price>,
}

impl BookState {
    fn new() -> Self {
        Self {
            bids: BookSide::new(Side::Buy),
            asks: BookSide::new(Side::Sell),
            last_trade_price: None,
        }
    }

    fn opposite_side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::Buy => &mut self.asks,
            Side::Sell => &mut self.bids,
        }
    }

    fn same_side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }
}

/// Limit order book for a single symbol.
///
/// All state sits behind one mutex: a submission matches, rests and
/// snapshots atomically with respect to every other call on this book.
pub struct OrderBook {
    /// Trading symbol (e.g., "BTC-USD")
    symbol: String,

    /// Crossing procedure
    algorithm: Box<dyn MatchingAlgorithm>,

    state: Mutex<BookState>,
}

impl OrderBook {
    /// Create an empty book matching with price/time priority
    pub fn new(symbol: impl Into<String>) -> Self {
        Self::with_algorithm(symbol, Box::new(PriceTimePriority::new()))
    }

    pub fn with_algorithm(symbol: impl Into<String>, algorithm: Box<dyn MatchingAlgorithm>) -> Self {
        Self {
            symbol: symbol.into(),
            algorithm,
            state: Mutex::new(BookState::new()),
        }
    }

    /// Submit an order.
    ///
    /// Unset `ts` and `symbol` are filled in from the clock and this book.
    /// The order crosses the opposite side; a limit remainder rests at its
    /// own price, a market remainder is dropped. `cancel` orders change
    /// nothing. The order is assumed valid (positive quantity, positive
    /// price for limits).
    pub fn submit(&self, mut order: Order) -> Execution {
        if order.ts == 0 {
            order.ts = now_nanos();
        }
        if order.symbol.is_empty() {
            order.symbol = self.symbol.clone();
        }
        let side = order.side;
        let submitted = order.remaining();

        let mut state = self.state.lock();

        let trades = match order.order_type {
            OrderType::Limit | OrderType::Market => self
                .algorithm
                .match_order(&mut order, state.opposite_side_mut(side)),
            OrderType::Cancel => {
                tracing::debug!(symbol = %self.symbol, order_id = %order.id, "cancel is not supported, ignoring");
                Vec::new()
            },
        };

        if let Some(last) = trades.last() {
            state.last_trade_price = Some(last.price);
        }

        let rested = order.is_limit_order() && order.remaining().is_positive();
        tracing::debug!(
            symbol = %self.symbol,
            algorithm = self.algorithm.name(),
            order_id = %order.id,
            %side,
            order_type = %order.order_type,
            %submitted,
            trades = trades.len(),
            remaining = %order.remaining(),
            rested,
            "order processed"
        );

        if rested {
            let price = order.price;
            state.same_side_mut(side).get_or_create_level(price).append(order);
        }

        let book_update = Self::snapshot_of(&self.symbol, &state);
        drop(state);

        Execution { book_update, trades }
    }

    /// Current top of book
    pub fn snapshot(&self) -> BookUpdate {
        let state = self.state.lock();
        Self::snapshot_of(&self.symbol, &state)
    }

    /// Aggregated levels per side, best first: `(bids, asks)`
    pub fn depth(&self, num_levels: usize) -> (Vec<PriceQty>, Vec<PriceQty>) {
        let state = self.state.lock();
        (state.bids.depth(num_levels), state.asks.depth(num_levels))
    }

    pub fn best_bid(&self) -> PriceQty {
        self.state.lock().bids.top_of_book()
    }

    pub fn best_ask(&self) -> PriceQty {
        self.state.lock().asks.top_of_book()
    }

    pub fn last_trade_price(&self) -> Option<Price> {
        self.state.lock().last_trade_price
    }

    /// Number of resting orders on `side`
    pub fn resting_orders(&self, side: Side) -> usize {
        let state = self.state.lock();
        let book_side = match side {
            Side::Buy => &state.bids,
            Side::Sell => &state.asks,
        };
        book_side.order_count()
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn algorithm_name(&self) -> &str {
        self.algorithm.name()
    }

    fn snapshot_of(symbol: &str, state: &BookState) -> BookUpdate {
        BookUpdate {
            ts: now_nanos(),
            symbol: symbol.to_string(),
            best_bid: state.bids.top_of_book(),
            best_ask: state.asks.top_of_book(),
            last_trade_price: state.last_trade_price,
        }
    }
}
