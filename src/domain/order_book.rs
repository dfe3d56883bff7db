// ============================================================================
// Order Book Domain Model
// Price levels, side ledgers and the top-of-book snapshot
// ============================================================================

use crate::numeric::{Price, Quantity};
use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use super::{Order, OrderId, Side, Timestamp};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Price Level
// ============================================================================

/// Resting orders at one price, in arrival order
#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: Price,
    orders: VecDeque<Order>,
    /// Raw sum of `remaining()` over `orders`, wide enough that no number of
    /// resting orders can overflow it
    total_raw: i128,
}

impl PriceLevel {
    pub fn new(price: Price) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
            total_raw: 0,
        }
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Oldest resting order, if any.
    pub fn peek_front(&self) -> Option<&Order> {
        self.orders.front()
    }

    /// Take up to `quantity` from the oldest order only.
    ///
    /// Returns the quantity actually taken and the maker's id. The front
    /// order leaves the level once it is fully consumed.
    pub fn consume_front(&mut self, quantity: Quantity) -> Option<(Quantity, OrderId)> {
        let front = self.orders.front_mut()?;
        let taken = front.fill(quantity);
        self.total_raw -= i128::from(taken.raw_value());

        let maker_id = if front.is_filled() {
            self.orders.pop_front()?.id
        } else {
            front.id.clone()
        };
        Some((taken, maker_id))
    }

    /// Enqueue at the back. The caller guarantees the order is priced at this
    /// level and has quantity left.
    pub fn append(&mut self, order: Order) {
        debug_assert_eq!(order.price, self.price);
        debug_assert!(order.remaining().is_positive());
        self.total_raw += i128::from(order.remaining().raw_value());
        self.orders.push_back(order);
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Resting quantity at this price.
    ///
    /// Clamped to [`Quantity::MAX`] while the true total is beyond what a
    /// `Quantity` can hold; exact again once the level drains below it.
    pub fn total_quantity(&self) -> Quantity {
        Quantity::from_raw(i64::try_from(self.total_raw).unwrap_or(i64::MAX))
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Resting orders, oldest first.
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }
}

// ============================================================================
// Book Side
// ============================================================================

/// Heap of level prices ordered so the best price is on top
#[derive(Debug, Clone)]
enum Priorities {
    /// Highest bid first
    Bids(BinaryHeap<Price>),
    /// Lowest ask first
    Asks(BinaryHeap<Reverse<Price>>),
}

impl Priorities {
    fn peek(&self) -> Option<Price> {
        match self {
            Priorities::Bids(heap) => heap.peek().copied(),
            Priorities::Asks(heap) => heap.peek().map(|Reverse(price)| *price),
        }
    }

    fn push(&mut self, price: Price) {
        match self {
            Priorities::Bids(heap) => heap.push(price),
            Priorities::Asks(heap) => heap.push(Reverse(price)),
        }
    }

    /// Drop the best price, which must be `price`
    fn pop_best(&mut self, price: Price) {
        debug_assert_eq!(self.peek(), Some(price));
        match self {
            Priorities::Bids(heap) => {
                heap.pop();
            },
            Priorities::Asks(heap) => {
                heap.pop();
            },
        }
    }
}

/// One side of the book (bids or asks).
///
/// Levels live in a price index; a heap over the same prices gives the best
/// price in O(1). A price is in the heap iff it is in the index iff its level
/// still holds orders.
#[derive(Debug, Clone)]
pub struct BookSide {
    side: Side,
    priorities: Priorities,
    levels: HashMap<Price, PriceLevel>,
}

impl BookSide {
    pub fn new(side: Side) -> Self {
        let priorities = match side {
            Side::Buy => Priorities::Bids(BinaryHeap::new()),
            Side::Sell => Priorities::Asks(BinaryHeap::new()),
        };
        Self {
            side,
            priorities,
            levels: HashMap::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Get the best (top-of-book) price
    pub fn best_price(&self) -> Option<Price> {
        self.priorities.peek()
    }

    /// Get the best price level
    pub fn best_level(&self) -> Option<&PriceLevel> {
        self.best_price().and_then(|price| self.levels.get(&price))
    }

    pub fn best_level_mut(&mut self) -> Option<&mut PriceLevel> {
        let price = self.best_price()?;
        self.levels.get_mut(&price)
    }

    /// Existing level at `price`, or a new empty one registered in both the
    /// heap and the index.
    pub fn get_or_create_level(&mut self, price: Price) -> &mut PriceLevel {
        match self.levels.entry(price) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                tracing::trace!(side = %self.side, %price, "price level created");
                self.priorities.push(price);
                entry.insert(PriceLevel::new(price))
            },
        }
    }

    /// Drop the best level if it sits at `price` and has no orders left.
    ///
    /// Matching only ever drains the best level, so any other price is left
    /// alone.
    pub fn remove_level_if_empty(&mut self, price: Price) -> bool {
        if self.best_price() != Some(price) {
            return false;
        }
        if !self.levels.get(&price).is_some_and(PriceLevel::is_empty) {
            return false;
        }
        self.levels.remove(&price);
        self.priorities.pop_best(price);
        tracing::trace!(side = %self.side, %price, "price level removed");
        true
    }

    /// Best price with the quantity resting there, or [`PriceQty::EMPTY`].
    pub fn top_of_book(&self) -> PriceQty {
        self.best_level()
            .map(|level| PriceQty::new(level.price(), level.total_quantity()))
            .unwrap_or(PriceQty::EMPTY)
    }

    /// Aggregated levels, best first, at most `num_levels` of them.
    pub fn depth(&self, num_levels: usize) -> Vec<PriceQty> {
        let mut prices: Vec<Price> = self.levels.keys().copied().collect();
        match self.side {
            Side::Buy => prices.sort_unstable_by(|a, b| b.cmp(a)),
            Side::Sell => prices.sort_unstable(),
        }
        prices
            .into_iter()
            .take(num_levels)
            .filter_map(|price| self.levels.get(&price))
            .map(|level| PriceQty::new(level.price(), level.total_quantity()))
            .collect()
    }

    pub fn level(&self, price: Price) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    /// Number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Number of resting orders across all levels
    pub fn order_count(&self) -> usize {
        self.levels.values().map(PriceLevel::order_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

// ============================================================================
// Book Update (top-of-book snapshot)
// ============================================================================

/// A price and the quantity available there. `{0, 0}` stands for an empty side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PriceQty {
    pub price: Price,
    pub qty: Quantity,
}

impl PriceQty {
    pub const EMPTY: Self = Self {
        price: Price::ZERO,
        qty: Quantity::ZERO,
    };

    pub fn new(price: Price, qty: Quantity) -> Self {
        Self { price, qty }
    }

    pub fn is_empty(&self) -> bool {
        self.qty.is_zero()
    }
}

/// Point-in-time top of book for one symbol
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct BookUpdate {
    pub ts: Timestamp,
    pub symbol: String,
    pub best_bid: PriceQty,
    pub best_ask: PriceQty,
    /// `None` until the first trade on this book
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub last_trade_price: Option<Price>,
}

impl BookUpdate {
    /// Ask minus bid, when both sides have liquidity
    pub fn spread(&self) -> Option<Price> {
        if self.best_bid.is_empty() || self.best_ask.is_empty() {
            return None;
        }
        self.best_ask.price.checked_sub(self.best_bid.price).ok()
    }
}
