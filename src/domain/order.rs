// ============================================================================
// Order Domain Model
// ============================================================================

use crate::numeric::{Price, Quantity};
use chrono::Utc;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Nanoseconds since the Unix epoch. Zero means "not set".
pub type Timestamp = i64;

/// Current wall-clock time in nanoseconds.
pub fn now_nanos() -> Timestamp {
    Utc::now().timestamp_nanos_opt().unwrap_or_default()
}

// ============================================================================
// Value Objects
// ============================================================================

/// Caller-assigned order identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }

    pub fn opposite(&self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum OrderType {
    Limit,
    Market,
    /// Reserved. Reaching a book it matches nothing and rests nothing.
    Cancel,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "limit",
            OrderType::Market => "market",
            OrderType::Cancel => "cancel",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "limit" => Ok(OrderType::Limit),
            "market" => Ok(OrderType::Market),
            "cancel" => Ok(OrderType::Cancel),
            _ => Err(()),
        }
    }
}

// ============================================================================
// Order Entity
// ============================================================================

/// One order submitted to a book.
///
/// `qty` is the remaining quantity: it starts at the submitted size and is
/// only ever reduced by fills. Once it reaches zero the order is done and
/// must not stay in any price level.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Order {
    pub id: OrderId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ts: Timestamp,
    #[cfg_attr(feature = "serde", serde(default))]
    pub symbol: String,
    pub side: Side,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub order_type: OrderType,
    /// Limit price. Ignored for market orders.
    #[cfg_attr(feature = "serde", serde(default))]
    pub price: Price,
    #[cfg_attr(feature = "serde", serde(rename = "qty"))]
    remaining: Quantity,
}

impl Order {
    pub fn new(
        id: impl Into<OrderId>,
        side: Side,
        order_type: OrderType,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            id: id.into(),
            ts: 0,
            symbol: String::new(),
            side,
            order_type,
            price,
            remaining: quantity,
        }
    }

    pub fn limit(id: impl Into<OrderId>, side: Side, price: Price, quantity: Quantity) -> Self {
        Self::new(id, side, OrderType::Limit, price, quantity)
    }

    pub fn market(id: impl Into<OrderId>, side: Side, quantity: Quantity) -> Self {
        Self::new(id, side, OrderType::Market, Price::ZERO, quantity)
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    pub fn with_ts(mut self, ts: Timestamp) -> Self {
        self.ts = ts;
        self
    }

    pub fn remaining(&self) -> Quantity {
        self.remaining
    }

    pub fn is_filled(&self) -> bool {
        !self.remaining.is_positive()
    }

    /// Fill up to `quantity`, returning how much was actually taken.
    ///
    /// Never takes more than what remains, so `remaining` cannot go negative.
    pub fn fill(&mut self, quantity: Quantity) -> Quantity {
        let taken = quantity.min(self.remaining);
        if !taken.is_positive() {
            return Quantity::ZERO;
        }
        self.remaining = self.remaining.saturating_sub(taken);
        taken
    }

    pub fn is_market_order(&self) -> bool {
        matches!(self.order_type, OrderType::Market)
    }

    pub fn is_limit_order(&self) -> bool {
        matches!(self.order_type, OrderType::Limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qty(n: i64) -> Quantity {
        Quantity::from_integer(n).unwrap()
    }

    #[test]
    fn test_order_creation() {
        let order = Order::limit("o1", Side::Buy, Price::from_integer(100).unwrap(), qty(10))
            .with_symbol("X");

        assert_eq!(order.remaining(), qty(10));
        assert_eq!(order.symbol, "X");
        assert_eq!(order.ts, 0);
        assert!(order.is_limit_order());
        assert!(!order.is_filled());
    }

    #[test]
    fn test_fill_caps_at_remaining() {
        let mut order = Order::market("o1", Side::Sell, qty(5));

        assert_eq!(order.fill(qty(3)), qty(3));
        assert_eq!(order.remaining(), qty(2));

        assert_eq!(order.fill(qty(10)), qty(2));
        assert_eq!(order.remaining(), Quantity::ZERO);
        assert!(order.is_filled());

        assert_eq!(order.fill(qty(1)), Quantity::ZERO);
    }

    #[test]
    fn test_parse_side_and_type() {
        assert_eq!("buy".parse::<Side>(), Ok(Side::Buy));
        assert_eq!("sell".parse::<Side>(), Ok(Side::Sell));
        assert!("BUY".parse::<Side>().is_err());
        assert_eq!("cancel".parse::<OrderType>(), Ok(OrderType::Cancel));
        assert!("stop".parse::<OrderType>().is_err());
        assert_eq!(Side::Buy.opposite(), Side::Sell);
    }

    #[test]
    fn test_now_nanos_is_set() {
        assert!(now_nanos() > 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_order_wire_shape() {
        let order: Order = serde_json::from_str(
            r#"{"id":"a1","side":"sell","type":"limit","price":101.5,"qty":3}"#,
        )
        .unwrap();

        assert_eq!(order.id.as_str(), "a1");
        assert_eq!(order.ts, 0);
        assert!(order.symbol.is_empty());
        assert_eq!(order.side, Side::Sell);
        assert_eq!(order.price, "101.5".parse().unwrap());
        assert_eq!(order.remaining(), qty(3));

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["type"], "limit");
        assert_eq!(json["qty"], 3.0);
    }
}
