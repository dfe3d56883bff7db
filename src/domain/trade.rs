// ============================================================================
// Trade Domain Model
// ============================================================================

use crate::numeric::{NumericResult, Price, Quantity};

use super::{OrderId, Side, Timestamp};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One fill between a resting (maker) order and the incoming (taker) order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Trade {
    /// Time of this individual fill
    pub ts: Timestamp,

    pub symbol: String,

    /// Execution price, always the maker level's price
    pub price: Price,

    /// Executed quantity
    pub qty: Quantity,

    /// Side of the incoming order
    pub aggressor_side: Side,

    /// Order ID of the passive order (resting in book)
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "OrderId::is_empty")
    )]
    pub maker_order_id: OrderId,

    /// Order ID of the aggressive order (incoming)
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "OrderId::is_empty")
    )]
    pub taker_order_id: OrderId,
}

impl Trade {
    pub fn new(
        ts: Timestamp,
        symbol: String,
        price: Price,
        qty: Quantity,
        aggressor_side: Side,
        maker_order_id: OrderId,
        taker_order_id: OrderId,
    ) -> Self {
        Self {
            ts,
            symbol,
            price,
            qty,
            aggressor_side,
            maker_order_id,
            taker_order_id,
        }
    }

    /// Notional value of the fill (price × quantity) as a decimal.
    ///
    /// Fails only if the product leaves the decimal range.
    pub fn notional_value(&self) -> NumericResult<rust_decimal::Decimal> {
        self.price
            .to_decimal()
            .checked_mul(self.qty.to_decimal())
            .ok_or(crate::numeric::NumericError::Overflow)
    }
}
