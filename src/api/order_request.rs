// ============================================================================
// Order Request
// Inbound order as received from a client, validated into an `Order`
// ============================================================================

use crate::domain::{ExchangeConfig, Order, OrderType, Side, Timestamp};
use crate::numeric::{Price, Quantity};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a request never reached a book
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("id required")]
    MissingId,

    #[error("qty must be > 0")]
    NonPositiveQuantity,

    #[error("qty must be a multiple of lot size {lot}")]
    OffLotSize { lot: Quantity },

    #[error("side must be buy|sell")]
    InvalidSide { side: String },

    #[error("price required for limit")]
    MissingLimitPrice,

    #[error("price must be a multiple of tick size {tick}")]
    OffTickSize { tick: Price },

    #[error("cancel not supported")]
    CancelNotSupported,

    #[error("type must be limit|market|cancel")]
    InvalidOrderType { order_type: String },
}

/// Loosely typed order as it arrives on the wire.
///
/// Every field is optional in JSON; missing ones take their zero value and
/// are caught by [`OrderRequest::into_order`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct OrderRequest {
    pub id: String,
    pub ts: Timestamp,
    pub symbol: String,
    /// `"buy"` or `"sell"`
    pub side: String,
    /// `"limit"`, `"market"` or `"cancel"`
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub order_type: String,
    pub price: Price,
    pub qty: Quantity,
}

impl OrderRequest {
    pub fn limit(id: &str, side: Side, price: Price, qty: Quantity) -> Self {
        Self {
            id: id.to_string(),
            side: side.as_str().to_string(),
            order_type: OrderType::Limit.as_str().to_string(),
            price,
            qty,
            ..Self::default()
        }
    }

    pub fn market(id: &str, side: Side, qty: Quantity) -> Self {
        Self {
            id: id.to_string(),
            side: side.as_str().to_string(),
            order_type: OrderType::Market.as_str().to_string(),
            qty,
            ..Self::default()
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Validate and default the request into an order a book can take.
    ///
    /// An empty symbol becomes `config.default_symbol`. A zero `ts` is kept
    /// and stamped by the book. Checks run in a fixed order so a request
    /// with several problems always reports the same one.
    pub fn into_order(self, config: &ExchangeConfig) -> Result<Order, RejectReason> {
        let symbol = if self.symbol.is_empty() {
            config.default_symbol.clone()
        } else {
            self.symbol
        };

        if self.id.is_empty() {
            return Err(RejectReason::MissingId);
        }

        if !self.qty.is_positive() {
            return Err(RejectReason::NonPositiveQuantity);
        }
        if let Some(lot) = config.lot_size {
            if !self.qty.is_multiple_of(lot) {
                return Err(RejectReason::OffLotSize { lot });
            }
        }

        let side: Side = self
            .side
            .parse()
            .map_err(|_| RejectReason::InvalidSide { side: self.side.clone() })?;

        let order_type = match self.order_type.parse::<OrderType>() {
            Ok(OrderType::Limit) => {
                if !self.price.is_positive() {
                    return Err(RejectReason::MissingLimitPrice);
                }
                if let Some(tick) = config.tick_size {
                    if !self.price.is_multiple_of(tick) {
                        return Err(RejectReason::OffTickSize { tick });
                    }
                }
                OrderType::Limit
            },
            Ok(OrderType::Market) => OrderType::Market,
            Ok(OrderType::Cancel) => return Err(RejectReason::CancelNotSupported),
            Err(()) => {
                return Err(RejectReason::InvalidOrderType {
                    order_type: self.order_type,
                })
            },
        };

        Ok(Order::new(self.id, side, order_type, self.price, self.qty)
            .with_symbol(symbol)
            .with_ts(self.ts))
    }
}
