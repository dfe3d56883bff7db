// ============================================================================
// Event Handler Interface
// Receives the output of every submission for fan-out to listeners
// ============================================================================

use crate::domain::{BookUpdate, Trade};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events published after each submission.
///
/// On the wire this is the envelope `{"eventType": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "eventType", content = "data", rename_all = "snake_case")
)]
pub enum MarketEvent {
    /// Top of book after the submission
    BookUpdate(BookUpdate),

    /// All fills of one submission, in execution order
    Trades(Vec<Trade>),
}

impl MarketEvent {
    /// Events for one submission: the book update always, then the trades
    /// batch when anything traded.
    pub fn for_submission(trades: &[Trade], update: &BookUpdate) -> Vec<MarketEvent> {
        let mut events = vec![MarketEvent::BookUpdate(update.clone())];
        if !trades.is_empty() {
            events.push(MarketEvent::Trades(trades.to_vec()));
        }
        events
    }
}

/// Event handler trait for processing matching engine events
/// Implementations can handle logging, fan-out to subscribers, etc.
pub trait EventHandler: Send + Sync {
    /// Handle a market event
    fn on_event(&self, event: MarketEvent);

    /// Batch event handler
    fn on_events(&self, events: Vec<MarketEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler for testing
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: MarketEvent) {}
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: MarketEvent) {
        match &event {
            MarketEvent::BookUpdate(update) => tracing::debug!(
                symbol = %update.symbol,
                bid = %update.best_bid.price,
                bid_qty = %update.best_bid.qty,
                ask = %update.best_ask.price,
                ask_qty = %update.best_ask.qty,
                "book update"
            ),
            MarketEvent::Trades(trades) => {
                for trade in trades {
                    tracing::debug!(
                        symbol = %trade.symbol,
                        price = %trade.price,
                        qty = %trade.qty,
                        aggressor = %trade.aggressor_side,
                        maker = %trade.maker_order_id,
                        taker = %trade.taker_order_id,
                        "trade"
                    );
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PriceQty, Side};
    use crate::numeric::{Price, Quantity};

    fn update() -> BookUpdate {
        BookUpdate {
            ts: 1,
            symbol: "X".to_string(),
            best_bid: PriceQty::EMPTY,
            best_ask: PriceQty::EMPTY,
            last_trade_price: None,
        }
    }

    fn trade() -> Trade {
        Trade::new(
            2,
            "X".to_string(),
            Price::from_integer(100).unwrap(),
            Quantity::ONE,
            Side::Buy,
            "m".into(),
            "t".into(),
        )
    }

    #[test]
    fn test_submission_events_skip_empty_trades() {
        let events = MarketEvent::for_submission(&[], &update());
        assert_eq!(events, vec![MarketEvent::BookUpdate(update())]);

        let events = MarketEvent::for_submission(&[trade()], &update());
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], MarketEvent::Trades(ref t) if t.len() == 1));
    }

    #[test]
    fn test_noop_and_logging_handlers() {
        NoOpEventHandler.on_events(MarketEvent::for_submission(&[trade()], &update()));
        LoggingEventHandler.on_events(MarketEvent::for_submission(&[trade()], &update()));
        // Should not panic
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_event_envelope() {
        let json = serde_json::to_value(MarketEvent::BookUpdate(update())).unwrap();
        assert_eq!(json["eventType"], "book_update");
        assert_eq!(json["data"]["symbol"], "X");

        let json = serde_json::to_value(MarketEvent::Trades(vec![trade()])).unwrap();
        assert_eq!(json["eventType"], "trades");
        assert_eq!(json["data"][0]["makerOrderId"], "m");
    }
}
