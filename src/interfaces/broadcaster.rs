// ============================================================================
// Channel Broadcaster
// Fans market events out to in-process subscribers
// ============================================================================

use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;

use super::{EventHandler, MarketEvent};

/// Delivers every event to every live subscriber.
///
/// A subscriber whose receiver has been dropped is removed on the next
/// delivery.
#[derive(Default)]
pub struct ChannelBroadcaster {
    subscribers: Mutex<Vec<Sender<MarketEvent>>>,
}

impl ChannelBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber. Events published before this call are not
    /// replayed.
    pub fn subscribe(&self) -> Receiver<MarketEvent> {
        let (tx, rx) = channel::unbounded();
        self.subscribers.lock().push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    fn deliver(subscribers: &mut Vec<Sender<MarketEvent>>, event: &MarketEvent) {
        let before = subscribers.len();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        let dropped = before - subscribers.len();
        if dropped > 0 {
            tracing::debug!(dropped, "removed disconnected subscribers");
        }
    }
}

impl EventHandler for ChannelBroadcaster {
    fn on_event(&self, event: MarketEvent) {
        Self::deliver(&mut self.subscribers.lock(), &event);
    }

    fn on_events(&self, events: Vec<MarketEvent>) {
        // One lock for the batch keeps a submission's events contiguous
        let mut subscribers = self.subscribers.lock();
        for event in &events {
            Self::deliver(&mut subscribers, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookUpdate, PriceQty};

    fn update(ts: i64) -> MarketEvent {
        MarketEvent::BookUpdate(BookUpdate {
            ts,
            symbol: "X".to_string(),
            best_bid: PriceQty::EMPTY,
            best_ask: PriceQty::EMPTY,
            last_trade_price: None,
        })
    }

    #[test]
    fn test_fan_out_to_all_subscribers() {
        let broadcaster = ChannelBroadcaster::new();
        let a = broadcaster.subscribe();
        let b = broadcaster.subscribe();

        broadcaster.on_events(vec![update(1), update(2)]);

        assert_eq!(a.try_iter().collect::<Vec<_>>(), vec![update(1), update(2)]);
        assert_eq!(b.try_iter().collect::<Vec<_>>(), vec![update(1), update(2)]);
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let broadcaster = ChannelBroadcaster::new();
        let kept = broadcaster.subscribe();
        drop(broadcaster.subscribe());
        assert_eq!(broadcaster.subscriber_count(), 2);

        broadcaster.on_event(update(1));

        assert_eq!(broadcaster.subscriber_count(), 1);
        assert_eq!(kept.try_recv().unwrap(), update(1));
    }

    #[test]
    fn test_no_replay_for_late_subscriber() {
        let broadcaster = ChannelBroadcaster::new();
        broadcaster.on_event(update(1));

        let late = broadcaster.subscribe();
        assert!(late.try_recv().is_err());
    }
}
