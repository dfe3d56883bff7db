// ============================================================================
// Price/Time Priority Matching Algorithm (FIFO)
// ============================================================================

use crate::domain::{now_nanos, BookSide, Order, OrderType, Trade};
use crate::interfaces::MatchingAlgorithm;

/// Price/Time Priority (FIFO) matching algorithm
///
/// Levels are visited best price first and never skipped; inside a level
/// resting orders fill strictly in arrival order. Each fill is stamped with
/// its own time.
///
/// # Example
/// ```text
/// Book:  50 @ 3 (Order A, first)
///        50 @ 4 (Order B, second)
///
/// Incoming: Sell 5 @ 50
/// Result: 3 with A, then 2 with B; B rests with 2
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct PriceTimePriority;

impl PriceTimePriority {
    pub fn new() -> Self {
        Self
    }
}

impl MatchingAlgorithm for PriceTimePriority {
    fn match_order(&self, incoming_order: &mut Order, opposite_side: &mut BookSide) -> Vec<Trade> {
        let mut trades = Vec::new();

        if !matches!(incoming_order.order_type, OrderType::Limit | OrderType::Market) {
            return trades;
        }

        while incoming_order.remaining().is_positive() {
            let Some(best_level) = opposite_side.best_level_mut() else {
                break;
            };
            let level_price = best_level.price();

            if !self.prices_cross(incoming_order, level_price) {
                break;
            }

            // Drain the level front to back until either side runs out
            while incoming_order.remaining().is_positive() {
                let Some((filled, maker_order_id)) =
                    best_level.consume_front(incoming_order.remaining())
                else {
                    break;
                };
                incoming_order.fill(filled);

                trades.push(Trade::new(
                    now_nanos(),
                    incoming_order.symbol.clone(),
                    level_price,
                    filled,
                    incoming_order.side,
                    maker_order_id,
                    incoming_order.id.clone(),
                ));
            }

            opposite_side.remove_level_if_empty(level_price);
        }

        trades
    }

    fn name(&self) -> &str {
        "PriceTime"
    }
}
