//! Property-based tests for order book matching using `proptest`.
//! Random order flow is checked against book invariants and a naive
//! list-scanning reference book.

use super::OrderBook;
use crate::domain::{Order, PriceQty, Side};
use crate::numeric::{Price, Quantity};
use proptest::prelude::*;
use std::cmp::Reverse;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct Submission {
    side: Side,
    market: bool,
    price: i64,
    qty: i64,
}

impl Submission {
    fn to_order(&self, id: &str) -> Order {
        let qty = Quantity::from_integer(self.qty).unwrap();
        if self.market {
            Order::market(id, self.side, qty)
        } else {
            Order::limit(id, self.side, Price::from_integer(self.price).unwrap(), qty)
        }
    }
}

fn submission() -> impl Strategy<Value = Submission> {
    (any::<bool>(), prop::bool::weighted(0.2), 95i64..=105, 1i64..=10).prop_map(
        |(buy, market, price, qty)| Submission {
            side: if buy { Side::Buy } else { Side::Sell },
            market,
            price,
            qty,
        },
    )
}

#[derive(Debug, Clone)]
struct Resting {
    id: String,
    price: i64,
    seq: usize,
    qty: i64,
}

/// Reference book: flat lists, best order found by scanning
#[derive(Default)]
struct ReferenceBook {
    bids: Vec<Resting>,
    asks: Vec<Resting>,
    seq: usize,
}

impl ReferenceBook {
    /// Returns fills as `(maker id, price, qty)`
    fn submit(&mut self, id: &str, s: &Submission) -> Vec<(String, i64, i64)> {
        let mut remaining = s.qty;
        let mut fills = Vec::new();
        let opposite = match s.side {
            Side::Buy => &mut self.asks,
            Side::Sell => &mut self.bids,
        };

        while remaining > 0 {
            let best = match s.side {
                Side::Buy => opposite
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, r)| (r.price, r.seq))
                    .map(|(i, _)| i),
                Side::Sell => opposite
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, r)| (Reverse(r.price), r.seq))
                    .map(|(i, _)| i),
            };
            let Some(idx) = best else { break };

            let maker = &mut opposite[idx];
            let crosses = s.market
                || match s.side {
                    Side::Buy => maker.price <= s.price,
                    Side::Sell => maker.price >= s.price,
                };
            if !crosses {
                break;
            }

            let filled = remaining.min(maker.qty);
            fills.push((maker.id.clone(), maker.price, filled));
            maker.qty -= filled;
            remaining -= filled;
            if maker.qty == 0 {
                opposite.remove(idx);
            }
        }

        if !s.market && remaining > 0 {
            self.seq += 1;
            let resting = Resting {
                id: id.to_string(),
                price: s.price,
                seq: self.seq,
                qty: remaining,
            };
            match s.side {
                Side::Buy => self.bids.push(resting),
                Side::Sell => self.asks.push(resting),
            }
        }
        fills
    }

    fn depth(&self) -> (Vec<PriceQty>, Vec<PriceQty>) {
        fn aggregate(orders: &[Resting]) -> BTreeMap<i64, i64> {
            let mut levels = BTreeMap::new();
            for r in orders {
                *levels.entry(r.price).or_insert(0) += r.qty;
            }
            levels
        }
        let to_pq = |(price, qty): (&i64, &i64)| {
            PriceQty::new(
                Price::from_integer(*price).unwrap(),
                Quantity::from_integer(*qty).unwrap(),
            )
        };
        let bids = aggregate(&self.bids).iter().rev().map(to_pq).collect();
        let asks = aggregate(&self.asks).iter().map(to_pq).collect();
        (bids, asks)
    }
}

fn total(levels: &[PriceQty]) -> Quantity {
    levels.iter().fold(Quantity::ZERO, |acc, l| acc.saturating_add(l.qty))
}

proptest! {
    #[test]
    fn matches_reference_book(flow in prop::collection::vec(submission(), 1..120)) {
        let book = OrderBook::new("PROP");
        let mut reference = ReferenceBook::default();

        for (i, s) in flow.iter().enumerate() {
            let id = format!("o{i}");
            let execution = book.submit(s.to_order(&id));
            let expected = reference.submit(&id, s);

            let actual: Vec<(String, i64, i64)> = execution
                .trades
                .iter()
                .map(|t| {
                    (
                        t.maker_order_id.as_str().to_string(),
                        t.price.raw_value() / Price::SCALE,
                        t.qty.raw_value() / Quantity::SCALE,
                    )
                })
                .collect();
            prop_assert_eq!(actual, expected);
            prop_assert_eq!(book.depth(usize::MAX), reference.depth());
        }
    }

    #[test]
    fn quantity_is_conserved(flow in prop::collection::vec(submission(), 1..120)) {
        let book = OrderBook::new("PROP");
        let mut submitted = Quantity::ZERO;
        let mut traded = Quantity::ZERO;
        let mut dropped = Quantity::ZERO;

        for (i, s) in flow.iter().enumerate() {
            let order = s.to_order(&format!("o{i}"));
            submitted = submitted.saturating_add(order.remaining());

            let execution = book.submit(order);
            let filled = execution.filled_quantity();
            traded = traded.saturating_add(filled);
            if s.market {
                let qty = Quantity::from_integer(s.qty).unwrap();
                dropped = dropped.saturating_add(qty.saturating_sub(filled));
            }
        }

        // every traded unit leaves one maker and one taker
        let (bids, asks) = book.depth(usize::MAX);
        let resting = total(&bids).saturating_add(total(&asks));
        let accounted = traded
            .saturating_add(traded)
            .saturating_add(resting)
            .saturating_add(dropped);
        prop_assert_eq!(submitted, accounted);
    }

    #[test]
    fn book_never_crossed_and_levels_never_empty(flow in prop::collection::vec(submission(), 1..120)) {
        let book = OrderBook::new("PROP");

        for (i, s) in flow.iter().enumerate() {
            let update = book.submit(s.to_order(&format!("o{i}"))).book_update;

            if !update.best_bid.is_empty() && !update.best_ask.is_empty() {
                prop_assert!(update.best_bid.price < update.best_ask.price);
            }

            let (bids, asks) = book.depth(usize::MAX);
            prop_assert!(bids.iter().chain(asks.iter()).all(|l| l.qty.is_positive()));
            prop_assert_eq!(bids.first().copied().unwrap_or(PriceQty::EMPTY), update.best_bid);
            prop_assert_eq!(asks.first().copied().unwrap_or(PriceQty::EMPTY), update.best_ask);
        }
    }

    #[test]
    fn fills_walk_away_from_the_touch(flow in prop::collection::vec(submission(), 1..120)) {
        let book = OrderBook::new("PROP");

        for (i, s) in flow.iter().enumerate() {
            let execution = book.submit(s.to_order(&format!("o{i}")));
            let limit = Price::from_integer(s.price).unwrap();

            for pair in execution.trades.windows(2) {
                match s.side {
                    Side::Buy => prop_assert!(pair[0].price <= pair[1].price),
                    Side::Sell => prop_assert!(pair[0].price >= pair[1].price),
                }
            }
            for trade in &execution.trades {
                prop_assert_eq!(trade.aggressor_side, s.side);
                prop_assert!(trade.qty.is_positive());
                if !s.market {
                    match s.side {
                        Side::Buy => prop_assert!(trade.price <= limit),
                        Side::Sell => prop_assert!(trade.price >= limit),
                    }
                }
            }
            if let Some(last) = execution.trades.last() {
                prop_assert_eq!(execution.book_update.last_trade_price, Some(last.price));
            }
        }
    }

    #[test]
    fn snapshot_is_idempotent(flow in prop::collection::vec(submission(), 0..60)) {
        let book = OrderBook::new("PROP");
        for (i, s) in flow.iter().enumerate() {
            book.submit(s.to_order(&format!("o{i}")));
        }

        let first = book.snapshot();
        let second = book.snapshot();
        prop_assert_eq!(first.best_bid, second.best_bid);
        prop_assert_eq!(first.best_ask, second.best_ask);
        prop_assert_eq!(first.last_trade_price, second.last_trade_price);
    }
}
