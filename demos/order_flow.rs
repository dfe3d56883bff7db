// ============================================================================
// Order Flow Example
// JSON order requests in, book updates and trades out
// ============================================================================

use l1_book::prelude::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const REQUESTS: &[&str] = &[
    r#"{"id":"s1","symbol":"BTC-USD","side":"sell","type":"limit","price":50100,"qty":2}"#,
    r#"{"id":"s2","symbol":"BTC-USD","side":"sell","type":"limit","price":50000,"qty":1.5}"#,
    r#"{"id":"b1","symbol":"BTC-USD","side":"buy","type":"limit","price":49900,"qty":1}"#,
    r#"{"id":"b2","symbol":"BTC-USD","side":"buy","type":"market","qty":2.5}"#,
    r#"{"id":"b3","side":"buy","type":"limit","qty":1}"#,
    r#"{"id":"x1","symbol":"BTC-USD","side":"sell","type":"cancel","qty":1}"#,
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Order Flow Example ===\n");

    let broadcaster = Arc::new(ChannelBroadcaster::new());
    let events = broadcaster.subscribe();
    let exchange = Exchange::new(ExchangeConfig::default(), broadcaster)?;

    for raw in REQUESTS {
        println!("-> {raw}");
        let request: OrderRequest = serde_json::from_str(raw)?;

        match exchange.submit(request) {
            Ok(execution) => println!("<- {}", serde_json::to_string(&execution)?),
            Err(reason) => println!("<- rejected: {reason}"),
        }

        for event in events.try_iter() {
            println!("   event {}", serde_json::to_string(&event)?);
        }
        println!();
    }

    println!("=== Depth ===");
    let book = exchange.book("BTC-USD");
    let (bids, asks) = book.depth(5);
    println!("\nBids:");
    for level in &bids {
        println!("  {} @ {}", level.qty, level.price);
    }
    println!("\nAsks:");
    for level in &asks {
        println!("  {} @ {}", level.qty, level.price);
    }

    if let Some(last) = book.last_trade_price() {
        println!("\nLast trade: {last}");
    }

    Ok(())
}
