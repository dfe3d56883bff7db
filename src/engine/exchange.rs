// ============================================================================
// Exchange
// Per-symbol book registry and order dispatch
// ============================================================================

use crate::api::{OrderRequest, RejectReason};
use crate::domain::{ConfigError, ExchangeConfig, Order};
use crate::interfaces::{EventHandler, MarketEvent, NoOpEventHandler};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::{Execution, OrderBook};

/// Owns one [`OrderBook`] per symbol and routes orders to them.
///
/// Books are created on first use and never removed. Two threads racing on
/// a new symbol still end up sharing a single book.
pub struct Exchange {
    config: ExchangeConfig,

    books: RwLock<HashMap<String, Arc<OrderBook>>>,

    /// Receives the events of every submission
    event_handler: Arc<dyn EventHandler>,
}

impl Exchange {
    pub fn new(
        config: ExchangeConfig,
        event_handler: Arc<dyn EventHandler>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            books: RwLock::new(HashMap::new()),
            event_handler,
        })
    }

    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// The book for `symbol`, created if this is its first use
    pub fn book(&self, symbol: &str) -> Arc<OrderBook> {
        if let Some(book) = self.books.read().get(symbol) {
            return Arc::clone(book);
        }

        let mut books = self.books.write();
        let book = books.entry(symbol.to_string()).or_insert_with(|| {
            tracing::info!(symbol, "creating order book");
            Arc::new(OrderBook::new(symbol))
        });
        Arc::clone(book)
    }

    /// The book for `symbol` if one exists; never creates
    pub fn get_book(&self, symbol: &str) -> Option<Arc<OrderBook>> {
        self.books.read().get(symbol).cloned()
    }

    /// Symbols with a book, sorted
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.books.read().keys().cloned().collect();
        symbols.sort_unstable();
        symbols
    }

    /// Validate a client request and submit it.
    ///
    /// Rejected requests touch no book and publish no events.
    pub fn submit(&self, request: OrderRequest) -> Result<Execution, RejectReason> {
        let order = request.into_order(&self.config).map_err(|reason| {
            tracing::warn!(%reason, "order rejected");
            reason
        })?;
        Ok(self.submit_order(order))
    }

    /// Route an already valid order to its book and publish the outcome.
    ///
    /// An order without a symbol goes to the configured default symbol.
    pub fn submit_order(&self, mut order: Order) -> Execution {
        if order.symbol.is_empty() {
            order.symbol = self.config.default_symbol.clone();
        }

        let execution = self.book(&order.symbol).submit(order);

        self.event_handler
            .on_events(MarketEvent::for_submission(&execution.trades, &execution.book_update));

        execution
    }
}

impl Default for Exchange {
    fn default() -> Self {
        Self {
            config: ExchangeConfig::default(),
            books: RwLock::new(HashMap::new()),
            event_handler: Arc::new(NoOpEventHandler),
        }
    }
}
