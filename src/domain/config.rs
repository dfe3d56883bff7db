// ============================================================================
// Exchange Configuration
// Settings for the order boundary and the per-symbol book registry
// ============================================================================

use crate::numeric::{Price, Quantity};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Symbol assigned to requests that arrive without one
pub const DEFAULT_SYMBOL: &str = "TEST";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("default symbol cannot be empty")]
    EmptyDefaultSymbol,
    #[error("tick size must be positive")]
    NonPositiveTickSize,
    #[error("lot size must be positive")]
    NonPositiveLotSize,
}

/// Exchange-wide configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct ExchangeConfig {
    /// Symbol used when a request leaves it empty
    pub default_symbol: String,

    /// Optional: Price tick size (minimum price increment)
    /// None means no tick size enforcement
    pub tick_size: Option<Price>,

    /// Optional: Lot size (minimum quantity increment)
    /// None means no lot size enforcement
    pub lot_size: Option<Quantity>,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            default_symbol: DEFAULT_SYMBOL.to_string(),
            tick_size: None,
            lot_size: None,
        }
    }
}

impl ExchangeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: Set the symbol for requests without one
    pub fn with_default_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.default_symbol = symbol.into();
        self
    }

    /// Builder method: Set price tick size
    pub fn with_tick_size(mut self, tick: Price) -> Self {
        self.tick_size = Some(tick);
        self
    }

    /// Builder method: Set lot size
    pub fn with_lot_size(mut self, lot: Quantity) -> Self {
        self.lot_size = Some(lot);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_symbol.is_empty() {
            return Err(ConfigError::EmptyDefaultSymbol);
        }

        if self.tick_size.is_some_and(|tick| !tick.is_positive()) {
            return Err(ConfigError::NonPositiveTickSize);
        }

        if self.lot_size.is_some_and(|lot| !lot.is_positive()) {
            return Err(ConfigError::NonPositiveLotSize);
        }

        Ok(())
    }
}
