// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod broadcaster;
mod event_handler;
mod matching_algorithm;

pub use broadcaster::ChannelBroadcaster;
pub use event_handler::{EventHandler, LoggingEventHandler, MarketEvent, NoOpEventHandler};
pub use matching_algorithm::MatchingAlgorithm;
