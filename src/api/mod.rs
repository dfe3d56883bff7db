// ============================================================================
// API Module
// Client-facing order boundary: parsing, validation and defaulting
// ============================================================================

mod order_request;

pub use order_request::{OrderRequest, RejectReason};
