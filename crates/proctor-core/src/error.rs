//! Delivery error types.
//!
//! These error types represent failures when handing a report to a delivery
//! collaborator. Defined in `proctor-core` so the dispatcher can downcast
//! and classify failures for its fallback decision without string matching.

use thiserror::Error;

/// Errors that can occur when delivering a report.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The request timed out client-side.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
}
