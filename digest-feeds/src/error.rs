//! Error types for feed fetching

use thiserror::Error;

/// Errors that can occur while fetching a single feed
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed (includes connect errors and timeouts)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Feed host returned a non-success status
    #[error("Feed error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Body was neither RSS nor Atom
    #[error("Parse error: {0}")]
    ParseError(String),
}
