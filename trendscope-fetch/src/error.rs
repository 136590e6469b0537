//! Fetch error types.

use thiserror::Error;

/// Error type for transport operations.
///
/// Retryable HTTP outcomes (rate limits, redirects) never show up here; the
/// transport absorbs them and returns the final body. Only hard faults and
/// programmer errors surface as a `FetchError`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The descriptor's URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value is not valid HTTP.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The request body could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTTP client could not be constructed.
    #[error("Client error: {0}")]
    Client(String),
}

impl FetchError {
    /// Returns true if this is a network-level fault rather than a
    /// malformed request.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}
