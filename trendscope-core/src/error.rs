//! Core error types for Trendscope.

use thiserror::Error;

/// Core error type for Trendscope model operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid data in a decoded model.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
