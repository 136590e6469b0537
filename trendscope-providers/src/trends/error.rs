//! Trends error types.

use thiserror::Error;
use trendscope_fetch::FetchError;

/// Structural failure while decoding a response envelope.
///
/// Each variant names the decode stage that failed. Malformed individual
/// rows never produce one of these; they degrade to default field values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Text at the given stage is not valid JSON.
    #[error("invalid {stage} JSON: {message}")]
    InvalidJson {
        /// Decode stage (`envelope`, `nested`, `autocomplete`).
        stage: &'static str,
        /// Parser message.
        message: String,
    },

    /// The outer envelope is not a non-empty array.
    #[error("empty array")]
    EmptyArray,

    /// No string at `[0][2]` of the envelope.
    #[error("missing nested JSON")]
    MissingNestedJson,

    /// The nested document is not an array with a row set at `[1]`.
    #[error("missing data array")]
    MissingDataArray,
}

impl DecodeError {
    pub(crate) fn json(stage: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |e| Self::InvalidJson {
            stage,
            message: e.to_string(),
        }
    }
}

/// Errors returned by [`TrendsClient`](super::TrendsClient) calls.
#[derive(Debug, Error)]
pub enum TrendsError {
    /// Connection, DNS, or other transport failure.
    #[error("Network error: {0}")]
    Network(String),

    /// The response could not be reduced to the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A required input was empty or malformed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Anything else.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl TrendsError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "NetworkError",
            Self::Parse(_) => "ParseError",
            Self::InvalidRequest(_) => "InvalidRequestError",
            Self::Unknown(_) => "UnknownError",
        }
    }
}

impl From<FetchError> for TrendsError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Http(e) => Self::Network(e.to_string()),
            FetchError::InvalidUrl(_) | FetchError::InvalidHeader(_) | FetchError::Json(_) => {
                Self::InvalidRequest(err.to_string())
            }
            FetchError::Client(_) => Self::Unknown(err.to_string()),
        }
    }
}

impl From<DecodeError> for TrendsError {
    fn from(err: DecodeError) -> Self {
        Self::Parse(err.to_string())
    }
}
