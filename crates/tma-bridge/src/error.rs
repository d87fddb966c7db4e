//! Bridge Error Types
//!
//! Errors raised while talking to the Mini App host or decoding what it sends back.

use serde::{Deserialize, Serialize};

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Bridge Error Types
///
/// These errors are serializable so they can be handed back across the host
/// boundary (or to the embedding application) as structured values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "type", content = "message")]
pub enum Error {
    /// The host bridge object is missing or refused the call
    #[error("Host bridge unavailable: {0}")]
    BridgeUnavailable(String),

    /// The host returned a payload that does not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid input parameter
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A permission request of the same kind is still waiting for its callback
    #[error("Request already pending: {0}")]
    RequestPending(String),

    /// The host invoked a callback name this relay does not know
    #[error("Unknown callback: {0}")]
    UnknownCallback(String),
}

impl Error {
    /// Create a bridge-unavailable error with context
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Error::BridgeUnavailable(msg.into())
    }

    /// Create a parse error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create an invalid-argument error with context
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Whether retrying the same call later can succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::BridgeUnavailable(_) | Error::RequestPending(_))
    }

    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Error::BridgeUnavailable(_) => "TMA_BRIDGE_UNAVAILABLE",
            Error::Parse(_) => "TMA_PARSE",
            Error::InvalidArgument(_) => "TMA_INVALID_ARGUMENT",
            Error::RequestPending(_) => "TMA_REQUEST_PENDING",
            Error::UnknownCallback(_) => "TMA_UNKNOWN_CALLBACK",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Parse(e.to_string())
    }
}
