// ============================================================================
// TMA-GAME-SDK - Error Types
// ============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    // ==================== Argument Errors ====================
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ==================== Wallet Errors ====================
    #[error("Wallet not initialized")]
    WalletNotInitialized,

    #[error("Wallet already initialized")]
    AlreadyInitialized,

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("SDK has been shut down")]
    ShutDown,

    // ==================== Network Errors ====================
    #[error("Network request failed: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    // ==================== Configuration Errors ====================
    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // ==================== Internal Errors ====================
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SdkError {
    /// Get error code for the embedding application
    pub fn code(&self) -> &'static str {
        match self {
            SdkError::InvalidArgument(_) => "SDK_INVALID_ARGUMENT",
            SdkError::WalletNotInitialized => "SDK_WALLET_NOT_INITIALIZED",
            SdkError::AlreadyInitialized => "SDK_ALREADY_INITIALIZED",
            SdkError::Wallet(_) => "SDK_WALLET",
            SdkError::ShutDown => "SDK_SHUT_DOWN",
            SdkError::Network(_) => "SDK_NETWORK",
            SdkError::Timeout => "SDK_TIMEOUT",
            SdkError::Api { .. } => "SDK_API",
            SdkError::NotConfigured(_) => "SDK_NOT_CONFIGURED",
            SdkError::Config(_) => "SDK_CONFIG",
            SdkError::Serialization(_) => "SDK_SERIALIZATION",
        }
    }

    /// Check if the caller may retry the same operation
    pub fn is_recoverable(&self) -> bool {
        match self {
            SdkError::Network(_) | SdkError::Timeout => true,
            SdkError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        SdkError::InvalidArgument(msg.into())
    }

    pub fn wallet(msg: impl Into<String>) -> Self {
        SdkError::Wallet(msg.into())
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SdkError::Timeout
        } else {
            SdkError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for SdkError {
    fn from(err: url::ParseError) -> Self {
        SdkError::Config(format!("invalid URL: {}", err))
    }
}
