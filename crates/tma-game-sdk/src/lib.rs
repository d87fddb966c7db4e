// ============================================================================
// TMA-GAME-SDK - Game Client SDK
// ============================================================================
// Web-side SDK for Telegram Mini App games.
//
// Features:
// - Wallet client over a TonConnect-style connector (init once, shutdown)
// - TON payments to the project's collection address
// - Telegram Stars invoices through the project backend
// - Project-scoped API client
// - Launch-state accessors when a host bridge is supplied
//
// Payment confirmation is not tracked here: the wallet's answer is returned
// and settlement is verified server-side.
// ============================================================================

pub mod api;
pub mod config;
pub mod error;
pub mod payment;
pub mod sdk;
pub mod transfer;
pub mod wallet;

pub use api::{ApiClient, ProjectSettings};
pub use config::{
    ActionsConfiguration, ApiConfig, SdkConfig, TonConnectUiOptions,
    PLACEHOLDER_COLLECTION_ADDRESS,
};
pub use error::SdkError;
pub use payment::{StarInvoice, StarInvoiceRequest, StarPayment, TonPayment};
pub use sdk::{GameClientSdk, Payments, SdkBuilder};
pub use transfer::{to_nano, TransferMessage, TransferRequest, TRANSFER_VALIDITY_SECS};
pub use wallet::{TransactionReceipt, WalletClient, WalletConnector};

/// Re-export for connector implementations
pub use async_trait::async_trait;

/// Re-export for convenience
pub type Result<T> = std::result::Result<T, SdkError>;
