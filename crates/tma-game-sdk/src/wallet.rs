// ============================================================================
// TMA-GAME-SDK - Wallet Client
// ============================================================================
// Thin client over a TonConnect-style wallet connector. The connector does
// the real work (connection UI, signing, broadcasting); this client owns its
// lifecycle and forwards transfer requests without retry or polling.
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::TonConnectUiOptions;
use crate::error::SdkError;
use crate::transfer::TransferRequest;
use crate::Result;

/// What the wallet returns for a signed and sent transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    /// Signed external message, base64 bag-of-cells
    pub boc: String,
}

/// The wallet connection library as seen by the SDK.
///
/// Implementations wrap TonConnect UI in the browser, or a fake in tests.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Apply UI options; called exactly once, before anything else
    async fn configure(&self, options: &TonConnectUiOptions) -> Result<()>;

    /// Open the connection flow
    async fn connect(&self) -> Result<()>;

    async fn disconnect(&self) -> Result<()>;

    fn is_connected(&self) -> bool;

    /// Connected account address, if any
    fn account_address(&self) -> Option<String>;

    /// Ask the wallet to sign and send. Resolves when the wallet answers.
    async fn send_transaction(&self, request: &TransferRequest) -> Result<TransactionReceipt>;

    /// Drop listeners and pending requests
    async fn release(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalletState {
    Uninitialized,
    Ready,
    ShutDown,
}

/// Wallet client shared by the payment dispatchers
pub struct WalletClient {
    connector: Arc<dyn WalletConnector>,
    options: TonConnectUiOptions,
    state: RwLock<WalletState>,
}

impl WalletClient {
    pub fn new(connector: Arc<dyn WalletConnector>, options: TonConnectUiOptions) -> Self {
        Self {
            connector,
            options,
            state: RwLock::new(WalletState::Uninitialized),
        }
    }

    pub fn options(&self) -> &TonConnectUiOptions {
        &self.options
    }

    /// Configure the connector. Only the first call does anything; later
    /// calls fail with [`SdkError::AlreadyInitialized`].
    pub async fn init(&self) -> Result<()> {
        let mut state = self.state.write().await;
        match *state {
            WalletState::Ready => return Err(SdkError::AlreadyInitialized),
            WalletState::ShutDown => return Err(SdkError::ShutDown),
            WalletState::Uninitialized => {}
        }

        info!(manifest_url = %self.options.manifest_url, "Initializing wallet connector");
        self.connector.configure(&self.options).await?;
        *state = WalletState::Ready;
        Ok(())
    }

    pub async fn is_initialized(&self) -> bool {
        *self.state.read().await == WalletState::Ready
    }

    /// `false` before init, after shutdown, or when no wallet is connected
    pub async fn is_connected(&self) -> bool {
        self.is_initialized().await && self.connector.is_connected()
    }

    /// Connected account address; `None` whenever [`is_connected`](Self::is_connected) is false
    pub async fn address(&self) -> Option<String> {
        if !self.is_connected().await {
            return None;
        }
        self.connector.account_address().filter(|a| !a.is_empty())
    }

    pub async fn connect(&self) -> Result<()> {
        self.ensure_ready().await?;
        info!("Opening wallet connection");
        self.connector.connect().await
    }

    pub async fn disconnect(&self) -> Result<()> {
        self.ensure_ready().await?;
        info!("Disconnecting wallet");
        self.connector.disconnect().await
    }

    /// Hand a transfer to the wallet and return its answer unchanged.
    ///
    /// Requests with no messages, an unparseable amount or a `valid_until`
    /// already in the past never reach the connector.
    pub async fn send_transfer_with_comment(
        &self,
        request: TransferRequest,
    ) -> Result<TransactionReceipt> {
        self.ensure_ready().await?;

        if request.messages.is_empty() {
            return Err(SdkError::invalid_argument("transfer has no messages"));
        }
        if request.is_expired() {
            return Err(SdkError::invalid_argument(format!(
                "transfer expired at {}",
                request.valid_until
            )));
        }
        let total = request.total_nanotons()?;

        debug!(
            valid_until = request.valid_until,
            messages = request.messages.len(),
            nanotons = %total,
            "Sending transfer to wallet"
        );

        match self.connector.send_transaction(&request).await {
            Ok(receipt) => {
                info!("Wallet accepted transfer");
                Ok(receipt)
            }
            Err(e) => {
                warn!("Wallet transfer failed: {}", e);
                Err(e)
            }
        }
    }

    /// Release the connector. Safe to call more than once.
    pub async fn shutdown(&self) {
        let mut state = self.state.write().await;
        if *state == WalletState::Ready {
            self.connector.release().await;
            info!("Wallet connector released");
        }
        *state = WalletState::ShutDown;
    }

    async fn ensure_ready(&self) -> Result<()> {
        match *self.state.read().await {
            WalletState::Ready => Ok(()),
            WalletState::Uninitialized => Err(SdkError::WalletNotInitialized),
            WalletState::ShutDown => Err(SdkError::ShutDown),
        }
    }
}

impl std::fmt::Debug for WalletClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletClient")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
