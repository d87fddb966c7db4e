//! Simulated TonConnect wallet
//!
//! Approves every transfer immediately and remembers what it signed.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tma_game_sdk::{
    SdkError, TonConnectUiOptions, TransactionReceipt, TransferRequest, WalletConnector,
};

pub struct SimulatedWallet {
    address: String,
    connected: AtomicBool,
    released: AtomicBool,
    signed: Mutex<Vec<TransferRequest>>,
}

impl SimulatedWallet {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            connected: AtomicBool::new(false),
            released: AtomicBool::new(false),
            signed: Mutex::new(Vec::new()),
        }
    }

    pub fn signed_count(&self) -> usize {
        self.signed.lock().len()
    }

    /// Most recent transfer the wallet signed
    pub fn last_signed(&self) -> Option<TransferRequest> {
        self.signed.lock().last().cloned()
    }
}

#[async_trait]
impl WalletConnector for SimulatedWallet {
    async fn configure(&self, options: &TonConnectUiOptions) -> tma_game_sdk::Result<()> {
        tracing::debug!(
            manifest_url = %options.manifest_url,
            return_url = ?options.actions_configuration.twa_return_url,
            "Wallet UI configured"
        );
        Ok(())
    }

    async fn connect(&self) -> tma_game_sdk::Result<()> {
        self.connected.store(true, Ordering::SeqCst);
        tracing::info!("Wallet connected: {}", self.address);
        Ok(())
    }

    async fn disconnect(&self) -> tma_game_sdk::Result<()> {
        self.connected.store(false, Ordering::SeqCst);
        tracing::info!("Wallet disconnected");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn account_address(&self) -> Option<String> {
        self.is_connected().then(|| self.address.clone())
    }

    async fn send_transaction(
        &self,
        request: &TransferRequest,
    ) -> tma_game_sdk::Result<TransactionReceipt> {
        if self.released.load(Ordering::SeqCst) {
            return Err(SdkError::wallet("connector released"));
        }
        if !self.is_connected() {
            return Err(SdkError::wallet("Wallet was not connected"));
        }

        let mut signed = self.signed.lock();
        signed.push(request.clone());
        Ok(TransactionReceipt {
            boc: format!("te6cc-demo-{}-{}", chrono::Utc::now().timestamp(), signed.len()),
        })
    }

    async fn release(&self) {
        self.released.store(true, Ordering::SeqCst);
        self.connected.store(false, Ordering::SeqCst);
    }
}
