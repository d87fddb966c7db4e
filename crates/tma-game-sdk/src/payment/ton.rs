// ============================================================================
// TMA-GAME-SDK - TON Payments
// ============================================================================
// TON payments through the connected wallet. One single-message transfer per
// call, to the project's collection address unless the caller names one.
// ============================================================================

use std::sync::Arc;

use tracing::info;

use crate::config::PLACEHOLDER_COLLECTION_ADDRESS;
use crate::transfer::{to_nano, TransferRequest};
use crate::wallet::{TransactionReceipt, WalletClient};
use crate::Result;

/// Sends TON to the project's collection address (or an explicit one).
#[derive(Debug, Clone)]
pub struct TonPayment {
    project_id: String,
    collection_address: String,
    wallet: Arc<WalletClient>,
}

impl TonPayment {
    /// Dispatcher paying into the placeholder collection address
    pub fn new(project_id: impl Into<String>, wallet: Arc<WalletClient>) -> Self {
        Self::with_collection_address(project_id, wallet, PLACEHOLDER_COLLECTION_ADDRESS)
    }

    pub fn with_collection_address(
        project_id: impl Into<String>,
        wallet: Arc<WalletClient>,
        collection_address: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            collection_address: collection_address.into(),
            wallet,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Address used when `pay` gets none
    pub fn collection_address(&self) -> &str {
        &self.collection_address
    }

    pub fn wallet(&self) -> &Arc<WalletClient> {
        &self.wallet
    }

    /// Build the single-message transfer for `ton_amount` TON, valid for ten minutes.
    pub fn build_request(
        &self,
        ton_amount: f64,
        comment: Option<&str>,
        address: Option<&str>,
    ) -> Result<TransferRequest> {
        let nanotons = to_nano(ton_amount)?;
        let address = address.unwrap_or(self.collection_address.as_str());
        Ok(TransferRequest::single(
            address,
            nanotons,
            comment.map(str::to_string),
        ))
    }

    /// Pay `ton_amount` TON. The wallet's answer (or failure) is returned as-is.
    pub async fn pay(
        &self,
        ton_amount: f64,
        comment: Option<&str>,
        address: Option<&str>,
    ) -> Result<TransactionReceipt> {
        let request = self.build_request(ton_amount, comment, address)?;
        info!(
            project_id = %self.project_id,
            to = %request.messages[0].address,
            nanotons = %request.messages[0].amount,
            "TON payment"
        );
        self.wallet.send_transfer_with_comment(request).await
    }
}
