// ============================================================================
// TMA-GAME-SDK - Telegram Stars Payments
// ============================================================================
// Stars invoices are created server-side, so this dispatcher only asks the
// project backend for an invoice link and hands it back. Opening the link is
// up to the caller.
// ============================================================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::ApiClient;
use crate::error::SdkError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarInvoiceRequest {
    pub title: String,
    pub description: String,

    /// Opaque payload echoed back by Telegram on successful payment
    pub payload: String,

    /// Price in Stars
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarInvoice {
    pub invoice_link: String,
}

/// Project-scoped Stars dispatcher
#[derive(Debug, Clone)]
pub struct StarPayment {
    project_id: String,
    api: Option<Arc<ApiClient>>,
}

impl StarPayment {
    pub fn new(project_id: impl Into<String>, api: Option<Arc<ApiClient>>) -> Self {
        Self {
            project_id: project_id.into(),
            api,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Whether a backend is configured to create invoices
    pub fn is_available(&self) -> bool {
        self.api.is_some()
    }

    pub async fn pay(&self, invoice: &StarInvoiceRequest) -> Result<StarInvoice> {
        if invoice.amount == 0 {
            return Err(SdkError::invalid_argument("Stars amount must be positive"));
        }
        if invoice.title.trim().is_empty() {
            return Err(SdkError::invalid_argument("invoice title is empty"));
        }

        let api = self.api.as_ref().ok_or_else(|| {
            SdkError::NotConfigured(format!(
                "Stars payments for project {} need an API backend",
                self.project_id
            ))
        })?;

        info!(project_id = %self.project_id, amount = invoice.amount, "Stars payment");
        api.create_star_invoice(invoice).await
    }
}
