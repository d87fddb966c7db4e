// ============================================================================
// TMA-GAME-SDK - Project API Client
// ============================================================================
// HTTP client for the project backend: per-project settings and Stars
// invoice creation. Every call is scoped by the configured project id.
// ============================================================================

use std::time::Duration;

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::config::ApiConfig;
use crate::error::SdkError;
use crate::payment::{StarInvoice, StarInvoiceRequest};
use crate::Result;

// ============================================================================
// DATA TYPES
// ============================================================================

/// Settings the backend keeps for a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    /// Address TON payments are collected at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default, alias = "error")]
    message: Option<String>,
}

// ============================================================================
// API CLIENT
// ============================================================================

/// Client for one project's backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    project_id: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, project_id: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(SdkError::Config(format!(
                "API base URL cannot be a base: {}",
                config.base_url
            )));
        }

        let timeout = Duration::from_secs(config.timeout_seconds);
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SdkError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            project_id: project_id.into(),
            timeout,
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// `{base}/projects/{projectId}/{segments...}`, with each segment escaped
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .push("projects")
                .push(&self.project_id)
                .extend(segments);
        }
        url
    }

    // ==================== Project ====================

    /// Fetch the project's settings
    pub async fn project_settings(&self) -> Result<ProjectSettings> {
        let url = self.endpoint(&["settings"]);
        debug!("Fetching project settings: {}", url);

        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    // ==================== Payments ====================

    /// Create a Telegram Stars invoice link
    pub async fn create_star_invoice(&self, request: &StarInvoiceRequest) -> Result<StarInvoice> {
        let url = self.endpoint(&["payments", "star"]);
        debug!(amount = request.amount, "Creating Stars invoice: {}", url);

        let response = self
            .http
            .post(url)
            .json(request)
            .timeout(self.timeout)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or(text);

        warn!(status = status.as_u16(), "Project API error: {}", message);
        Err(SdkError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
