// ============================================================================
// TMA-GAME-SDK - Configuration
// ============================================================================
// Per-project SDK configuration. Immutable once the facade is built.
//
// ```json
// {
//   "projectId": "yescoin",
//   "ui": {
//     "manifestUrl": "https://www.yescoin.gold/tonconnect-manifest.json",
//     "actionsConfiguration": {
//       "twaReturnUrl": "https://t.me/theYescoin_bot/Yescoin"
//     }
//   },
//   "api": { "baseUrl": "https://api.example.com", "timeoutSeconds": 15 }
// }
// ```
// ============================================================================

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::SdkError;
use crate::Result;

/// Collection address used until a project's real address is resolved.
pub const PLACEHOLDER_COLLECTION_ADDRESS: &str = "UQAS9XVpwZM_wGDVCR08CXS5wTDaNZXv02mBNcW3tVi0r6Oh";

/// SDK configuration for one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkConfig {
    /// Project identifier used to scope payments and API calls
    pub project_id: String,

    /// Wallet connection UI options
    pub ui: TonConnectUiOptions,

    /// Project backend; payments that need a server are unavailable without it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiConfig>,

    /// Overrides the collection address for TON payments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_address: Option<String>,
}

/// Options handed to the wallet connector on init
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TonConnectUiOptions {
    /// Public URL of the TonConnect manifest describing the app
    pub manifest_url: String,

    #[serde(default)]
    pub actions_configuration: ActionsConfiguration,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionsConfiguration {
    /// Where the wallet sends the user back to after an action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twa_return_url: Option<String>,
}

/// Project backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    pub base_url: String,

    /// Request timeout in seconds.
    ///
    /// Default: `30`
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    30
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl SdkConfig {
    pub fn new(project_id: impl Into<String>, manifest_url: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ui: TonConnectUiOptions {
                manifest_url: manifest_url.into(),
                actions_configuration: ActionsConfiguration::default(),
            },
            api: None,
            collection_address: None,
        }
    }

    /// Configuration of the Yescoin game
    pub fn yescoin() -> Self {
        Self::new("yescoin", "https://www.yescoin.gold/tonconnect-manifest.json")
            .with_return_url("https://t.me/theYescoin_bot/Yescoin")
    }

    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.ui.actions_configuration.twa_return_url = Some(url.into());
        self
    }

    pub fn with_api(mut self, api: ApiConfig) -> Self {
        self.api = Some(api);
        self
    }

    pub fn with_collection_address(mut self, address: impl Into<String>) -> Self {
        self.collection_address = Some(address.into());
        self
    }

    /// Parse a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SdkConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check required fields and URL syntax
    pub fn validate(&self) -> Result<()> {
        if self.project_id.trim().is_empty() {
            return Err(SdkError::Config("projectId is empty".to_string()));
        }

        Url::parse(&self.ui.manifest_url)?;

        if let Some(return_url) = &self.ui.actions_configuration.twa_return_url {
            Url::parse(return_url)?;
        }

        if let Some(api) = &self.api {
            let base = Url::parse(&api.base_url)?;
            if base.cannot_be_a_base() {
                return Err(SdkError::Config(format!(
                    "api.baseUrl cannot be a base URL: {}",
                    api.base_url
                )));
            }
            if api.timeout_seconds == 0 {
                return Err(SdkError::Config("api.timeoutSeconds must be positive".to_string()));
            }
        }

        if matches!(&self.collection_address, Some(a) if a.trim().is_empty()) {
            return Err(SdkError::Config("collectionAddress is empty".to_string()));
        }

        Ok(())
    }
}
