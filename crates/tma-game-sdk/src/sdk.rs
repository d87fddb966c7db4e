// ============================================================================
// TMA-GAME-SDK - SDK Facade
// ============================================================================
// Composition root: one configuration in, a wallet client and both payment
// dispatchers out. The wallet is initialized before any dispatcher exists.
// ============================================================================

use std::sync::Arc;

use tma_bridge::{HostBridge, MiniAppClient};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::config::{SdkConfig, PLACEHOLDER_COLLECTION_ADDRESS};
use crate::error::SdkError;
use crate::payment::{StarPayment, TonPayment};
use crate::wallet::{WalletClient, WalletConnector};
use crate::Result;

/// The two payment rails. They share no state.
#[derive(Debug, Clone)]
pub struct Payments {
    pub ton: TonPayment,
    pub star: StarPayment,
}

/// Game client SDK for one project
pub struct GameClientSdk {
    config: SdkConfig,
    wallet: Arc<WalletClient>,
    payments: Payments,
    api: Option<Arc<ApiClient>>,
    mini_app: Option<MiniAppClient>,
}

impl GameClientSdk {
    /// Build with defaults: no host bridge, collection address from config or placeholder.
    pub async fn new(config: SdkConfig, connector: Arc<dyn WalletConnector>) -> Result<Self> {
        SdkBuilder::new(config).connector(connector).build().await
    }

    pub fn builder(config: SdkConfig) -> SdkBuilder {
        SdkBuilder::new(config)
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn project_id(&self) -> &str {
        &self.config.project_id
    }

    pub fn wallet(&self) -> &Arc<WalletClient> {
        &self.wallet
    }

    pub fn payments(&self) -> &Payments {
        &self.payments
    }

    /// Project backend client, when `api` is configured
    pub fn api(&self) -> Option<&Arc<ApiClient>> {
        self.api.as_ref()
    }

    /// Launch-state accessors, when built with a host bridge
    pub fn mini_app(&self) -> Option<&MiniAppClient> {
        self.mini_app.as_ref()
    }

    /// Release the wallet connector. Payments fail with [`SdkError::ShutDown`] afterwards.
    pub async fn shutdown(&self) {
        info!(project_id = %self.config.project_id, "Shutting down game client SDK");
        self.wallet.shutdown().await;
    }
}

impl std::fmt::Debug for GameClientSdk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameClientSdk")
            .field("project_id", &self.config.project_id)
            .field("collection_address", &self.payments.ton.collection_address())
            .field("api", &self.api.is_some())
            .field("mini_app", &self.mini_app.is_some())
            .finish()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for [`GameClientSdk`]
pub struct SdkBuilder {
    config: SdkConfig,
    connector: Option<Arc<dyn WalletConnector>>,
    host: Option<Arc<dyn HostBridge>>,
}

impl SdkBuilder {
    pub fn new(config: SdkConfig) -> Self {
        Self {
            config,
            connector: None,
            host: None,
        }
    }

    /// Wallet connection library (required)
    pub fn connector(mut self, connector: Arc<dyn WalletConnector>) -> Self {
        self.connector = Some(connector);
        self
    }

    /// Telegram host bridge, enabling [`GameClientSdk::mini_app`]
    pub fn host(mut self, host: Arc<dyn HostBridge>) -> Self {
        self.host = Some(host);
        self
    }

    /// Build using the configured collection address, or the placeholder.
    pub async fn build(self) -> Result<GameClientSdk> {
        self.build_inner(false).await
    }

    /// Like [`build`](Self::build), but ask the project backend for the
    /// collection address when the configuration has none. Lookup failures
    /// fall back to the placeholder.
    pub async fn build_resolved(self) -> Result<GameClientSdk> {
        self.build_inner(true).await
    }

    async fn build_inner(self, resolve: bool) -> Result<GameClientSdk> {
        let SdkBuilder {
            config,
            connector,
            host,
        } = self;

        config.validate()?;
        let connector =
            connector.ok_or_else(|| SdkError::NotConfigured("wallet connector".to_string()))?;

        let api = match &config.api {
            Some(api_config) => Some(Arc::new(ApiClient::new(api_config, &config.project_id)?)),
            None => None,
        };

        let wallet = Arc::new(WalletClient::new(connector, config.ui.clone()));
        wallet.init().await?;

        let collection_address = match &config.collection_address {
            Some(address) => address.clone(),
            None if resolve => resolve_collection_address(api.as_deref()).await,
            None => PLACEHOLDER_COLLECTION_ADDRESS.to_string(),
        };

        let payments = Payments {
            ton: TonPayment::with_collection_address(
                &config.project_id,
                wallet.clone(),
                collection_address,
            ),
            star: StarPayment::new(&config.project_id, api.clone()),
        };

        info!(
            project_id = %config.project_id,
            collection_address = %payments.ton.collection_address(),
            stars = payments.star.is_available(),
            "Game client SDK ready"
        );

        Ok(GameClientSdk {
            mini_app: host.map(MiniAppClient::new),
            config,
            wallet,
            payments,
            api,
        })
    }
}

async fn resolve_collection_address(api: Option<&ApiClient>) -> String {
    let Some(api) = api else {
        warn!("No API configured, using placeholder collection address");
        return PLACEHOLDER_COLLECTION_ADDRESS.to_string();
    };

    match api.project_settings().await {
        Ok(settings) => match settings.collection_address.filter(|a| !a.is_empty()) {
            Some(address) => address,
            None => {
                warn!("Project has no collection address, using placeholder");
                PLACEHOLDER_COLLECTION_ADDRESS.to_string()
            }
        },
        Err(e) => {
            warn!("Collection address lookup failed, using placeholder: {}", e);
            PLACEHOLDER_COLLECTION_ADDRESS.to_string()
        }
    }
}
