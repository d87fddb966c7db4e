//! TMA Demo - Simulated Mini App Session
//!
//! Wires the game-side bridge to the web-side SDK the way a WebGL build does
//! inside Telegram: the game calls `BridgeActions`, the host runs wallet and
//! permission commands against `GameClientSdk`, and results come back through
//! the callback relay.
//!
//! ```bash
//! RUST_LOG=tma_demo=debug cargo run -p tma-demo -- [config.json]
//! ```

mod host;
mod wallet;

use std::sync::Arc;

use anyhow::Context;
use tma_bridge::{
    BridgeActions, HapticStyle, HostBridge, OpenLinkOptions, RequestedContact, ShareStoryParams,
};
use tma_game_sdk::{GameClientSdk, SdkConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::host::{run_host_loop, LaunchData, SimulatedHost};
use crate::wallet::SimulatedWallet;

const DEMO_WALLET: &str = "UQBvW8Z5huBkMJYdnfAEM5JqTNkuWX3diqYENkWsIL0XggGG";
const TIP_JAR: &str = "EQD4FPq-PRDieyQKkizFTRtSDyucUIqrj0v_zXJmqaDp6_0t";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tma_demo=debug,tma_bridge=info,tma_game_sdk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting TMA demo...");

    let config = load_config()?;
    let wallet = Arc::new(SimulatedWallet::new(DEMO_WALLET));
    let (host, commands) = SimulatedHost::new(LaunchData::sample(), wallet.clone());
    let host: Arc<dyn HostBridge> = Arc::new(host);

    let sdk = Arc::new(
        GameClientSdk::builder(config)
            .connector(wallet.clone())
            .host(host.clone())
            .build_resolved()
            .await
            .context("building game client SDK")?,
    );

    let (relay, mut actions) = tma_bridge::init(host);
    let host_loop = tokio::spawn(run_host_loop(commands, sdk.clone(), relay.clone()));

    // Game-side listeners, next to the ones BridgeActions keeps for logging
    let _contact = relay.contact().subscribe(|contact: &RequestedContact| {
        tracing::info!(
            "Game received contact {} for user {}",
            contact.contact.phone_number,
            contact.contact.user_id
        );
    });
    let _clipboard = relay.clipboard_text().subscribe(|text: &String| {
        tracing::info!("Game received promo code {}", text);
    });

    play(&actions)?;
    actions.close()?;
    host_loop.await.context("host loop panicked")?;

    // A host that sends garbage is reported, not fatal
    if let Err(e) = relay.dispatch("OnRequestContact", "{\"contact\":") {
        tracing::warn!(code = e.code(), "Malformed callback rejected: {}", e);
    }

    let last_recipient = wallet
        .last_signed()
        .and_then(|request| request.messages.first().map(|m| m.address.clone()));
    tracing::info!(
        wallet = ?actions.wallet_address(),
        transfers = wallet.signed_count(),
        last_recipient = ?last_recipient,
        "Session finished"
    );

    actions.detach();
    sdk.shutdown().await;
    Ok(())
}

fn load_config() -> anyhow::Result<SdkConfig> {
    let Some(path) = std::env::args().nth(1) else {
        tracing::info!("No config file given, using yescoin configuration");
        return Ok(SdkConfig::yescoin());
    };

    let json =
        std::fs::read_to_string(&path).with_context(|| format!("reading config {}", path))?;
    let config =
        SdkConfig::from_json(&json).with_context(|| format!("parsing config {}", path))?;
    tracing::info!(project_id = %config.project_id, "Loaded config from {}", path);
    Ok(config)
}

/// What a game session does through the bridge
fn play(actions: &BridgeActions) -> anyhow::Result<()> {
    actions.expand_viewport()?;
    actions.set_header_color("#17212b")?;
    actions.set_background_color("#17212b")?;
    actions.disable_vertical_swipes()?;
    actions.enable_closing_confirmation()?;

    actions.connect_wallet()?;
    actions.pay_with_ton(None, 0.1, "yescoin: 100 coins")?;
    actions.pay_with_ton(Some(TIP_JAR), 0.05, "tip")?;

    actions.request_write_access()?;
    actions.request_phone_access()?;
    actions.request_contact()?;
    actions.read_text_from_clipboard()?;
    actions.request_emoji_status_access()?;
    actions.set_emoji_status("5368324170671202286", 3600)?;

    actions.request_vibration(HapticStyle::Medium)?;
    actions.share_url("https://t.me/theYescoin_bot/Yescoin", "Swipe with me")?;
    actions.open_link("https://www.yescoin.gold", OpenLinkOptions::default())?;
    actions.share_story(&ShareStoryParams {
        media_url: "https://www.yescoin.gold/story.png".to_string(),
        text: "My swipe record".to_string(),
        widget_link_url: "https://t.me/theYescoin_bot/Yescoin".to_string(),
        widget_link_name: "Play Yescoin".to_string(),
    })?;

    Ok(())
}
