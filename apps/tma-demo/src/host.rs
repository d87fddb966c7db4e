//! Simulated Telegram host
//!
//! Answers launch-state queries from fixed data, logs UI commands, and queues
//! wallet and permission commands for the host loop, which runs them against
//! the game client SDK and answers through the callback relay.

use std::sync::Arc;

use tma_bridge::{
    CallbackKind, CallbackRelay, Error as BridgeError, HapticStyle, HostBridge, OpenLinkOptions,
    ShareStoryParams,
};
use tma_game_sdk::{GameClientSdk, WalletConnector};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::wallet::SimulatedWallet;

/// Work the host finishes asynchronously
#[derive(Debug)]
pub enum HostCommand {
    ConnectWallet,
    DisconnectWallet,
    PayWithTon {
        address: Option<String>,
        amount: f64,
        comment: String,
    },
    Permission(CallbackKind),
    SetEmojiStatus { custom_emoji_id: String, duration_secs: u32 },
    Close,
}

pub struct LaunchData {
    pub user_info: String,
    pub launch_params: String,
    pub start_param: String,
    pub init_data_raw: String,
}

impl LaunchData {
    pub fn sample() -> Self {
        let user = serde_json::json!({
            "id": 5_123_456_789_i64,
            "firstName": "Yes",
            "lastName": "Player",
            "username": "yesplayer",
            "isPremium": true,
            "languageCode": "en",
            "allowsWriteToPm": true
        });
        let launch = serde_json::json!({
            "platform": "tdesktop",
            "version": "8.0",
            "startParam": "ref_demo",
            "themeParams": { "bg_color": "#17212b", "header_bg_color": "#17212b" }
        });
        Self {
            user_info: user.to_string(),
            launch_params: launch.to_string(),
            start_param: "ref_demo".to_string(),
            init_data_raw: format!(
                "user=%7B%22id%22%3A5123456789%7D&auth_date={}&hash=demo",
                chrono::Utc::now().timestamp()
            ),
        }
    }
}

pub struct SimulatedHost {
    launch: LaunchData,
    wallet: Arc<SimulatedWallet>,
    commands: UnboundedSender<HostCommand>,
}

impl SimulatedHost {
    pub fn new(
        launch: LaunchData,
        wallet: Arc<SimulatedWallet>,
    ) -> (Self, UnboundedReceiver<HostCommand>) {
        let (commands, rx) = tokio::sync::mpsc::unbounded_channel();
        (
            Self {
                launch,
                wallet,
                commands,
            },
            rx,
        )
    }

    fn queue(&self, command: HostCommand) -> tma_bridge::Result<()> {
        self.commands
            .send(command)
            .map_err(|_| BridgeError::unavailable("host loop has stopped"))
    }
}

impl HostBridge for SimulatedHost {
    fn user_info(&self) -> tma_bridge::Result<String> {
        Ok(self.launch.user_info.clone())
    }

    fn launch_params(&self) -> tma_bridge::Result<String> {
        Ok(self.launch.launch_params.clone())
    }

    fn start_param(&self) -> tma_bridge::Result<String> {
        Ok(self.launch.start_param.clone())
    }

    fn init_data_raw(&self) -> tma_bridge::Result<String> {
        Ok(self.launch.init_data_raw.clone())
    }

    fn connect_wallet(&self) -> tma_bridge::Result<()> {
        self.queue(HostCommand::ConnectWallet)
    }

    fn disconnect_wallet(&self) -> tma_bridge::Result<()> {
        self.queue(HostCommand::DisconnectWallet)
    }

    fn wallet_connected(&self) -> tma_bridge::Result<bool> {
        Ok(self.wallet.is_connected())
    }

    fn wallet_address(&self) -> tma_bridge::Result<String> {
        Ok(self.wallet.account_address().unwrap_or_default())
    }

    fn pay_with_ton(
        &self,
        address: Option<&str>,
        amount: f64,
        comment: &str,
    ) -> tma_bridge::Result<()> {
        self.queue(HostCommand::PayWithTon {
            address: address.map(str::to_string),
            amount,
            comment: comment.to_string(),
        })
    }

    fn set_header_color(&self, color: &str) -> tma_bridge::Result<()> {
        debug!("[host] header color {}", color);
        Ok(())
    }

    fn set_background_color(&self, color: &str) -> tma_bridge::Result<()> {
        debug!("[host] background color {}", color);
        Ok(())
    }

    fn set_bottom_bar_color(&self, color: &str) -> tma_bridge::Result<()> {
        debug!("[host] bottom bar color {}", color);
        Ok(())
    }

    fn close(&self) -> tma_bridge::Result<()> {
        self.queue(HostCommand::Close)
    }

    fn expand_viewport(&self) -> tma_bridge::Result<()> {
        debug!("[host] viewport expanded");
        Ok(())
    }

    fn request_fullscreen(&self) -> tma_bridge::Result<()> {
        debug!("[host] fullscreen");
        Ok(())
    }

    fn show_back_button(&self) -> tma_bridge::Result<()> {
        debug!("[host] back button shown");
        Ok(())
    }

    fn hide_back_button(&self) -> tma_bridge::Result<()> {
        debug!("[host] back button hidden");
        Ok(())
    }

    fn enable_closing_confirmation(&self) -> tma_bridge::Result<()> {
        debug!("[host] closing confirmation on");
        Ok(())
    }

    fn disable_closing_confirmation(&self) -> tma_bridge::Result<()> {
        debug!("[host] closing confirmation off");
        Ok(())
    }

    fn enable_vertical_swipes(&self) -> tma_bridge::Result<()> {
        debug!("[host] vertical swipes on");
        Ok(())
    }

    fn disable_vertical_swipes(&self) -> tma_bridge::Result<()> {
        debug!("[host] vertical swipes off");
        Ok(())
    }

    fn share_story(&self, story: &ShareStoryParams) -> tma_bridge::Result<()> {
        debug!("[host] story {} ({})", story.media_url, story.widget_link_name);
        Ok(())
    }

    fn open_telegram_link(&self, link: &str) -> tma_bridge::Result<()> {
        debug!("[host] telegram link {}", link);
        Ok(())
    }

    fn open_link(&self, link: &str, options: OpenLinkOptions) -> tma_bridge::Result<()> {
        debug!(?options, "[host] link {}", link);
        Ok(())
    }

    fn share_url(&self, url: &str, text: &str) -> tma_bridge::Result<()> {
        debug!("[host] share {} \"{}\"", url, text);
        Ok(())
    }

    fn request_vibration(&self, style: HapticStyle) -> tma_bridge::Result<()> {
        debug!("[host] haptic {:?} ({})", style, style.code());
        Ok(())
    }

    fn request_phone_access(&self) -> tma_bridge::Result<()> {
        self.queue(HostCommand::Permission(CallbackKind::PhoneAccess))
    }

    fn request_write_access(&self) -> tma_bridge::Result<()> {
        self.queue(HostCommand::Permission(CallbackKind::WriteAccess))
    }

    fn request_contact(&self) -> tma_bridge::Result<()> {
        self.queue(HostCommand::Permission(CallbackKind::Contact))
    }

    fn request_emoji_status_access(&self) -> tma_bridge::Result<()> {
        self.queue(HostCommand::Permission(CallbackKind::EmojiStatusAccess))
    }

    fn request_set_emoji_status(
        &self,
        custom_emoji_id: &str,
        duration_secs: u32,
    ) -> tma_bridge::Result<()> {
        self.queue(HostCommand::SetEmojiStatus {
            custom_emoji_id: custom_emoji_id.to_string(),
            duration_secs,
        })
    }

    fn request_read_text_from_clipboard(&self) -> tma_bridge::Result<()> {
        self.queue(HostCommand::Permission(CallbackKind::ClipboardText))
    }
}

/// Run queued host commands until the Mini App is closed.
pub async fn run_host_loop(
    mut commands: UnboundedReceiver<HostCommand>,
    sdk: Arc<GameClientSdk>,
    relay: Arc<CallbackRelay>,
) {
    while let Some(command) = commands.recv().await {
        debug!(?command, "[host] command");
        match command {
            HostCommand::ConnectWallet => {
                if let Err(e) = sdk.wallet().connect().await {
                    warn!("[host] wallet connect failed: {}", e);
                }
            }
            HostCommand::DisconnectWallet => {
                if let Err(e) = sdk.wallet().disconnect().await {
                    warn!("[host] wallet disconnect failed: {}", e);
                }
            }
            HostCommand::PayWithTon {
                address,
                amount,
                comment,
            } => {
                let comment = Some(comment.as_str()).filter(|c| !c.is_empty());
                match sdk.payments().ton.pay(amount, comment, address.as_deref()).await {
                    Ok(receipt) => info!(boc = %receipt.boc, "[host] TON payment sent"),
                    Err(e) => warn!(code = e.code(), "[host] TON payment failed: {}", e),
                }
            }
            HostCommand::Permission(kind) => answer_permission(kind, &sdk, &relay),
            HostCommand::SetEmojiStatus {
                custom_emoji_id,
                duration_secs,
            } => {
                info!(custom_emoji_id = %custom_emoji_id, duration_secs, "[host] emoji status set");
            }
            HostCommand::Close => {
                info!("[host] mini app closed");
                break;
            }
        }
    }
}

fn answer_permission(kind: CallbackKind, sdk: &GameClientSdk, relay: &CallbackRelay) {
    let payload = match kind {
        CallbackKind::PhoneAccess => "sent".to_string(),
        CallbackKind::WriteAccess | CallbackKind::EmojiStatusAccess => "allowed".to_string(),
        CallbackKind::ClipboardText => "YES-PROMO-2024".to_string(),
        CallbackKind::Contact => contact_payload(sdk),
    };

    match relay.dispatch(kind.callback_name(), &payload) {
        Ok(delivered) => debug!(delivered, "[host] {} answered", kind),
        Err(e) => warn!("[host] {} callback rejected: {}", kind, e),
    }
}

fn contact_payload(sdk: &GameClientSdk) -> String {
    let user = sdk.mini_app().and_then(|m| m.user());
    serde_json::json!({
        "contact": {
            "userId": user.map(|u| u.id).unwrap_or_default(),
            "phoneNumber": "+10000000000",
            "firstName": user.map(|u| u.first_name.as_str()).unwrap_or_default(),
            "lastName": user.map(|u| u.last_name.as_str()).unwrap_or_default()
        },
        "authDate": chrono::Utc::now().timestamp().to_string(),
        "hash": "demo"
    })
    .to_string()
}
