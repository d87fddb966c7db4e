//! In-memory host used by tests and the demo app.

use parking_lot::{Mutex, RwLock};

use super::{HapticStyle, HostBridge, OpenLinkOptions, ShareStoryParams};
use crate::error::{Error, Result};

/// A command the game sent to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    ConnectWallet,
    DisconnectWallet,
    PayWithTon {
        address: Option<String>,
        amount: f64,
        comment: String,
    },
    SetHeaderColor(String),
    SetBackgroundColor(String),
    SetBottomBarColor(String),
    Close,
    ExpandViewport,
    RequestFullscreen,
    ShowBackButton,
    HideBackButton,
    EnableClosingConfirmation,
    DisableClosingConfirmation,
    EnableVerticalSwipes,
    DisableVerticalSwipes,
    ShareStory(ShareStoryParams),
    OpenTelegramLink(String),
    OpenLink { link: String, options: OpenLinkOptions },
    ShareUrl { url: String, text: String },
    RequestVibration(HapticStyle),
    RequestPhoneAccess,
    RequestWriteAccess,
    RequestContact,
    RequestEmojiStatusAccess,
    RequestSetEmojiStatus { custom_emoji_id: String, duration_secs: u32 },
    RequestReadTextFromClipboard,
}

#[derive(Debug, Default)]
struct LaunchState {
    user_info: String,
    launch_params: String,
    start_param: String,
    init_data_raw: String,
    wallet_address: Option<String>,
}

/// Host bridge fake that answers queries from fixed launch state and records
/// every command in call order.
///
/// `connect_wallet` / `disconnect_wallet` flip the wallet state so the wallet
/// queries behave like a real host.
#[derive(Debug)]
pub struct RecordingHost {
    state: RwLock<LaunchState>,
    calls: Mutex<Vec<HostCall>>,
    available: RwLock<bool>,
    connect_address: String,
}

impl RecordingHost {
    /// Create a host with empty launch state
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LaunchState {
                user_info: "{}".to_string(),
                launch_params: "{}".to_string(),
                ..LaunchState::default()
            }),
            calls: Mutex::new(Vec::new()),
            available: RwLock::new(true),
            connect_address: "UQBvW8Z5huBkMJYdnfAEM5JqTNkuWX3diqYENkWsIL0XggGG".to_string(),
        }
    }

    pub fn with_user_info(self, json: impl Into<String>) -> Self {
        self.state.write().user_info = json.into();
        self
    }

    pub fn with_launch_params(self, json: impl Into<String>) -> Self {
        self.state.write().launch_params = json.into();
        self
    }

    pub fn with_start_param(self, value: impl Into<String>) -> Self {
        self.state.write().start_param = value.into();
        self
    }

    pub fn with_init_data_raw(self, value: impl Into<String>) -> Self {
        self.state.write().init_data_raw = value.into();
        self
    }

    /// Address reported once `connect_wallet` is called
    pub fn with_wallet_address(mut self, address: impl Into<String>) -> Self {
        self.connect_address = address.into();
        self
    }

    /// Simulate the host object disappearing (or reappearing)
    pub fn set_available(&self, available: bool) {
        *self.available.write() = available;
    }

    /// Snapshot of recorded commands
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }

    pub fn last_call(&self) -> Option<HostCall> {
        self.calls.lock().last().cloned()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn ensure_available(&self) -> Result<()> {
        if *self.available.read() {
            Ok(())
        } else {
            Err(Error::unavailable("Telegram WebApp bridge not present"))
        }
    }

    fn record(&self, call: HostCall) -> Result<()> {
        self.ensure_available()?;
        self.calls.lock().push(call);
        Ok(())
    }

    fn query<T>(&self, read: impl FnOnce(&LaunchState) -> T) -> Result<T> {
        self.ensure_available()?;
        Ok(read(&self.state.read()))
    }
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostBridge for RecordingHost {
    fn user_info(&self) -> Result<String> {
        self.query(|s| s.user_info.clone())
    }

    fn launch_params(&self) -> Result<String> {
        self.query(|s| s.launch_params.clone())
    }

    fn start_param(&self) -> Result<String> {
        self.query(|s| s.start_param.clone())
    }

    fn init_data_raw(&self) -> Result<String> {
        self.query(|s| s.init_data_raw.clone())
    }

    fn connect_wallet(&self) -> Result<()> {
        self.record(HostCall::ConnectWallet)?;
        self.state.write().wallet_address = Some(self.connect_address.clone());
        Ok(())
    }

    fn disconnect_wallet(&self) -> Result<()> {
        self.record(HostCall::DisconnectWallet)?;
        self.state.write().wallet_address = None;
        Ok(())
    }

    fn wallet_connected(&self) -> Result<bool> {
        self.query(|s| s.wallet_address.is_some())
    }

    fn wallet_address(&self) -> Result<String> {
        self.query(|s| s.wallet_address.clone().unwrap_or_default())
    }

    fn pay_with_ton(&self, address: Option<&str>, amount: f64, comment: &str) -> Result<()> {
        self.record(HostCall::PayWithTon {
            address: address.map(str::to_string),
            amount,
            comment: comment.to_string(),
        })
    }

    fn set_header_color(&self, color: &str) -> Result<()> {
        self.record(HostCall::SetHeaderColor(color.to_string()))
    }

    fn set_background_color(&self, color: &str) -> Result<()> {
        self.record(HostCall::SetBackgroundColor(color.to_string()))
    }

    fn set_bottom_bar_color(&self, color: &str) -> Result<()> {
        self.record(HostCall::SetBottomBarColor(color.to_string()))
    }

    fn close(&self) -> Result<()> {
        self.record(HostCall::Close)
    }

    fn expand_viewport(&self) -> Result<()> {
        self.record(HostCall::ExpandViewport)
    }

    fn request_fullscreen(&self) -> Result<()> {
        self.record(HostCall::RequestFullscreen)
    }

    fn show_back_button(&self) -> Result<()> {
        self.record(HostCall::ShowBackButton)
    }

    fn hide_back_button(&self) -> Result<()> {
        self.record(HostCall::HideBackButton)
    }

    fn enable_closing_confirmation(&self) -> Result<()> {
        self.record(HostCall::EnableClosingConfirmation)
    }

    fn disable_closing_confirmation(&self) -> Result<()> {
        self.record(HostCall::DisableClosingConfirmation)
    }

    fn enable_vertical_swipes(&self) -> Result<()> {
        self.record(HostCall::EnableVerticalSwipes)
    }

    fn disable_vertical_swipes(&self) -> Result<()> {
        self.record(HostCall::DisableVerticalSwipes)
    }

    fn share_story(&self, story: &ShareStoryParams) -> Result<()> {
        self.record(HostCall::ShareStory(story.clone()))
    }

    fn open_telegram_link(&self, link: &str) -> Result<()> {
        self.record(HostCall::OpenTelegramLink(link.to_string()))
    }

    fn open_link(&self, link: &str, options: OpenLinkOptions) -> Result<()> {
        self.record(HostCall::OpenLink {
            link: link.to_string(),
            options,
        })
    }

    fn share_url(&self, url: &str, text: &str) -> Result<()> {
        self.record(HostCall::ShareUrl {
            url: url.to_string(),
            text: text.to_string(),
        })
    }

    fn request_vibration(&self, style: HapticStyle) -> Result<()> {
        self.record(HostCall::RequestVibration(style))
    }

    fn request_phone_access(&self) -> Result<()> {
        self.record(HostCall::RequestPhoneAccess)
    }

    fn request_write_access(&self) -> Result<()> {
        self.record(HostCall::RequestWriteAccess)
    }

    fn request_contact(&self) -> Result<()> {
        self.record(HostCall::RequestContact)
    }

    fn request_emoji_status_access(&self) -> Result<()> {
        self.record(HostCall::RequestEmojiStatusAccess)
    }

    fn request_set_emoji_status(&self, custom_emoji_id: &str, duration_secs: u32) -> Result<()> {
        self.record(HostCall::RequestSetEmojiStatus {
            custom_emoji_id: custom_emoji_id.to_string(),
            duration_secs,
        })
    }

    fn request_read_text_from_clipboard(&self) -> Result<()> {
        self.record(HostCall::RequestReadTextFromClipboard)
    }
}
