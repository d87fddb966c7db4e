//! Host Bridge
//!
//! The catalogue of operations the Mini App host exposes to game code.
//!
//! Operations come in three flavours:
//!
//! - **Queries** answer immediately from the host's in-memory launch state.
//! - **Commands** are fire-and-forget UI actions with no result.
//! - **Permission requests** only *start* a host dialog. The answer arrives
//!   later through [`CallbackRelay`](crate::relay::CallbackRelay) under the
//!   matching callback name, never as a return value. Callers must not assume
//!   a permission request has completed when the method returns.

use serde::{Deserialize, Serialize};

use crate::error::Result;

mod recording;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
#[cfg_attr(docsrs, doc(cfg(feature = "wasm")))]
pub mod web;

pub use recording::{HostCall, RecordingHost};

/// Haptic feedback style accepted by `request_vibration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HapticStyle {
    Light,
    Medium,
    Heavy,
    Rigid,
    Soft,
}

impl HapticStyle {
    /// Integer code passed to the host bridge
    pub fn code(self) -> i32 {
        match self {
            HapticStyle::Light => 0,
            HapticStyle::Medium => 1,
            HapticStyle::Heavy => 2,
            HapticStyle::Rigid => 3,
            HapticStyle::Soft => 4,
        }
    }
}

/// Story to share through the host's story editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareStoryParams {
    pub media_url: String,
    pub text: String,
    pub widget_link_url: String,
    pub widget_link_name: String,
}

/// How `open_link` should try to open an external URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenLinkOptions {
    /// Prefer the system browser over the in-app one
    pub try_browser: bool,
    /// Open through Instant View when available
    pub try_instant_view: bool,
}

/// Telegram Mini App host capabilities.
///
/// One method per host operation. Production implementations forward to the
/// page's Telegram WebApp bridge; tests use [`RecordingHost`]. Every method
/// returns `Err(Error::BridgeUnavailable)` when the host object is missing,
/// so callers can disable the dependent feature instead of crashing.
pub trait HostBridge: Send + Sync {
    // ==================== Launch State ====================

    /// User info JSON (see [`User`](crate::models::User))
    fn user_info(&self) -> Result<String>;

    /// Launch parameters JSON (see [`LaunchParams`](crate::models::LaunchParams))
    fn launch_params(&self) -> Result<String>;

    fn start_param(&self) -> Result<String>;

    /// Raw signed init data; never validated on this side
    fn init_data_raw(&self) -> Result<String>;

    // ==================== Wallet ====================

    fn connect_wallet(&self) -> Result<()>;

    fn disconnect_wallet(&self) -> Result<()>;

    fn wallet_connected(&self) -> Result<bool>;

    /// Connected wallet address, empty when disconnected
    fn wallet_address(&self) -> Result<String>;

    /// Start a TON payment through the web SDK (amount in TON). `None` pays
    /// the project's collection address.
    fn pay_with_ton(&self, address: Option<&str>, amount: f64, comment: &str) -> Result<()>;

    // ==================== UI Chrome ====================

    fn set_header_color(&self, color: &str) -> Result<()>;

    fn set_background_color(&self, color: &str) -> Result<()>;

    fn set_bottom_bar_color(&self, color: &str) -> Result<()>;

    fn close(&self) -> Result<()>;

    fn expand_viewport(&self) -> Result<()>;

    fn request_fullscreen(&self) -> Result<()>;

    fn show_back_button(&self) -> Result<()>;

    fn hide_back_button(&self) -> Result<()>;

    /// Ask the user to confirm before the app is closed
    fn enable_closing_confirmation(&self) -> Result<()>;

    fn disable_closing_confirmation(&self) -> Result<()>;

    /// Allow swipe-down to minimise the app
    fn enable_vertical_swipes(&self) -> Result<()>;

    fn disable_vertical_swipes(&self) -> Result<()>;

    // ==================== Sharing & Links ====================

    fn share_story(&self, story: &ShareStoryParams) -> Result<()>;

    fn open_telegram_link(&self, link: &str) -> Result<()>;

    fn open_link(&self, link: &str, options: OpenLinkOptions) -> Result<()>;

    fn share_url(&self, url: &str, text: &str) -> Result<()>;

    fn request_vibration(&self, style: HapticStyle) -> Result<()>;

    // ==================== Permission Requests ====================
    // Results arrive through CallbackRelay.

    fn request_phone_access(&self) -> Result<()>;

    fn request_write_access(&self) -> Result<()>;

    fn request_contact(&self) -> Result<()>;

    fn request_emoji_status_access(&self) -> Result<()>;

    /// Set the user's emoji status for `duration_secs` (0 = no expiry)
    fn request_set_emoji_status(&self, custom_emoji_id: &str, duration_secs: u32) -> Result<()>;

    fn request_read_text_from_clipboard(&self) -> Result<()>;
}
