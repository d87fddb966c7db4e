//! Browser host
//!
//! Routes [`HostBridge`] calls to the global bridge functions the page
//! installs around `window.Telegram.WebApp`, and exports the callback entry
//! points so the page can hand permission results back to the relay.

use std::sync::Arc;

use wasm_bindgen::prelude::*;

use super::{HapticStyle, HostBridge, OpenLinkOptions, ShareStoryParams};
use crate::error::{Error, Result};
use crate::relay::CallbackRelay;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_name = getUserInfo)]
    fn js_get_user_info() -> std::result::Result<String, JsValue>;

    #[wasm_bindgen(catch, js_name = getLaunchParams)]
    fn js_get_launch_params() -> std::result::Result<String, JsValue>;

    #[wasm_bindgen(catch, js_name = getStartParam)]
    fn js_get_start_param() -> std::result::Result<String, JsValue>;

    #[wasm_bindgen(catch, js_name = getInitDataRaw)]
    fn js_get_init_data_raw() -> std::result::Result<String, JsValue>;

    #[wasm_bindgen(catch, js_name = connectWallet)]
    fn js_connect_wallet() -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = disconnectWallet)]
    fn js_disconnect_wallet() -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = getWalletConnected)]
    fn js_get_wallet_connected() -> std::result::Result<bool, JsValue>;

    #[wasm_bindgen(catch, js_name = getWalletAddress)]
    fn js_get_wallet_address() -> std::result::Result<String, JsValue>;

    #[wasm_bindgen(catch, js_name = payWithTon)]
    fn js_pay_with_ton(
        address: Option<String>,
        amount: f64,
        comment: &str,
    ) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = miniAppSetHeaderColor)]
    fn js_set_header_color(color: &str) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = miniAppSetBgColor)]
    fn js_set_bg_color(color: &str) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = miniAppSetBottomBarColor)]
    fn js_set_bottom_bar_color(color: &str) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = miniAppClose)]
    fn js_close() -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = viewportExpand)]
    fn js_viewport_expand() -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = viewportRequestFullscreen)]
    fn js_viewport_request_fullscreen() -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = backButtonShow)]
    fn js_back_button_show() -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = backButtonHide)]
    fn js_back_button_hide() -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = enableConfirmation)]
    fn js_enable_confirmation() -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = disableConfirmation)]
    fn js_disable_confirmation() -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = enableVertical)]
    fn js_enable_vertical() -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = disableVertical)]
    fn js_disable_vertical() -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = shareStory)]
    fn js_share_story(
        media_url: &str,
        text: &str,
        widget_link_url: &str,
        widget_link_name: &str,
    ) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = openTelegramLink)]
    fn js_open_telegram_link(link: &str) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = openLink)]
    fn js_open_link(
        link: &str,
        try_browser: bool,
        try_instant_view: bool,
    ) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = shareURL)]
    fn js_share_url(url: &str, text: &str) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = requestVibration)]
    fn js_request_vibration(style: i32) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = requestPhoneAccess)]
    fn js_request_phone_access() -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = requestWriteAccess)]
    fn js_request_write_access() -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = requestContact)]
    fn js_request_contact() -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = requestEmojiStatusAccess)]
    fn js_request_emoji_status_access() -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = requestSetEmojiStatus)]
    fn js_request_set_emoji_status(
        custom_emoji_id: &str,
        duration: u32,
    ) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = requestReadTextFromClipboard)]
    fn js_request_read_text_from_clipboard() -> std::result::Result<(), JsValue>;
}

/// Convert a thrown JS value (usually a `ReferenceError` when the bridge
/// script was not loaded) into a bridge error.
fn host_err(op: &str, value: JsValue) -> Error {
    let detail = value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value));
    Error::unavailable(format!("{}: {}", op, detail))
}

/// [`HostBridge`] backed by the page's global Telegram bridge functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebAppHost;

impl WebAppHost {
    pub fn new() -> Self {
        Self
    }
}

impl HostBridge for WebAppHost {
    fn user_info(&self) -> Result<String> {
        js_get_user_info().map_err(|e| host_err("getUserInfo", e))
    }

    fn launch_params(&self) -> Result<String> {
        js_get_launch_params().map_err(|e| host_err("getLaunchParams", e))
    }

    fn start_param(&self) -> Result<String> {
        js_get_start_param().map_err(|e| host_err("getStartParam", e))
    }

    fn init_data_raw(&self) -> Result<String> {
        js_get_init_data_raw().map_err(|e| host_err("getInitDataRaw", e))
    }

    fn connect_wallet(&self) -> Result<()> {
        js_connect_wallet().map_err(|e| host_err("connectWallet", e))
    }

    fn disconnect_wallet(&self) -> Result<()> {
        js_disconnect_wallet().map_err(|e| host_err("disconnectWallet", e))
    }

    fn wallet_connected(&self) -> Result<bool> {
        js_get_wallet_connected().map_err(|e| host_err("getWalletConnected", e))
    }

    fn wallet_address(&self) -> Result<String> {
        js_get_wallet_address().map_err(|e| host_err("getWalletAddress", e))
    }

    fn pay_with_ton(&self, address: Option<&str>, amount: f64, comment: &str) -> Result<()> {
        js_pay_with_ton(address.map(str::to_string), amount, comment)
            .map_err(|e| host_err("payWithTon", e))
    }

    fn set_header_color(&self, color: &str) -> Result<()> {
        js_set_header_color(color).map_err(|e| host_err("miniAppSetHeaderColor", e))
    }

    fn set_background_color(&self, color: &str) -> Result<()> {
        js_set_bg_color(color).map_err(|e| host_err("miniAppSetBgColor", e))
    }

    fn set_bottom_bar_color(&self, color: &str) -> Result<()> {
        js_set_bottom_bar_color(color).map_err(|e| host_err("miniAppSetBottomBarColor", e))
    }

    fn close(&self) -> Result<()> {
        js_close().map_err(|e| host_err("miniAppClose", e))
    }

    fn expand_viewport(&self) -> Result<()> {
        js_viewport_expand().map_err(|e| host_err("viewportExpand", e))
    }

    fn request_fullscreen(&self) -> Result<()> {
        js_viewport_request_fullscreen().map_err(|e| host_err("viewportRequestFullscreen", e))
    }

    fn show_back_button(&self) -> Result<()> {
        js_back_button_show().map_err(|e| host_err("backButtonShow", e))
    }

    fn hide_back_button(&self) -> Result<()> {
        js_back_button_hide().map_err(|e| host_err("backButtonHide", e))
    }

    fn enable_closing_confirmation(&self) -> Result<()> {
        js_enable_confirmation().map_err(|e| host_err("enableConfirmation", e))
    }

    fn disable_closing_confirmation(&self) -> Result<()> {
        js_disable_confirmation().map_err(|e| host_err("disableConfirmation", e))
    }

    fn enable_vertical_swipes(&self) -> Result<()> {
        js_enable_vertical().map_err(|e| host_err("enableVertical", e))
    }

    fn disable_vertical_swipes(&self) -> Result<()> {
        js_disable_vertical().map_err(|e| host_err("disableVertical", e))
    }

    fn share_story(&self, story: &ShareStoryParams) -> Result<()> {
        js_share_story(
            &story.media_url,
            &story.text,
            &story.widget_link_url,
            &story.widget_link_name,
        )
        .map_err(|e| host_err("shareStory", e))
    }

    fn open_telegram_link(&self, link: &str) -> Result<()> {
        js_open_telegram_link(link).map_err(|e| host_err("openTelegramLink", e))
    }

    fn open_link(&self, link: &str, options: OpenLinkOptions) -> Result<()> {
        js_open_link(link, options.try_browser, options.try_instant_view)
            .map_err(|e| host_err("openLink", e))
    }

    fn share_url(&self, url: &str, text: &str) -> Result<()> {
        js_share_url(url, text).map_err(|e| host_err("shareURL", e))
    }

    fn request_vibration(&self, style: HapticStyle) -> Result<()> {
        js_request_vibration(style.code()).map_err(|e| host_err("requestVibration", e))
    }

    fn request_phone_access(&self) -> Result<()> {
        js_request_phone_access().map_err(|e| host_err("requestPhoneAccess", e))
    }

    fn request_write_access(&self) -> Result<()> {
        js_request_write_access().map_err(|e| host_err("requestWriteAccess", e))
    }

    fn request_contact(&self) -> Result<()> {
        js_request_contact().map_err(|e| host_err("requestContact", e))
    }

    fn request_emoji_status_access(&self) -> Result<()> {
        js_request_emoji_status_access().map_err(|e| host_err("requestEmojiStatusAccess", e))
    }

    fn request_set_emoji_status(&self, custom_emoji_id: &str, duration_secs: u32) -> Result<()> {
        js_request_set_emoji_status(custom_emoji_id, duration_secs)
            .map_err(|e| host_err("requestSetEmojiStatus", e))
    }

    fn request_read_text_from_clipboard(&self) -> Result<()> {
        js_request_read_text_from_clipboard()
            .map_err(|e| host_err("requestReadTextFromClipboard", e))
    }
}

/// JS-visible handle the page uses to deliver callback results.
#[wasm_bindgen]
pub struct JsCallbackRelay {
    relay: Arc<CallbackRelay>,
}

impl JsCallbackRelay {
    /// Wrap the relay the game's [`BridgeActions`](crate::actions::BridgeActions) listens on.
    pub fn from_relay(relay: Arc<CallbackRelay>) -> Self {
        Self { relay }
    }

    pub fn relay(&self) -> &Arc<CallbackRelay> {
        &self.relay
    }
}

#[wasm_bindgen]
impl JsCallbackRelay {
    #[wasm_bindgen(js_name = OnRequestPhoneAccess)]
    pub fn on_request_phone_access(&self, status: String) -> usize {
        self.relay.on_request_phone_access(&status)
    }

    #[wasm_bindgen(js_name = OnRequestWriteAccess)]
    pub fn on_request_write_access(&self, status: String) -> usize {
        self.relay.on_request_write_access(&status)
    }

    #[wasm_bindgen(js_name = OnRequestContact)]
    pub fn on_request_contact(&self, contact_json: String) -> std::result::Result<usize, JsError> {
        self.relay
            .on_request_contact(&contact_json)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = OnRequestEmojiStatusAccess)]
    pub fn on_request_emoji_status_access(&self, status: String) -> usize {
        self.relay.on_request_emoji_status_access(&status)
    }

    #[wasm_bindgen(js_name = OnReadTextFromClipboard)]
    pub fn on_read_text_from_clipboard(&self, text: String) -> usize {
        self.relay.on_read_text_from_clipboard(&text)
    }

    /// Route by callback name, for pages that forward `(name, payload)` pairs
    pub fn dispatch(
        &self,
        callback_name: String,
        payload: String,
    ) -> std::result::Result<usize, JsError> {
        self.relay
            .dispatch(&callback_name, &payload)
            .map_err(|e| JsError::new(&e.to_string()))
    }
}
