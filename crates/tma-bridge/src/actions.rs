//! Bridge Actions
//!
//! Game-facing facade: one method per host capability, plus the relay
//! subscriptions that observe permission results.
//!
//! # Lifecycle
//!
//! `BridgeActions` is either *attached* (its handlers are subscribed to every
//! relay channel) or *detached*. [`attach`](BridgeActions::attach) and
//! [`detach`](BridgeActions::detach) switch between the two, and dropping the
//! facade detaches, so a destroyed owner is never called back.
//!
//! # Overlapping permission requests
//!
//! The host protocol has no correlation id. While attached, a second request
//! of a kind that is still waiting for its callback is rejected with
//! [`Error::RequestPending`]; the slot frees up when the relay delivers that
//! kind's result. Callers that never receive a callback stay pending until
//! [`clear_pending`](BridgeActions::clear_pending) or `detach`.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::host::{HapticStyle, HostBridge, OpenLinkOptions, ShareStoryParams};
use crate::miniapp::MiniAppClient;
use crate::models::{LaunchParams, RequestedContact, User};
use crate::relay::{CallbackKind, CallbackRelay, RelayFailure, Subscription};

/// Startup snapshot logged on attach.
#[derive(Debug, Clone, Default)]
pub struct LaunchSnapshot {
    pub user: Option<User>,
    pub launch_params: Option<LaunchParams>,
    pub start_param: Option<String>,
    pub init_data_raw: Option<String>,
}

type PendingSet = Arc<Mutex<HashSet<CallbackKind>>>;

/// Facade over a [`HostBridge`] and its [`CallbackRelay`].
pub struct BridgeActions {
    host: Arc<dyn HostBridge>,
    relay: Arc<CallbackRelay>,
    mini_app: MiniAppClient,
    subscriptions: Vec<Subscription>,
    pending: PendingSet,
}

impl BridgeActions {
    /// Create a detached facade.
    pub fn new(host: Arc<dyn HostBridge>, relay: Arc<CallbackRelay>) -> Self {
        Self {
            mini_app: MiniAppClient::new(host.clone()),
            host,
            relay,
            subscriptions: Vec::new(),
            pending: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn relay(&self) -> &Arc<CallbackRelay> {
        &self.relay
    }

    pub fn mini_app(&self) -> &MiniAppClient {
        &self.mini_app
    }

    // ==================== Lifecycle ====================

    pub fn is_attached(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Subscribe to every relay channel and log the launch snapshot.
    ///
    /// Calling `attach` while attached is a no-op.
    pub fn attach(&mut self) -> LaunchSnapshot {
        if !self.is_attached() {
            self.subscriptions = self.subscribe_handlers();
            tracing::info!(
                subscriptions = self.subscriptions.len(),
                "Bridge actions attached"
            );
        }
        self.snapshot()
    }

    /// Drop every relay subscription. No handler of this facade runs afterwards.
    pub fn detach(&mut self) {
        if self.subscriptions.is_empty() {
            return;
        }
        self.subscriptions.clear();
        self.pending.lock().clear();
        tracing::info!("Bridge actions detached");
    }

    fn subscribe_handlers(&self) -> Vec<Subscription> {
        let relay = &self.relay;
        vec![
            relay.phone_access().subscribe(status_handler(
                self.pending.clone(),
                CallbackKind::PhoneAccess,
                "Phone access status",
            )),
            relay.write_access().subscribe(status_handler(
                self.pending.clone(),
                CallbackKind::WriteAccess,
                "Write access status",
            )),
            relay.emoji_status_access().subscribe(status_handler(
                self.pending.clone(),
                CallbackKind::EmojiStatusAccess,
                "Emoji status access",
            )),
            relay.clipboard_text().subscribe({
                let pending = self.pending.clone();
                move |text: &String| {
                    pending.lock().remove(&CallbackKind::ClipboardText);
                    tracing::info!(len = text.len(), "Text from clipboard");
                }
            }),
            relay.contact().subscribe({
                let pending = self.pending.clone();
                move |contact: &RequestedContact| {
                    pending.lock().remove(&CallbackKind::Contact);
                    tracing::info!(
                        user_id = contact.contact.user_id,
                        first_name = %contact.contact.first_name,
                        last_name = %contact.contact.last_name,
                        auth_date = %contact.auth_date,
                        "Received contact"
                    );
                }
            }),
            relay.errors().subscribe({
                let pending = self.pending.clone();
                move |failure: &RelayFailure| {
                    if let Some(kind) = failure.callback {
                        pending.lock().remove(&kind);
                    }
                    tracing::warn!(code = failure.error.code(), "Relay failure: {}", failure.error);
                }
            }),
        ]
    }

    /// Read and log the launch state.
    pub fn snapshot(&self) -> LaunchSnapshot {
        let snapshot = LaunchSnapshot {
            user: self.mini_app.user().cloned(),
            launch_params: self.mini_app.launch_params(),
            start_param: self.mini_app.start_param(),
            init_data_raw: self.mini_app.init_data_raw(),
        };

        match &snapshot.user {
            Some(user) => tracing::info!("User info: {}", user),
            None => tracing::info!("User info: <none>"),
        }
        if let Some(params) = &snapshot.launch_params {
            tracing::info!(
                platform = %params.platform,
                version = %params.version,
                inline = params.is_inline(),
                bg_color = ?params.theme_color("bg_color"),
                "Launch params"
            );
        }
        tracing::info!(start_param = ?snapshot.start_param, "Start param");
        tracing::debug!(present = snapshot.init_data_raw.is_some(), "Init data raw");

        snapshot
    }

    // ==================== Pending Requests ====================

    pub fn is_pending(&self, kind: CallbackKind) -> bool {
        self.pending.lock().contains(&kind)
    }

    /// Forget an in-flight request whose callback will never arrive.
    pub fn clear_pending(&self, kind: CallbackKind) {
        self.pending.lock().remove(&kind);
    }

    fn begin_request(
        &self,
        kind: CallbackKind,
        send: impl FnOnce(&dyn HostBridge) -> Result<()>,
    ) -> Result<()> {
        if self.is_attached() {
            let mut pending = self.pending.lock();
            if pending.contains(&kind) {
                tracing::warn!("{} already pending, rejecting new request", kind);
                return Err(Error::RequestPending(kind.to_string()));
            }
            pending.insert(kind);
        }

        send(self.host.as_ref()).map_err(|e| {
            self.pending.lock().remove(&kind);
            e
        })
    }

    // ==================== Wallet ====================

    pub fn connect_wallet(&self) -> Result<()> {
        tracing::info!("Connecting wallet");
        self.host.connect_wallet()
    }

    pub fn disconnect_wallet(&self) -> Result<()> {
        tracing::info!("Disconnecting wallet");
        self.host.disconnect_wallet()
    }

    /// `false` when disconnected or when the host is missing
    pub fn wallet_connected(&self) -> bool {
        let connected = self.host.wallet_connected().unwrap_or(false);
        tracing::debug!(connected, "Wallet connected");
        connected
    }

    /// `None` when disconnected or when the host is missing
    pub fn wallet_address(&self) -> Option<String> {
        let address = self.host.wallet_address().ok().filter(|a| !a.is_empty());
        tracing::debug!(address = ?address, "Wallet address");
        address
    }

    /// Start a TON payment of `amount` TON to `address`, or to the project's
    /// collection address when `address` is `None`.
    pub fn pay_with_ton(&self, address: Option<&str>, amount: f64, comment: &str) -> Result<()> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::invalid_argument(format!(
                "TON amount must be a positive number, got {}",
                amount
            )));
        }
        if address.is_some_and(str::is_empty) {
            return Err(Error::invalid_argument("recipient address is empty"));
        }
        tracing::info!(amount, comment, address = ?address, "Paying with TON");
        self.host.pay_with_ton(address, amount, comment)
    }

    // ==================== UI Chrome ====================

    pub fn set_header_color(&self, color: &str) -> Result<()> {
        tracing::info!("Setting header color to {}", color);
        self.host.set_header_color(color)
    }

    pub fn set_background_color(&self, color: &str) -> Result<()> {
        tracing::info!("Setting background color to {}", color);
        self.host.set_background_color(color)
    }

    pub fn set_bottom_bar_color(&self, color: &str) -> Result<()> {
        tracing::info!("Setting bottom bar color to {}", color);
        self.host.set_bottom_bar_color(color)
    }

    pub fn close(&self) -> Result<()> {
        tracing::info!("Closing mini app");
        self.host.close()
    }

    pub fn expand_viewport(&self) -> Result<()> {
        tracing::info!("Expanding viewport");
        self.host.expand_viewport()
    }

    pub fn request_fullscreen(&self) -> Result<()> {
        tracing::info!("Requesting fullscreen");
        self.host.request_fullscreen()
    }

    pub fn show_back_button(&self) -> Result<()> {
        tracing::debug!("Showing back button");
        self.host.show_back_button()
    }

    pub fn hide_back_button(&self) -> Result<()> {
        tracing::debug!("Hiding back button");
        self.host.hide_back_button()
    }

    pub fn enable_closing_confirmation(&self) -> Result<()> {
        tracing::debug!("Enabling closing confirmation");
        self.host.enable_closing_confirmation()
    }

    pub fn disable_closing_confirmation(&self) -> Result<()> {
        tracing::debug!("Disabling closing confirmation");
        self.host.disable_closing_confirmation()
    }

    pub fn enable_vertical_swipes(&self) -> Result<()> {
        tracing::debug!("Enabling vertical swipes");
        self.host.enable_vertical_swipes()
    }

    pub fn disable_vertical_swipes(&self) -> Result<()> {
        tracing::debug!("Disabling vertical swipes");
        self.host.disable_vertical_swipes()
    }

    // ==================== Sharing & Links ====================

    pub fn share_story(&self, story: &ShareStoryParams) -> Result<()> {
        if story.media_url.is_empty() {
            return Err(Error::invalid_argument("story media URL is empty"));
        }
        tracing::info!(media_url = %story.media_url, "Sharing story");
        self.host.share_story(story)
    }

    pub fn open_telegram_link(&self, link: &str) -> Result<()> {
        tracing::info!("Opening Telegram link {}", link);
        self.host.open_telegram_link(link)
    }

    pub fn open_link(&self, link: &str, options: OpenLinkOptions) -> Result<()> {
        tracing::info!(
            try_browser = options.try_browser,
            try_instant_view = options.try_instant_view,
            "Opening link {}",
            link
        );
        self.host.open_link(link, options)
    }

    pub fn share_url(&self, url: &str, text: &str) -> Result<()> {
        tracing::info!("Sharing URL {}", url);
        self.host.share_url(url, text)
    }

    pub fn request_vibration(&self, style: HapticStyle) -> Result<()> {
        tracing::debug!(?style, "Requesting vibration");
        self.host.request_vibration(style)
    }

    // ==================== Permission Requests ====================

    pub fn request_phone_access(&self) -> Result<()> {
        tracing::info!("Requesting phone access");
        self.begin_request(CallbackKind::PhoneAccess, |host| host.request_phone_access())
    }

    pub fn request_write_access(&self) -> Result<()> {
        tracing::info!("Requesting write access");
        self.begin_request(CallbackKind::WriteAccess, |host| host.request_write_access())
    }

    pub fn request_contact(&self) -> Result<()> {
        tracing::info!("Requesting contact");
        self.begin_request(CallbackKind::Contact, |host| host.request_contact())
    }

    pub fn request_emoji_status_access(&self) -> Result<()> {
        tracing::info!("Requesting emoji status access");
        self.begin_request(CallbackKind::EmojiStatusAccess, |host| {
            host.request_emoji_status_access()
        })
    }

    /// Set the user's emoji status. Fire-and-forget: the host reports no result.
    pub fn set_emoji_status(&self, custom_emoji_id: &str, duration_secs: u32) -> Result<()> {
        if custom_emoji_id.is_empty() {
            return Err(Error::invalid_argument("custom emoji id is empty"));
        }
        tracing::info!(custom_emoji_id, duration_secs, "Setting emoji status");
        self.host.request_set_emoji_status(custom_emoji_id, duration_secs)
    }

    pub fn read_text_from_clipboard(&self) -> Result<()> {
        tracing::info!("Requesting clipboard text");
        self.begin_request(CallbackKind::ClipboardText, |host| {
            host.request_read_text_from_clipboard()
        })
    }
}

impl Drop for BridgeActions {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for BridgeActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeActions")
            .field("attached", &self.is_attached())
            .field("pending", &*self.pending.lock())
            .finish_non_exhaustive()
    }
}

fn status_handler(
    pending: PendingSet,
    kind: CallbackKind,
    label: &'static str,
) -> impl Fn(&String) + Send + Sync + 'static {
    move |status: &String| {
        pending.lock().remove(&kind);
        tracing::info!("{}: {}", label, status);
    }
}
