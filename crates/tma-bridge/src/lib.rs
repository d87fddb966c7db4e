//! # TMA Bridge
//!
//! **Telegram Mini App capabilities for game clients**
//!
//! The game runs inside a Telegram Mini App and never talks to Telegram
//! directly. Everything goes through two seams:
//!
//! - [`HostBridge`]: game → host. Queries (user info, launch params, wallet
//!   state), fire-and-forget UI commands, and permission requests.
//! - [`CallbackRelay`]: host → game. Permission results arrive here later,
//!   by callback name, and fan out to subscribers.
//!
//! [`BridgeActions`] ties both together for game code: one method per
//! capability, logging, and relay subscriptions that live exactly as long as
//! the facade does.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tma_bridge::{BridgeActions, CallbackRelay, RecordingHost};
//!
//! let host = Arc::new(RecordingHost::new());
//! let relay = Arc::new(CallbackRelay::new());
//!
//! let mut actions = BridgeActions::new(host, relay.clone());
//! actions.attach();
//!
//! let _contacts = relay.contact().subscribe(|contact| {
//!     println!("shared phone: {}", contact.contact.phone_number);
//! });
//!
//! actions.request_contact().unwrap();
//! // ...later, the host calls back:
//! relay
//!     .on_request_contact(r#"{"contact":{"userId":1,"phoneNumber":"+1","firstName":"A","lastName":"B"},"authDate":"1","hash":"h"}"#)
//!     .unwrap();
//! ```
//!
//! ## Trust Boundary
//!
//! Init data and requested-contact `hash`/`authDate` are forwarded verbatim.
//! Verifying them is the backend's job.

#![cfg_attr(docsrs, feature(doc_cfg))]

use std::sync::Arc;

pub mod actions;
pub mod error;
pub mod host;
pub mod miniapp;
pub mod models;
pub mod relay;

pub use actions::{BridgeActions, LaunchSnapshot};
pub use error::{Error, Result};
pub use host::{
    HapticStyle, HostBridge, HostCall, OpenLinkOptions, RecordingHost, ShareStoryParams,
};
pub use miniapp::MiniAppClient;
pub use models::*;
pub use relay::{CallbackKind, CallbackRelay, EventChannel, RelayFailure, Subscription};

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use host::web::{JsCallbackRelay, WebAppHost};

/// Create a relay and an attached [`BridgeActions`] for `host`.
///
/// The returned relay is the one the host must deliver callbacks to.
pub fn init(host: Arc<dyn HostBridge>) -> (Arc<CallbackRelay>, BridgeActions) {
    let relay = Arc::new(CallbackRelay::new());
    let mut actions = BridgeActions::new(host, relay.clone());
    actions.attach();
    tracing::info!("TMA bridge initialized");
    (relay, actions)
}
