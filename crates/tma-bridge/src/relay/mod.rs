//! Callback Relay
//!
//! Receives the host's asynchronous answers to permission-style requests and
//! republishes them as typed events.
//!
//! The host calls back by name with a single string payload: a plain status
//! string for access requests and clipboard reads, JSON for the contact card.
//! There is no correlation id in the protocol, so results are delivered by
//! *kind*: if two contact requests overlap, both answers arrive on the same
//! contact channel and subscribers cannot tell which request produced which.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::RequestedContact;

mod channel;

pub use channel::{EventChannel, Subscription, SubscriptionId};

/// The named callback entry points the host can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallbackKind {
    PhoneAccess,
    WriteAccess,
    Contact,
    EmojiStatusAccess,
    ClipboardText,
}

impl CallbackKind {
    pub const ALL: [CallbackKind; 5] = [
        CallbackKind::PhoneAccess,
        CallbackKind::WriteAccess,
        CallbackKind::Contact,
        CallbackKind::EmojiStatusAccess,
        CallbackKind::ClipboardText,
    ];

    /// Name the host uses when invoking this callback
    pub fn callback_name(self) -> &'static str {
        match self {
            CallbackKind::PhoneAccess => "OnRequestPhoneAccess",
            CallbackKind::WriteAccess => "OnRequestWriteAccess",
            CallbackKind::Contact => "OnRequestContact",
            CallbackKind::EmojiStatusAccess => "OnRequestEmojiStatusAccess",
            CallbackKind::ClipboardText => "OnReadTextFromClipboard",
        }
    }
}

impl fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.callback_name())
    }
}

impl FromStr for CallbackKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        CallbackKind::ALL
            .into_iter()
            .find(|kind| kind.callback_name() == name)
            .ok_or_else(|| Error::UnknownCallback(name.to_string()))
    }
}

/// A callback the relay could not turn into an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayFailure {
    /// `None` when the callback name itself was not recognised
    pub callback: Option<CallbackKind>,
    pub error: Error,
    pub payload: String,
}

/// Fan-out point for host callbacks.
///
/// One [`EventChannel`] per callback kind, plus an `errors` channel that
/// reports payloads which could not be decoded.
#[derive(Debug)]
pub struct CallbackRelay {
    phone_access: EventChannel<String>,
    write_access: EventChannel<String>,
    contact: EventChannel<RequestedContact>,
    emoji_status_access: EventChannel<String>,
    clipboard_text: EventChannel<String>,
    errors: EventChannel<RelayFailure>,
}

impl CallbackRelay {
    pub fn new() -> Self {
        Self {
            phone_access: EventChannel::new("phone_access"),
            write_access: EventChannel::new("write_access"),
            contact: EventChannel::new("contact"),
            emoji_status_access: EventChannel::new("emoji_status_access"),
            clipboard_text: EventChannel::new("clipboard_text"),
            errors: EventChannel::new("errors"),
        }
    }

    // ==================== Channels ====================

    pub fn phone_access(&self) -> &EventChannel<String> {
        &self.phone_access
    }

    pub fn write_access(&self) -> &EventChannel<String> {
        &self.write_access
    }

    pub fn contact(&self) -> &EventChannel<RequestedContact> {
        &self.contact
    }

    pub fn emoji_status_access(&self) -> &EventChannel<String> {
        &self.emoji_status_access
    }

    pub fn clipboard_text(&self) -> &EventChannel<String> {
        &self.clipboard_text
    }

    pub fn errors(&self) -> &EventChannel<RelayFailure> {
        &self.errors
    }

    /// Total subscribers across all callback channels (excluding `errors`)
    pub fn subscriber_count(&self) -> usize {
        self.phone_access.subscriber_count()
            + self.write_access.subscriber_count()
            + self.contact.subscriber_count()
            + self.emoji_status_access.subscriber_count()
            + self.clipboard_text.subscriber_count()
    }

    // ==================== Host Entry Points ====================

    pub fn on_request_phone_access(&self, status: &str) -> usize {
        tracing::info!(status, "Phone access result");
        self.phone_access.emit(&status.to_string())
    }

    pub fn on_request_write_access(&self, status: &str) -> usize {
        tracing::info!(status, "Write access result");
        self.write_access.emit(&status.to_string())
    }

    /// Decode a requested-contact payload and raise the contact event.
    ///
    /// A malformed payload raises nothing on the contact channel; the failure
    /// is logged, published on `errors` and returned.
    pub fn on_request_contact(&self, payload: &str) -> Result<usize> {
        match RequestedContact::from_json(payload) {
            Ok(contact) => {
                tracing::info!(
                    user_id = contact.contact.user_id,
                    auth_date = %contact.auth_date,
                    "Contact received"
                );
                Ok(self.contact.emit(&contact))
            }
            Err(e) => {
                tracing::warn!("Dropping malformed contact payload: {}", e);
                self.report(Some(CallbackKind::Contact), e.clone(), payload);
                Err(e)
            }
        }
    }

    pub fn on_request_emoji_status_access(&self, status: &str) -> usize {
        tracing::info!(status, "Emoji status access result");
        self.emoji_status_access.emit(&status.to_string())
    }

    pub fn on_read_text_from_clipboard(&self, text: &str) -> usize {
        tracing::info!(len = text.len(), "Clipboard text received");
        self.clipboard_text.emit(&text.to_string())
    }

    /// Route a callback by the host's callback name.
    pub fn dispatch(&self, callback_name: &str, payload: &str) -> Result<usize> {
        let kind = match callback_name.parse::<CallbackKind>() {
            Ok(kind) => kind,
            Err(e) => {
                tracing::warn!("Host invoked unknown callback '{}'", callback_name);
                self.report(None, e.clone(), payload);
                return Err(e);
            }
        };

        match kind {
            CallbackKind::PhoneAccess => Ok(self.on_request_phone_access(payload)),
            CallbackKind::WriteAccess => Ok(self.on_request_write_access(payload)),
            CallbackKind::Contact => self.on_request_contact(payload),
            CallbackKind::EmojiStatusAccess => Ok(self.on_request_emoji_status_access(payload)),
            CallbackKind::ClipboardText => Ok(self.on_read_text_from_clipboard(payload)),
        }
    }

    fn report(&self, callback: Option<CallbackKind>, error: Error, payload: &str) {
        self.errors.emit(&RelayFailure {
            callback,
            error,
            payload: payload.to_string(),
        });
    }
}

impl Default for CallbackRelay {
    fn default() -> Self {
        Self::new()
    }
}
