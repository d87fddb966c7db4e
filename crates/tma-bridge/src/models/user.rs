//! User Models
//!
//! The Telegram user snapshot handed to the Mini App at launch.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Telegram user as reported by the host at startup.
///
/// Optional fields the host leaves out stay `None` and are skipped again on
/// serialization, so a parse/serialize cycle reproduces the host's payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Telegram user identifier
    pub id: i64,

    pub first_name: String,

    /// Always sent by the host, empty when the user has none
    pub last_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_bot: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,

    /// Whether the bot may message this user directly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allows_write_to_pm: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_to_attachment_menu: Option<bool>,

    /// IETF language tag of the user's client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl User {
    /// Get the display name (@username if available, otherwise full name)
    pub fn display_name(&self) -> String {
        match &self.username {
            Some(username) => format!("@{}", username),
            None => self.full_name(),
        }
    }

    /// First and last name joined, without a trailing space when the last name is empty
    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }

    pub fn is_premium(&self) -> bool {
        self.is_premium.unwrap_or(false)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={} name={} username={} premium={} lang={}",
            self.id,
            self.full_name(),
            self.username.as_deref().unwrap_or("-"),
            self.is_premium(),
            self.language_code.as_deref().unwrap_or("-"),
        )
    }
}
