//! Launch Parameter Models

use serde::{Deserialize, Serialize};

/// Parameters the Mini App was launched with.
///
/// Only the fields the game reads are typed; anything else the host adds is
/// preserved in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchParams {
    /// Client platform (`ios`, `android`, `tdesktop`, `weba`, ...)
    #[serde(default)]
    pub platform: String,

    /// Mini App API version supported by the client
    #[serde(default)]
    pub version: String,

    /// `startapp` query value from the launch link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_param: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_inline: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_settings: Option<bool>,

    /// Signed init data string; verified server-side only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_data_raw: Option<String>,

    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub theme_params: serde_json::Value,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl LaunchParams {
    pub fn from_json(payload: &str) -> crate::Result<Self> {
        serde_json::from_str(payload)
            .map_err(|e| crate::Error::parse(format!("launch params: {}", e)))
    }

    /// Whether the app was opened from an inline query
    pub fn is_inline(&self) -> bool {
        self.bot_inline.unwrap_or(false)
    }

    /// Look up a theme colour such as `bg_color` or `header_bg_color`.
    pub fn theme_color(&self, key: &str) -> Option<&str> {
        self.theme_params.get(key).and_then(|v| v.as_str())
    }
}
