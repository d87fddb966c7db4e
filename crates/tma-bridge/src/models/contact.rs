//! Requested Contact Models
//!
//! Payload delivered by the host after the user agrees to share their phone
//! number. `auth_date` and `hash` are carried verbatim for a backend to check;
//! nothing here verifies them.

use serde::{de, Deserialize, Deserializer, Serialize};

/// The contact card inside a requested-contact payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub user_id: i64,
    pub phone_number: String,
    pub first_name: String,
    pub last_name: String,
}

/// Result of a contact request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedContact {
    pub contact: Contact,

    /// Authorization timestamp, kept as the exact text the host sent
    #[serde(deserialize_with = "opaque_string")]
    pub auth_date: String,

    /// Host signature over the payload; opaque here
    pub hash: String,
}

impl RequestedContact {
    /// Parse a requested-contact JSON payload.
    pub fn from_json(payload: &str) -> crate::Result<Self> {
        serde_json::from_str(payload)
            .map_err(|e| crate::Error::parse(format!("requested contact: {}", e)))
    }
}

/// Accept either a JSON string or a JSON number and keep its textual form.
fn opaque_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
