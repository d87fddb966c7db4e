// ============================================================================
// TMA-GAME-SDK - Transfer Requests
// ============================================================================
// The request handed to the wallet connector for signing. Amounts travel as
// nanoton integers in decimal text (1 TON = 1,000,000,000 nanotons).
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::error::SdkError;
use crate::Result;

/// Seconds a transfer request stays valid after it is built
pub const TRANSFER_VALIDITY_SECS: i64 = 600;

/// Decimal places of the TON unit
pub const TON_DECIMALS: usize = 9;

/// A transfer request for the wallet to sign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Unix seconds after which the wallet must refuse to sign
    pub valid_until: i64,

    pub messages: Vec<TransferMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferMessage {
    /// Destination address, user-friendly or raw form
    pub address: String,

    /// Nanotons as a decimal integer string
    pub amount: String,

    /// Text comment attached to the transfer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl TransferRequest {
    /// Single-message request valid for [`TRANSFER_VALIDITY_SECS`] from now
    pub fn single(address: impl Into<String>, nanotons: u128, comment: Option<String>) -> Self {
        Self {
            valid_until: chrono::Utc::now().timestamp() + TRANSFER_VALIDITY_SECS,
            messages: vec![TransferMessage {
                address: address.into(),
                amount: nanotons.to_string(),
                comment,
            }],
        }
    }

    /// Sum of all message amounts in nanotons
    pub fn total_nanotons(&self) -> Result<u128> {
        self.messages.iter().try_fold(0u128, |acc, m| {
            let amount: u128 = m
                .amount
                .parse()
                .map_err(|_| SdkError::invalid_argument(format!("bad amount: {}", m.amount)))?;
            acc.checked_add(amount)
                .ok_or_else(|| SdkError::invalid_argument("total amount overflows"))
        })
    }

    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() >= self.valid_until
    }
}

/// Convert a TON amount to nanotons, rounding to 9 decimal places.
///
/// Non-finite, non-positive and sub-nanoton amounts are rejected.
pub fn to_nano(ton: f64) -> Result<u128> {
    if !ton.is_finite() || ton <= 0.0 {
        return Err(SdkError::invalid_argument(format!(
            "TON amount must be a positive number, got {}",
            ton
        )));
    }

    // Fixed-point formatting is exact decimal rounding, so 0.1 becomes
    // "0.100000000" rather than the nearest binary fraction.
    let fixed = format!("{:.*}", TON_DECIMALS, ton);
    let digits: String = fixed.chars().filter(|c| *c != '.').collect();

    let nanotons: u128 = digits
        .parse()
        .map_err(|_| SdkError::invalid_argument(format!("TON amount out of range: {}", ton)))?;

    if nanotons == 0 {
        return Err(SdkError::invalid_argument(format!(
            "TON amount below one nanoton: {}",
            ton
        )));
    }

    Ok(nanotons)
}
