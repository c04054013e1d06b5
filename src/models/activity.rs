use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the pot_activity table.
///
/// Rows are append-only and non-authoritative: a row's existence is neither
/// necessary nor sufficient for a bid's validity — the contract is.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BidActivity {
    pub id: Uuid,
    pub round: i32,
    pub tx_hash: String,
    pub bidder: String,
    pub amount_wei: String,
    pub amount_eth: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_details: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<i64>,
}

/// Free-form annotations describing the agent that placed a bid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Write-path request body for recording one bid event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordActivityRequest {
    pub round: i64,
    pub tx_hash: String,
    pub bidder: String,
    pub amount_wei: String,
    pub amount_eth: String,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub agent_details: Option<AgentDetails>,
    #[serde(default)]
    pub block_number: Option<i64>,
}

impl RecordActivityRequest {
    /// Field-level validation. The returned diagnostic goes back to the
    /// caller verbatim in the 400 body.
    pub fn validate(&self) -> Result<(), String> {
        if self.round <= 0 || self.round > i32::MAX as i64 {
            return Err(format!("round: must be a positive integer, got {}", self.round));
        }
        if !is_prefixed_hex(&self.tx_hash, 64) {
            return Err("txHash: must be 0x followed by 64 hex characters".into());
        }
        if !is_prefixed_hex(&self.bidder, 40) {
            return Err("bidder: must be 0x followed by 40 hex characters".into());
        }
        Ok(())
    }
}

/// Check for a `0x`-prefixed hex string with exactly `digits` hex characters.
fn is_prefixed_hex(s: &str, digits: usize) -> bool {
    match s.strip_prefix("0x") {
        Some(hex) => hex.len() == digits && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
