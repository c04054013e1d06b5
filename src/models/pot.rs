use alloy::primitives::{Address, U256};
use serde::Serialize;

use super::u256_dec;

/// Compact pot state, one `getCurrentPotInfo()` read. Never persisted;
/// fully replaced on each poll.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PotSnapshot {
    pub pot_id: u64,
    /// Formatted display amount (ETH, ≤6 decimals).
    pub total_funds: String,
    #[serde(serialize_with = "u256_dec")]
    pub total_funds_wei: U256,
    pub last_bid_amount: String,
    #[serde(serialize_with = "u256_dec")]
    pub last_bid_amount_wei: U256,
    pub minimum_next_bid: String,
    #[serde(serialize_with = "u256_dec")]
    pub minimum_next_bid_wei: U256,
    pub last_bidder: Address,
    pub end_time: u64,
    pub time_remaining_seconds: u64,
    pub is_active: bool,
}

/// Full pot state, one `getCurrentPotDetails()` read. This is the shape the
/// pot poller mirrors.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PotDetails {
    pub pot_id: u64,
    #[serde(serialize_with = "u256_dec")]
    pub total_funds_wei: U256,
    pub total_funds_formatted: String,
    pub end_time: u64,
    pub time_remaining_seconds: u64,
    #[serde(serialize_with = "u256_dec")]
    pub last_bid_amount_wei: U256,
    pub last_bid_amount_formatted: String,
    #[serde(serialize_with = "u256_dec")]
    pub minimum_next_bid_wei: U256,
    pub minimum_next_bid_formatted: String,
    pub last_bidder: Address,
    pub top_contributor: Address,
    #[serde(serialize_with = "u256_dec")]
    pub top_contributor_amount_wei: U256,
    pub top_contributor_amount_formatted: String,
    pub participant_count: u64,
    pub is_active: bool,
    pub has_ended: bool,
}

/// Result of a finished pot, one `getPotResults(potId)` read.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PotHistoryEntry {
    pub pot_id: u64,
    pub start_time: u64,
    pub end_time: u64,
    pub winner: Address,
    #[serde(serialize_with = "u256_dec")]
    pub final_amount_wei: U256,
    pub final_amount_formatted: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub address: Address,
    #[serde(serialize_with = "u256_dec")]
    pub amount_wei: U256,
    pub amount_formatted: String,
}

/// Leaderboard for one pot. The contract returns parallel address/amount
/// sequences; entries are zipped client-side with missing amounts padded
/// as zero.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub pot_id: u64,
    pub entries: Vec<LeaderboardEntry>,
    pub participant_count: usize,
}

impl Leaderboard {
    pub fn empty(pot_id: u64) -> Self {
        Self {
            pot_id,
            entries: Vec::new(),
            participant_count: 0,
        }
    }
}

/// Claimable balance for one address.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingBalance {
    #[serde(serialize_with = "u256_dec")]
    pub amount_wei: U256,
    pub formatted: String,
}

impl PendingBalance {
    pub fn zero() -> Self {
        Self {
            amount_wei: U256::ZERO,
            formatted: "0".into(),
        }
    }
}
