pub mod activity;
pub mod pot;

pub use activity::{AgentDetails, BidActivity, RecordActivityRequest};
pub use pot::{
    LeaderboardEntry, Leaderboard, PendingBalance, PotDetails, PotHistoryEntry, PotSnapshot,
};

use alloy::primitives::U256;
use serde::Serializer;

/// Serialize a U256 wei amount as its decimal string form
/// (`"1000000000000000"`), the same shape the activity feed stores.
pub(crate) fn u256_dec<S: Serializer>(v: &U256, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&v.to_string())
}
