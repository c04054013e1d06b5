use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::{Leaderboard, PendingBalance, PotDetails, PotHistoryEntry};

/// One mirrored read with the outcome of its most recent refresh.
///
/// A failed refresh records the error but never discards the last good
/// snapshot; consumers keep serving stale data alongside the error.
#[derive(Debug, Clone)]
pub struct Section<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            updated_at: None,
        }
    }
}

impl<T> Section<T> {
    fn store(&mut self, value: T) {
        self.data = Some(value);
        self.error = None;
        self.updated_at = Some(Utc::now());
    }

    fn record_error(&mut self, error: String) {
        self.error = Some(error);
    }
}

#[derive(Default)]
struct CacheInner {
    details: Section<PotDetails>,
    history: Section<Vec<PotHistoryEntry>>,
    leaderboard: Section<Leaderboard>,
    pending: Section<PendingBalance>,
}

/// In-process mirror of contract read-state. Pollers replace whole sections;
/// API handlers read them. Never authoritative — the contract is.
#[derive(Clone, Default)]
pub struct PotCache {
    inner: Arc<RwLock<CacheInner>>,
}

impl PotCache {
    pub async fn set_details(&self, details: PotDetails) {
        self.inner.write().await.details.store(details);
    }

    pub async fn details_error(&self, error: String) {
        self.inner.write().await.details.record_error(error);
    }

    pub async fn details(&self) -> Section<PotDetails> {
        self.inner.read().await.details.clone()
    }

    /// Pot id from the details mirror, if known yet.
    pub async fn current_pot_id(&self) -> Option<u64> {
        self.inner.read().await.details.data.as_ref().map(|d| d.pot_id)
    }

    pub async fn set_history(&self, history: Vec<PotHistoryEntry>) {
        self.inner.write().await.history.store(history);
    }

    pub async fn history_error(&self, error: String) {
        self.inner.write().await.history.record_error(error);
    }

    pub async fn history(&self) -> Section<Vec<PotHistoryEntry>> {
        self.inner.read().await.history.clone()
    }

    pub async fn set_leaderboard(&self, board: Leaderboard) {
        self.inner.write().await.leaderboard.store(board);
    }

    pub async fn leaderboard_error(&self, error: String) {
        self.inner.write().await.leaderboard.record_error(error);
    }

    pub async fn leaderboard(&self) -> Section<Leaderboard> {
        self.inner.read().await.leaderboard.clone()
    }

    pub async fn set_pending(&self, pending: PendingBalance) {
        self.inner.write().await.pending.store(pending);
    }

    pub async fn pending_error(&self, error: String) {
        self.inner.write().await.pending.record_error(error);
    }

    pub async fn pending(&self) -> Section<PendingBalance> {
        self.inner.read().await.pending.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, U256};

    fn sample_details(pot_id: u64) -> PotDetails {
        PotDetails {
            pot_id,
            total_funds_wei: U256::from(1_000_000_000_000_000_000u128),
            total_funds_formatted: "1".into(),
            end_time: 1_700_000_000,
            time_remaining_seconds: 600,
            last_bid_amount_wei: U256::ZERO,
            last_bid_amount_formatted: "0".into(),
            minimum_next_bid_wei: U256::ZERO,
            minimum_next_bid_formatted: "0".into(),
            last_bidder: Address::ZERO,
            top_contributor: Address::ZERO,
            top_contributor_amount_wei: U256::ZERO,
            top_contributor_amount_formatted: "0".into(),
            participant_count: 1,
            is_active: true,
            has_ended: false,
        }
    }

    #[tokio::test]
    async fn test_error_preserves_previous_snapshot() {
        let cache = PotCache::default();
        cache.set_details(sample_details(4)).await;
        cache.details_error("rpc timeout".into()).await;

        let section = cache.details().await;
        assert_eq!(section.data.unwrap().pot_id, 4);
        assert_eq!(section.error.as_deref(), Some("rpc timeout"));
    }

    #[tokio::test]
    async fn test_successful_refresh_clears_error() {
        let cache = PotCache::default();
        cache.details_error("rpc timeout".into()).await;
        cache.set_details(sample_details(5)).await;

        let section = cache.details().await;
        assert!(section.error.is_none());
        assert!(section.updated_at.is_some());
        assert_eq!(section.data.unwrap().pot_id, 5);
    }

    #[tokio::test]
    async fn test_pot_id_unknown_until_first_refresh() {
        let cache = PotCache::default();
        assert_eq!(cache.current_pot_id().await, None);
        cache.set_details(sample_details(2)).await;
        assert_eq!(cache.current_pot_id().await, Some(2));
    }
}
