use std::sync::Arc;

use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::chain::PotReader;
use crate::services::cache::PotCache;

/// Refresh the leaderboard mirror for the current pot. Skips the cycle when
/// the pot id is not known yet; pot 0 short-circuits inside the reader.
pub async fn refresh_leaderboard(reader: &PotReader, cache: &PotCache) {
    let Some(pot_id) = cache.current_pot_id().await else {
        tracing::debug!("Leaderboard poller: pot id not known yet");
        return;
    };

    match reader.leaderboard(pot_id).await {
        Ok(board) => cache.set_leaderboard(board).await,
        Err(e) => {
            metrics::counter!("pot_poll_failures").increment(1);
            tracing::warn!(error = %e, pot_id, "Leaderboard poller: read failed");
            cache.leaderboard_error(e.to_string()).await;
        }
    }
}

pub async fn run_leaderboard_poller(reader: Arc<PotReader>, cache: PotCache, interval_secs: u64) {
    let mut ticker = interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::info!(interval_secs, "Leaderboard poller started");

    loop {
        ticker.tick().await;
        refresh_leaderboard(&reader, &cache).await;
    }
}
