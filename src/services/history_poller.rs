use std::sync::Arc;

use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::chain::{ChainError, PotReader};
use crate::models::PotHistoryEntry;
use crate::services::cache::PotCache;

/// Assemble the newest-first history of finished pots by reading each prior
/// pot's result. Pot ids start at 1 and the active pot has no result yet, so
/// a current id of 0 or 1 yields an empty history without issuing any reads.
pub async fn fetch_history(
    reader: &PotReader,
    current_pot_id: u64,
) -> Result<Vec<PotHistoryEntry>, ChainError> {
    let mut entries = Vec::new();
    for pot_id in (1..current_pot_id).rev() {
        entries.push(reader.pot_results(pot_id).await?);
    }
    Ok(entries)
}

/// Refresh the history mirror. A failed per-pot read aborts the cycle and
/// the previous assembled list is kept.
pub async fn refresh_history(reader: &PotReader, cache: &PotCache) {
    let Some(pot_id) = cache.current_pot_id().await else {
        tracing::debug!("History poller: pot id not known yet");
        return;
    };

    match fetch_history(reader, pot_id).await {
        Ok(entries) => cache.set_history(entries).await,
        Err(e) => {
            metrics::counter!("pot_poll_failures").increment(1);
            tracing::warn!(error = %e, pot_id, "History poller: read failed");
            cache.history_error(e.to_string()).await;
        }
    }
}

pub async fn run_history_poller(reader: Arc<PotReader>, cache: PotCache, interval_secs: u64) {
    let mut ticker = interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::info!(interval_secs, "Pot history poller started");

    loop {
        ticker.tick().await;
        refresh_history(&reader, &cache).await;
    }
}
