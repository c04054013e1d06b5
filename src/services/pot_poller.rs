use std::sync::Arc;

use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::chain::PotReader;
use crate::services::cache::PotCache;

/// Refresh the pot-details mirror once. On success the whole snapshot is
/// replaced; on failure the previous snapshot is preserved and the error
/// recorded.
pub async fn refresh_details(reader: &PotReader, cache: &PotCache) {
    match reader.current_pot_details().await {
        Ok(details) => {
            metrics::gauge!("current_pot_id").set(details.pot_id as f64);
            if let Ok(eth) = details.total_funds_formatted.parse::<f64>() {
                metrics::gauge!("pot_total_funds_eth").set(eth);
            }
            cache.set_details(details).await;
        }
        Err(e) => {
            metrics::counter!("pot_poll_failures").increment(1);
            tracing::warn!(error = %e, "Pot poller: failed to read pot details");
            cache.details_error(e.to_string()).await;
        }
    }
}

/// Run the pot-details poller loop. Each refresh is awaited before the next
/// tick, so at most one read is in flight; missed ticks are delayed rather
/// than burst.
pub async fn run_pot_poller(reader: Arc<PotReader>, cache: PotCache, interval_secs: u64) {
    let mut ticker = interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::info!(interval_secs, "Pot state poller started");

    loop {
        ticker.tick().await;
        refresh_details(&reader, &cache).await;
    }
}
