use std::sync::Arc;

use alloy::primitives::Address;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::chain::PotReader;
use crate::services::cache::PotCache;

/// Refresh the operator's pending-withdrawal mirror once.
pub async fn refresh_pending(reader: &PotReader, address: Address, cache: &PotCache) {
    match reader.pending_withdrawals(Some(address)).await {
        Ok(balance) => cache.set_pending(balance).await,
        Err(e) => {
            metrics::counter!("pot_poll_failures").increment(1);
            tracing::warn!(error = %e, %address, "Pending poller: read failed");
            cache.pending_error(e.to_string()).await;
        }
    }
}

/// Run the pending-withdrawals poller for the operator address. Only spawned
/// when an operator key is configured.
pub async fn run_pending_poller(
    reader: Arc<PotReader>,
    address: Address,
    cache: PotCache,
    interval_secs: u64,
) {
    let mut ticker = interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::info!(interval_secs, %address, "Pending withdrawals poller started");

    loop {
        ticker.tick().await;
        refresh_pending(&reader, address, &cache).await;
    }
}
