use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // Pre-register counters so they appear even before the first increment.
    counter!("bid_activities_recorded").absolute(0);
    counter!("bids_submitted").absolute(0);
    counter!("bids_confirmed").absolute(0);
    counter!("withdrawals_submitted").absolute(0);
    counter!("pot_poll_failures").absolute(0);

    // Pre-register gauges at zero.
    gauge!("current_pot_id").set(0.0);
    gauge!("pot_total_funds_eth").set(0.0);

    // Histogram is lazily created on first record; force creation.
    histogram!("chain_read_latency_seconds").record(0.0);

    handle
}
