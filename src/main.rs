use std::sync::Arc;

use potwar::api::router::create_router;
use potwar::chain::{PotReader, PotWallet};
use potwar::config::AppConfig;
use potwar::services::{history_poller, leaderboard_poller, pending_poller, pot_poller, PotCache};
use potwar::{db, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to database...");
    let db = db::init_pool(&config.database_url).await?;
    tracing::info!("Database connected");

    let metrics_handle = metrics::init_metrics();

    let reader = Arc::new(PotReader::new(
        reqwest::Client::new(),
        &config.rpc_url,
        config.contract_address,
    ));

    let wallet = match &config.private_key {
        Some(key) => {
            let wallet = PotWallet::new(
                key,
                &config.rpc_url,
                config.chain_id,
                config.contract_address,
            )?;
            tracing::info!(address = %wallet.address(), "Operator wallet configured");
            Some(Arc::new(wallet))
        }
        None => {
            tracing::warn!("No PRIVATE_KEY — read-only mode, bid/withdraw endpoints disabled");
            None
        }
    };

    let cache = PotCache::default();

    // --- Pollers: mirror contract read-state on fixed intervals ---
    tokio::spawn(pot_poller::run_pot_poller(
        reader.clone(),
        cache.clone(),
        config.pot_poll_interval_secs,
    ));
    tokio::spawn(leaderboard_poller::run_leaderboard_poller(
        reader.clone(),
        cache.clone(),
        config.leaderboard_poll_interval_secs,
    ));
    tokio::spawn(history_poller::run_history_poller(
        reader.clone(),
        cache.clone(),
        config.history_poll_interval_secs,
    ));
    if let Some(wallet) = &wallet {
        tokio::spawn(pending_poller::run_pending_poller(
            reader.clone(),
            wallet.address(),
            cache.clone(),
            config.pending_poll_interval_secs,
        ));
    }

    let state = AppState {
        db,
        config,
        reader,
        cache,
        wallet,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
