pub mod api;
pub mod chain;
pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod services;

use std::sync::Arc;

use crate::chain::{PotReader, PotWallet};
use crate::config::AppConfig;
use crate::services::PotCache;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: AppConfig,
    pub reader: Arc<PotReader>,
    pub cache: PotCache,
    pub wallet: Option<Arc<PotWallet>>,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
