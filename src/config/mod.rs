use std::env;

use alloy::primitives::Address;

const DEFAULT_RPC_URL: &str = "https://arb1.arbitrum.io/rpc";

/// Arbitrum One.
const DEFAULT_CHAIN_ID: u64 = 42161;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    // Chain access
    pub rpc_url: String,
    pub chain_id: u64,
    pub contract_address: Address,

    // Operator key (optional — bid/withdraw endpoints are disabled without it)
    pub private_key: Option<String>,

    // Poll intervals
    pub pot_poll_interval_secs: u64,
    pub leaderboard_poll_interval_secs: u64,
    pub history_poll_interval_secs: u64,
    pub pending_poll_interval_secs: u64,

    // Public base URL used by the miniapp manifest
    pub public_app_url: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let contract_address: Address = env::var("CONTRACT_ADDRESS")
            .map_err(|_| anyhow::anyhow!("CONTRACT_ADDRESS must be set"))?
            .parse()
            .map_err(|e| anyhow::anyhow!("CONTRACT_ADDRESS is not a valid address: {e}"))?;

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            rpc_url: env::var("RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.into()),
            chain_id: env::var("CHAIN_ID")
                .unwrap_or_else(|_| DEFAULT_CHAIN_ID.to_string())
                .parse()?,
            contract_address,

            private_key: env::var("PRIVATE_KEY").ok().filter(|k| !k.is_empty()),

            pot_poll_interval_secs: env_u64("POT_POLL_INTERVAL_SECS", 15),
            leaderboard_poll_interval_secs: env_u64("LEADERBOARD_POLL_INTERVAL_SECS", 20),
            history_poll_interval_secs: env_u64("HISTORY_POLL_INTERVAL_SECS", 30),
            pending_poll_interval_secs: env_u64("PENDING_POLL_INTERVAL_SECS", 15),

            public_app_url: env::var("PUBLIC_APP_URL")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
        })
    }

    /// Returns true if an operator key is configured (write endpoints enabled).
    pub fn has_operator_key(&self) -> bool {
        self.private_key.is_some()
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
