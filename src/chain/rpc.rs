use std::time::Instant;

use alloy::primitives::Address;
use reqwest::Client;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// Minimal JSON-RPC client for contract reads against a fixed endpoint.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: Client,
    url: String,
}

impl RpcClient {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// Issue an `eth_call` against `to` at the latest block, returning the
    /// raw `0x…` return data.
    pub async fn eth_call(&self, to: Address, data: &[u8]) -> Result<String, RpcError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [
                { "to": to.to_string(), "data": format!("0x{}", alloy::hex::encode(data)) },
                "latest",
            ],
        });

        let started = Instant::now();
        let resp: serde_json::Value = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        metrics::histogram!("chain_read_latency_seconds").record(started.elapsed().as_secs_f64());

        if let Some(err) = resp.get("error") {
            return Err(RpcError::Rpc {
                code: err.get("code").and_then(|c| c.as_i64()).unwrap_or(0),
                message: err
                    .get("message")
                    .and_then(|m| m.as_str())
                    .unwrap_or("unknown")
                    .to_string(),
            });
        }

        match resp.get("result").and_then(|r| r.as_str()) {
            Some(hex) => Ok(hex.to_string()),
            None => Err(RpcError::Unexpected(resp.to_string())),
        }
    }
}
