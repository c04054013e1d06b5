use alloy::primitives::B256;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio::time::Duration;

use crate::chain::units;
use crate::errors::AppError;
use crate::services::{pending_poller, pot_poller};
use crate::AppState;

/// Delay before re-reading the pending balance after a withdrawal. The exact
/// post-withdrawal balance is not locally computable, so the mirror is
/// re-read after chain-state propagation rather than updated optimistically.
const PENDING_REREAD_DELAY: Duration = Duration::from_secs(5);

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidRequest {
    pub amount_eth: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxResponse {
    pub success: bool,
    pub tx_hash: B256,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pot_id: Option<u64>,
}

/// POST /api/pot/bid — submit `participate(potId)` for the current pot with
/// the given decimal amount. Fails with 400 when no operator key is
/// configured or no pot is active; a revert surfaces as a retryable 500.
pub async fn bid(
    State(state): State<AppState>,
    Json(req): Json<BidRequest>,
) -> Result<Json<TxResponse>, AppError> {
    let Some(wallet) = &state.wallet else {
        return Err(AppError::BadRequest(
            "no operator key configured (read-only mode)".into(),
        ));
    };

    let value = units::parse_amount(&req.amount_eth)
        .map_err(|e| AppError::BadRequest(format!("amountEth: {e}")))?;

    // Pot id from the mirror, falling back to a fresh read before the first
    // poll lands.
    let pot_id = match state.cache.current_pot_id().await {
        Some(id) => id,
        None => state
            .reader
            .current_pot_info()
            .await
            .map_err(|e| AppError::Internal(e.into()))?
            .pot_id,
    };
    if pot_id == 0 {
        return Err(AppError::BadRequest("no active pot".into()));
    }

    metrics::counter!("bids_submitted").increment(1);
    let outcome = wallet
        .place_bid(pot_id, value)
        .await
        .map_err(AppError::Internal)?;
    metrics::counter!("bids_confirmed").increment(1);

    // The pot state just changed; refresh the mirror immediately.
    pot_poller::refresh_details(&state.reader, &state.cache).await;

    Ok(Json(TxResponse {
        success: true,
        tx_hash: outcome.tx_hash,
        block_number: outcome.block_number,
        pot_id: Some(pot_id),
    }))
}

/// POST /api/pot/withdraw — submit `withdraw()` claiming the operator's
/// pending balance, then schedule a delayed re-read of the pending mirror.
pub async fn withdraw(State(state): State<AppState>) -> Result<Json<TxResponse>, AppError> {
    let Some(wallet) = &state.wallet else {
        return Err(AppError::BadRequest(
            "no operator key configured (read-only mode)".into(),
        ));
    };

    metrics::counter!("withdrawals_submitted").increment(1);
    let outcome = wallet.withdraw().await.map_err(AppError::Internal)?;

    let reader = state.reader.clone();
    let cache = state.cache.clone();
    let address = wallet.address();
    tokio::spawn(async move {
        tokio::time::sleep(PENDING_REREAD_DELAY).await;
        pending_poller::refresh_pending(&reader, address, &cache).await;
    });

    Ok(Json(TxResponse {
        success: true,
        tx_hash: outcome.tx_hash,
        block_number: outcome.block_number,
        pot_id: None,
    }))
}
