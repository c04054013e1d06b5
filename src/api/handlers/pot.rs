use alloy::primitives::Address;
use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Leaderboard, PotDetails, PotHistoryEntry};
use crate::services::cache::Section;
use crate::AppState;

/// Wire form of one mirrored cache section: the last good snapshot, the most
/// recent refresh error (if any), and when the snapshot was taken.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T: Serialize> From<Section<T>> for MirrorResponse<T> {
    fn from(section: Section<T>) -> Self {
        Self {
            success: true,
            data: section.data,
            error: section.error,
            updated_at: section.updated_at,
        }
    }
}

/// GET /api/pot/current — mirrored pot details from the 15s poller.
pub async fn current(State(state): State<AppState>) -> Json<MirrorResponse<PotDetails>> {
    Json(state.cache.details().await.into())
}

/// GET /api/pot/history — mirrored newest-first results of finished pots.
pub async fn history(State(state): State<AppState>) -> Json<MirrorResponse<Vec<PotHistoryEntry>>> {
    Json(state.cache.history().await.into())
}

/// GET /api/pot/leaderboard — mirrored leaderboard for the current pot.
pub async fn leaderboard(State(state): State<AppState>) -> Json<MirrorResponse<Leaderboard>> {
    Json(state.cache.leaderboard().await.into())
}

#[derive(Deserialize)]
pub struct PendingQuery {
    pub address: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingResponse {
    pub success: bool,
    pub amount_wei: String,
    pub formatted: String,
}

/// GET /api/pot/pending?address=0x… — claimable balance for an address. An
/// absent address short-circuits to zero without a chain read.
pub async fn pending(
    State(state): State<AppState>,
    Query(query): Query<PendingQuery>,
) -> Result<Json<PendingResponse>, AppError> {
    let address = match query.address.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<Address>()
                .map_err(|e| AppError::BadRequest(format!("address: {e}")))?,
        ),
    };

    let balance = state
        .reader
        .pending_withdrawals(address)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(PendingResponse {
        success: true,
        amount_wei: balance.amount_wei.to_string(),
        formatted: balance.formatted,
    }))
}
