use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::activity_repo;
use crate::errors::AppError;
use crate::models::{BidActivity, RecordActivityRequest};
use crate::AppState;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 100;

#[derive(Serialize)]
pub struct RecordResponse {
    pub success: bool,
    pub id: Uuid,
}

/// POST /api/pot/activity — validate and append one client-asserted bid
/// event. Entries are not checked against chain truth and duplicates per
/// txHash are accepted; the feed is cosmetic.
pub async fn record(
    State(state): State<AppState>,
    Json(req): Json<RecordActivityRequest>,
) -> Result<Json<RecordResponse>, AppError> {
    req.validate().map_err(AppError::BadRequest)?;

    let id = activity_repo::insert_activity(&state.db, &req)
        .await
        .map_err(AppError::Internal)?;

    metrics::counter!("bid_activities_recorded").increment(1);
    tracing::info!(round = req.round, tx_hash = %req.tx_hash, "Bid activity recorded");

    Ok(Json(RecordResponse { success: true, id }))
}

#[derive(Deserialize)]
pub struct ActivityQuery {
    pub round: Option<i32>,
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub activities: Vec<BidActivity>,
}

/// GET /api/pot/activity — recent entries newest first, optional round
/// filter, limit capped at 100 (default 50).
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<ListResponse>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let activities = activity_repo::list_recent(&state.db, query.round, limit)
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(ListResponse {
        success: true,
        activities,
    }))
}
