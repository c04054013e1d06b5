use alloy::primitives::Address;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::db::activity_repo;
use crate::errors::AppError;
use crate::models::{BidActivity, PotSnapshot};
use crate::AppState;

const RECENT_ACTIVITY_LIMIT: i64 = 20;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LivePot {
    #[serde(flatten)]
    pub snapshot: PotSnapshot,
    pub contract_address: Address,
    pub chain_id: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveResponse {
    pub success: bool,
    pub pot: LivePot,
    pub recent_activity: Vec<BidActivity>,
}

/// GET /api/pot/live — fresh chain snapshot plus the most recent activity
/// entries in one round trip, for consumers (agents included) that need both
/// before bidding. An activity-store failure degrades to an empty list; a
/// chain failure fails the whole call.
pub async fn live(State(state): State<AppState>) -> Result<Json<LiveResponse>, AppError> {
    let (pot, activity) = tokio::join!(
        state.reader.current_pot_info(),
        activity_repo::list_recent(&state.db, None, RECENT_ACTIVITY_LIMIT),
    );

    let snapshot = pot.map_err(|e| AppError::Internal(e.into()))?;
    let recent_activity = activity.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Live endpoint: activity read failed — returning empty list");
        Vec::new()
    });

    Ok(Json(LiveResponse {
        success: true,
        pot: LivePot {
            snapshot,
            contract_address: state.reader.contract(),
            chain_id: state.config.chain_id,
        },
        recent_activity,
    }))
}
