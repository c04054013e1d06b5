use axum::Json;
use serde_json::{json, Value};

/// GET /api/status — inert stub for external callers that poll this path;
/// fixed 200 payload keeps their logs quiet.
pub async fn status() -> Json<Value> {
    Json(json!({ "ok": true, "status": "running" }))
}

/// GET /api/game/guesses — inert stub, same rationale.
pub async fn game_guesses() -> Json<Value> {
    Json(json!({ "guesses": [] }))
}
