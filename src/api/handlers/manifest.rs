use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::AppState;

/// GET /.well-known/farcaster.json — static miniapp manifest built from the
/// configured public URL.
pub async fn farcaster_manifest(State(state): State<AppState>) -> Json<Value> {
    let base = state.config.public_app_url.trim_end_matches('/');

    Json(json!({
        "frame": {
            "version": "1",
            "name": "Pot War",
            "iconUrl": format!("{base}/images/icon.png"),
            "homeUrl": base,
            "imageUrl": format!("{base}/images/feed.png"),
            "screenshotUrls": [],
            "tags": ["pot", "bidding", "miniapp"],
            "primaryCategory": "games",
            "buttonTitle": "Bid on Pot War",
            "splashImageUrl": format!("{base}/images/splash.png"),
            "splashBackgroundColor": "#ffffff",
            "webhookUrl": format!("{base}/api/webhook"),
        }
    }))
}
