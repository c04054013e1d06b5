use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::require_auth;
use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render))
        // Live aggregate: fresh chain snapshot + recent activity
        .route("/api/pot/live", get(handlers::live::live))
        // Activity feed (unauthenticated; cosmetic, non-authoritative)
        .route(
            "/api/pot/activity",
            get(handlers::activity::list).post(handlers::activity::record),
        )
        // Poller mirrors
        .route("/api/pot/current", get(handlers::pot::current))
        .route("/api/pot/history", get(handlers::pot::history))
        .route("/api/pot/leaderboard", get(handlers::pot::leaderboard))
        .route("/api/pot/pending", get(handlers::pot::pending))
        // Inert stubs for external pollers
        .route("/api/status", get(handlers::stubs::status))
        .route("/api/game/guesses", get(handlers::stubs::game_guesses))
        // Miniapp manifest
        .route(
            "/.well-known/farcaster.json",
            get(handlers::manifest::farcaster_manifest),
        );

    // Fund-spending endpoints — require Bearer token when API_TOKEN is set
    let protected = Router::new()
        .route("/api/pot/bid", post(handlers::tx::bid))
        .route("/api/pot/withdraw", post(handlers::tx::withdraw))
        .layer(middleware::from_fn(require_auth));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
