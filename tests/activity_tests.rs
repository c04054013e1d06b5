//! End-to-end activity feed tests against a real Postgres
//! (TEST_DATABASE_URL, migrations applied automatically).

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let _guard = common::db_lock().await;
    let pool = common::setup_test_db().await;
    let app = common::build_test_app(pool);

    let resp = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = json_body(resp).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_record_then_list_round_trip() {
    let _guard = common::db_lock().await;
    let pool = common::setup_test_db().await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "round": 5,
        "txHash": format!("0x{}", "a".repeat(64)),
        "bidder": format!("0x{}", "b".repeat(40)),
        "amountWei": "1000000000000000",
        "amountEth": "0.001",
        "agentId": "agent-7",
        "agentDetails": { "name": "sniper", "type": "llm" },
    });

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/pot/activity")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = json_body(resp).await;
    assert_eq!(json["success"], true);
    assert!(json["id"].is_string());

    let resp = app
        .oneshot(get("/api/pot/activity?round=5&limit=10"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = json_body(resp).await;
    assert_eq!(json["success"], true);
    let activities = json["activities"].as_array().unwrap();
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0]["amountEth"], "0.001");
    assert_eq!(activities[0]["agentId"], "agent-7");
    assert_eq!(activities[0]["agentDetails"]["type"], "llm");
    assert!(activities[0]["timestamp"].is_string());
}

#[tokio::test]
async fn test_round_filter_and_order() {
    let _guard = common::db_lock().await;
    let pool = common::setup_test_db().await;

    common::seed_activity(&pool, 1, 1, 30).await;
    common::seed_activity(&pool, 2, 2, 20).await;
    let newest = common::seed_activity(&pool, 1, 3, 10).await;

    let app = common::build_test_app(pool);
    let resp = app.oneshot(get("/api/pot/activity?round=1")).await.unwrap();
    let json = json_body(resp).await;

    let activities = json["activities"].as_array().unwrap();
    assert_eq!(activities.len(), 2);
    // newest first
    assert_eq!(activities[0]["id"], newest.to_string());
    assert!(activities.iter().all(|a| a["round"] == 1));
}

#[tokio::test]
async fn test_limit_is_capped_at_100() {
    let _guard = common::db_lock().await;
    let pool = common::setup_test_db().await;

    for i in 0..105u32 {
        common::seed_activity(&pool, 9, 1000 + i, i as i64).await;
    }

    let app = common::build_test_app(pool);
    let resp = app
        .oneshot(get("/api/pot/activity?limit=500"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = json_body(resp).await;
    assert_eq!(json["activities"].as_array().unwrap().len(), 100);
}

#[tokio::test]
async fn test_default_limit_is_50() {
    let _guard = common::db_lock().await;
    let pool = common::setup_test_db().await;

    for i in 0..60u32 {
        common::seed_activity(&pool, 3, 2000 + i, i as i64).await;
    }

    let app = common::build_test_app(pool);
    let resp = app.oneshot(get("/api/pot/activity")).await.unwrap();

    let json = json_body(resp).await;
    assert_eq!(json["activities"].as_array().unwrap().len(), 50);
}
