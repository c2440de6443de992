// HTTP API tests, driving the router in-process

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use healthvitals_overlay::{create_router, AppState};
use serde_json::Value;
use tower::ServiceExt;

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn mounted(app: &Router, session_id: &str) {
    let (status, json) = send(
        app,
        Method::POST,
        "/overlays",
        Some(serde_json::json!({ "session_id": session_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["session_id"], session_id);
}

#[tokio::test]
async fn test_health_check() {
    let app = create_router(AppState::default());
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_mount_generates_id_without_body() {
    let app = create_router(AppState::default());

    let (status, json) = send(&app, Method::POST, "/overlays", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(json["session_id"].as_str().unwrap().starts_with("conversation-"));
    assert_eq!(json["status"], "idle");
    assert_eq!(json["duration_display"], Value::Null);
}

#[tokio::test]
async fn test_duplicate_mount_conflicts() {
    let app = create_router(AppState::default());
    mounted(&app, "dup").await;

    let (status, json) = send(
        &app,
        Method::POST,
        "/overlays",
        Some(serde_json::json!({ "session_id": "dup" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["error"].as_str().unwrap().contains("dup"));
}

#[tokio::test]
async fn test_status_feed() {
    let app = create_router(AppState::default());
    mounted(&app, "feed").await;

    let (status, json) = send(
        &app,
        Method::POST,
        "/overlays/feed/status",
        Some(serde_json::json!({ "status": "listening" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "recording");
    assert_eq!(json["presentation"]["label"], "Listening...");

    let (_, json) = send(
        &app,
        Method::POST,
        "/overlays/feed/status",
        Some(serde_json::json!({ "status": "bogus" })),
    )
    .await;
    assert_eq!(json["status"], "idle");
    assert_eq!(json["presentation"]["label"], "Ready");

    // Idle: the duration is frozen, pushes are ignored
    let (_, json) = send(
        &app,
        Method::POST,
        "/overlays/feed/duration",
        Some(serde_json::json!({ "seconds": 7325 })),
    )
    .await;
    assert_eq!(json["duration_display"], Value::Null);

    send(
        &app,
        Method::POST,
        "/overlays/feed/status",
        Some(serde_json::json!({ "status": "speaking" })),
    )
    .await;
    let (_, json) = send(
        &app,
        Method::POST,
        "/overlays/feed/duration",
        Some(serde_json::json!({ "seconds": 7325 })),
    )
    .await;
    assert_eq!(json["duration_display"], "122:05");
}

#[tokio::test]
async fn test_end_flow_over_http() {
    let app = create_router(AppState::default());
    mounted(&app, "end").await;

    let (_, json) = send(&app, Method::POST, "/overlays/end/end/request", None).await;
    assert_eq!(json["end_confirmation_pending"], true);

    let (_, json) = send(&app, Method::POST, "/overlays/end/outside-click", None).await;
    assert_eq!(json["end_confirmation_pending"], false);
    assert_eq!(json["last_navigation"], Value::Null);

    send(&app, Method::POST, "/overlays/end/end/request", None).await;
    let (_, json) = send(&app, Method::POST, "/overlays/end/end/cancel", None).await;
    assert_eq!(json["end_confirmation_pending"], false);

    send(&app, Method::POST, "/overlays/end/end/request", None).await;
    let (status, json) = send(&app, Method::POST, "/overlays/end/end/confirm", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["end_confirmation_pending"], false);
    assert_eq!(json["status"], "ended");
    assert_eq!(json["last_navigation"], "/main-dashboard");

    // A confirmed end releases the overlay
    let (status, _) = send(&app, Method::GET, "/overlays/end", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::POST, "/overlays/end/end/confirm", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_emergency_and_back() {
    let app = create_router(AppState::default());
    mounted(&app, "sos").await;

    let (_, json) = send(&app, Method::POST, "/overlays/sos/emergency", None).await;
    assert_eq!(json["emergency_acknowledged"], true);
    assert_eq!(json["emergency_banner"], "Emergency services contacted");

    let (_, json) = send(&app, Method::POST, "/overlays/sos/back", None).await;
    assert_eq!(json["last_navigation"], "/main-dashboard");
    assert_eq!(json["status"], "idle");
}

#[tokio::test]
async fn test_unmount_then_not_found() {
    let app = create_router(AppState::default());
    mounted(&app, "gone").await;

    let (status, json) = send(&app, Method::DELETE, "/overlays/gone", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["session_id"], "gone");

    let (status, json) = send(&app, Method::GET, "/overlays/gone", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Overlay gone not found");

    let (status, _) = send(&app, Method::DELETE, "/overlays/gone", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
