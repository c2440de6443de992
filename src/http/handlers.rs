use super::state::AppState;
use crate::session::{OverlayController, OverlaySnapshot};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct MountOverlayRequest {
    /// Optional session ID (if not provided, generate UUID)
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    /// Raw status; unknown values fall back to idle
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct SyncDurationRequest {
    pub seconds: u64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn not_found(session_id: &str) -> Response {
    error!("Overlay {} not found", session_id);
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Overlay {} not found", session_id),
        }),
    )
        .into_response()
}

/// Run `action` against a mounted overlay and respond with its snapshot
async fn with_overlay<F>(state: &AppState, session_id: &str, action: F) -> Response
where
    F: FnOnce(&mut OverlayController) + Send,
{
    let overlay = {
        let overlays = state.overlays.read().await;
        overlays.get(session_id).cloned()
    };

    match overlay {
        Some(overlay) => {
            let mut controller = overlay.lock().await;
            action(&mut controller);
            (StatusCode::OK, Json(controller.snapshot())).into_response()
        }
        None => not_found(session_id),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /overlays
/// Mount a new conversation overlay
pub async fn mount_overlay(
    State(state): State<AppState>,
    req: Option<Json<MountOverlayRequest>>,
) -> impl IntoResponse {
    let req = req.map(|Json(r)| r).unwrap_or_default();

    let mut config = state.overlay_template.with_new_id();
    if let Some(session_id) = req.session_id {
        config.session_id = session_id;
    }
    let session_id = config.session_id.clone();

    let mut overlays = state.overlays.write().await;
    if overlays.contains_key(&session_id) {
        return (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: format!("Overlay {} is already mounted", session_id),
            }),
        )
            .into_response();
    }

    let controller = OverlayController::mount(config, AppState::collaborators(&session_id));
    let snapshot: OverlaySnapshot = controller.snapshot();
    overlays.insert(session_id.clone(), Arc::new(Mutex::new(controller)));

    info!("Overlay mounted: {}", session_id);

    (StatusCode::CREATED, Json(snapshot)).into_response()
}

/// DELETE /overlays/:session_id
/// Unmount an overlay, cancelling its timers
pub async fn unmount_overlay(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let overlay = {
        let mut overlays = state.overlays.write().await;
        overlays.remove(&session_id)
    };

    match overlay {
        Some(overlay) => {
            let mut controller = overlay.lock().await;
            controller.teardown();
            (StatusCode::OK, Json(controller.snapshot())).into_response()
        }
        None => not_found(&session_id),
    }
}

/// GET /overlays/:session_id
pub async fn get_overlay(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    with_overlay(&state, &session_id, |_| {}).await
}

/// POST /overlays/:session_id/status
/// Push a status from the voice pipeline
pub async fn set_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SetStatusRequest>,
) -> impl IntoResponse {
    with_overlay(&state, &session_id, |c| c.set_status_raw(&req.status)).await
}

/// POST /overlays/:session_id/duration
/// Push the elapsed time from an external clock
pub async fn sync_duration(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SyncDurationRequest>,
) -> impl IntoResponse {
    with_overlay(&state, &session_id, |c| c.sync_duration(req.seconds)).await
}

/// POST /overlays/:session_id/emergency
pub async fn trigger_emergency(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    with_overlay(&state, &session_id, OverlayController::trigger_emergency).await
}

/// POST /overlays/:session_id/end/request
pub async fn request_end(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    with_overlay(&state, &session_id, OverlayController::request_end).await
}

/// POST /overlays/:session_id/end/confirm
/// End the conversation; the overlay is unmounted and its final snapshot returned
pub async fn confirm_end(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let overlay = {
        let mut overlays = state.overlays.write().await;
        overlays.remove(&session_id)
    };

    match overlay {
        Some(overlay) => {
            let mut controller = overlay.lock().await;
            controller.confirm_end();
            controller.teardown();
            info!("Overlay {} ended and unmounted", session_id);
            (StatusCode::OK, Json(controller.snapshot())).into_response()
        }
        None => not_found(&session_id),
    }
}

/// POST /overlays/:session_id/end/cancel
pub async fn cancel_end(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    with_overlay(&state, &session_id, OverlayController::cancel_end).await
}

/// POST /overlays/:session_id/outside-click
pub async fn outside_click(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    with_overlay(&state, &session_id, OverlayController::outside_click).await
}

/// POST /overlays/:session_id/back
/// Logo press: navigate to the dashboard without ending
pub async fn back_to_dashboard(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    with_overlay(&state, &session_id, OverlayController::back_to_dashboard).await
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
