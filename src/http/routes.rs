use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Overlay lifecycle
        .route("/overlays", post(handlers::mount_overlay))
        .route(
            "/overlays/:session_id",
            get(handlers::get_overlay).delete(handlers::unmount_overlay),
        )
        // Status feed
        .route("/overlays/:session_id/status", post(handlers::set_status))
        .route("/overlays/:session_id/duration", post(handlers::sync_duration))
        // Overlay controls
        .route(
            "/overlays/:session_id/emergency",
            post(handlers::trigger_emergency),
        )
        .route("/overlays/:session_id/end/request", post(handlers::request_end))
        .route("/overlays/:session_id/end/confirm", post(handlers::confirm_end))
        .route("/overlays/:session_id/end/cancel", post(handlers::cancel_end))
        .route(
            "/overlays/:session_id/outside-click",
            post(handlers::outside_click),
        )
        .route("/overlays/:session_id/back", post(handlers::back_to_dashboard))
        // The dashboard frontend is served from another origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
