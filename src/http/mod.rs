//! HTTP API for driving conversation overlays from the dashboard frontend
//!
//! - POST /overlays - Mount a new overlay
//! - GET /overlays/:id - Current overlay snapshot
//! - DELETE /overlays/:id - Unmount (cancels timers)
//! - POST /overlays/:id/status, /duration - Status feed from the voice pipeline
//! - POST /overlays/:id/emergency - Emergency trigger
//! - POST /overlays/:id/end/{request,confirm,cancel}, /outside-click - End gate
//! - POST /overlays/:id/back - Logo navigation
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use handlers::{ErrorResponse, MountOverlayRequest, SetStatusRequest, SyncDurationRequest};
pub use routes::create_router;
pub use state::AppState;
