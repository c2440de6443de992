pub mod config;
pub mod http;
pub mod session;

pub use config::Config;
pub use http::{create_router, AppState};
pub use session::{
    describe, format_duration, Collaborators, Navigator, OverlayConfig, OverlayController,
    OverlaySnapshot, SessionStatus, StatusPresentation,
};
