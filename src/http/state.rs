use crate::session::{Collaborators, LogNavigator, OverlayConfig, OverlayController};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Mounted overlays (session_id → controller)
    pub overlays: Arc<RwLock<HashMap<String, Arc<Mutex<OverlayController>>>>>,

    /// Template for newly mounted overlays
    pub overlay_template: OverlayConfig,
}

impl AppState {
    pub fn new(overlay_template: OverlayConfig) -> Self {
        Self {
            overlays: Arc::new(RwLock::new(HashMap::new())),
            overlay_template,
        }
    }

    /// Callbacks used by server-mounted overlays: effects are logged and
    /// navigation shows up in the snapshot for the client to follow
    pub fn collaborators(session_id: &str) -> Collaborators {
        let emergency_id = session_id.to_string();
        let end_id = session_id.to_string();

        Collaborators::new(LogNavigator)
            .on_emergency(move || warn!("Emergency notification sent for {}", emergency_id))
            .on_end_conversation(move || info!("Conversation {} saved to history", end_id))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}
