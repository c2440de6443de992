use super::end_flow::DEFAULT_DASHBOARD_PATH;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a conversation overlay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Unique overlay session identifier (e.g., "conversation-<uuid>")
    pub session_id: String,

    /// Route a confirmed end (and the logo) navigates to
    pub dashboard_path: String,

    /// How long the emergency acknowledgment stays visible
    /// Default: 2 seconds
    pub emergency_ack_window: Duration,

    /// Period of the duration tick
    /// Default: 1 second
    pub tick_period: Duration,
}

impl OverlayConfig {
    /// Fresh config with a newly generated session id
    pub fn with_new_id(&self) -> Self {
        Self {
            session_id: format!("conversation-{}", uuid::Uuid::new_v4()),
            ..self.clone()
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            session_id: format!("conversation-{}", uuid::Uuid::new_v4()),
            dashboard_path: DEFAULT_DASHBOARD_PATH.to_string(),
            emergency_ack_window: Duration::from_millis(2000),
            tick_period: Duration::from_secs(1),
        }
    }
}
