use super::status::{SessionStatus, StatusPresentation};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything the overlay renders at one instant
#[derive(Debug, Clone, Serialize)]
pub struct OverlaySnapshot {
    /// Overlay session identifier
    pub session_id: String,

    /// When the overlay was mounted
    pub mounted_at: DateTime<Utc>,

    /// Current conversation status
    pub status: SessionStatus,

    /// Icon, label and animation for `status`
    pub presentation: StatusPresentation,

    /// Seconds elapsed while the session was active
    pub elapsed_seconds: u64,

    /// `MM:SS`, absent while nothing has elapsed
    pub duration_display: Option<String>,

    /// Whether the emergency acknowledgment is showing
    pub emergency_acknowledged: bool,

    /// Acknowledgment text, present only while acknowledged
    pub emergency_banner: Option<&'static str>,

    /// Whether the end confirmation prompt is open
    pub end_confirmation_pending: bool,

    /// Most recent route the overlay navigated to
    pub last_navigation: Option<String>,
}
