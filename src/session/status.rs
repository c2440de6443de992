use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Phase of an active conversation
///
/// The status is pushed in from outside (the voice pipeline); any value may
/// follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Overlay mounted, nothing happening yet
    #[default]
    Idle,
    /// Capturing the user's voice
    #[serde(alias = "listening")]
    Recording,
    /// Waiting on the assistant
    Processing,
    /// Assistant reply is being played back
    Speaking,
    /// Session finished; duration frozen
    Ended,
}

impl SessionStatus {
    pub const ALL: [SessionStatus; 5] = [
        SessionStatus::Idle,
        SessionStatus::Recording,
        SessionStatus::Processing,
        SessionStatus::Speaking,
        SessionStatus::Ended,
    ];

    /// Whether the duration clock runs in this status
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            SessionStatus::Recording | SessionStatus::Processing | SessionStatus::Speaking
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Recording => "recording",
            SessionStatus::Processing => "processing",
            SessionStatus::Speaking => "speaking",
            SessionStatus::Ended => "ended",
        }
    }

    /// Parse a raw status, falling back to `Idle` for anything unrecognised
    pub fn from_raw(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a raw status string names none of the five phases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown conversation status: {:?}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for SessionStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "idle" => Ok(SessionStatus::Idle),
            // The conversation page calls this phase "listening"
            "recording" | "listening" => Ok(SessionStatus::Recording),
            "processing" => Ok(SessionStatus::Processing),
            "speaking" => Ok(SessionStatus::Speaking),
            "ended" => Ok(SessionStatus::Ended),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// Pulse animation applied to the status pill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PulseBehavior {
    None,
    Breathing,
    GentlePulse,
}

impl PulseBehavior {
    pub fn css_class(&self) -> &'static str {
        match self {
            PulseBehavior::None => "",
            PulseBehavior::Breathing => "animate-breathing",
            PulseBehavior::GentlePulse => "animate-gentle-pulse",
        }
    }
}

/// Visual descriptor for a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusPresentation {
    pub icon: &'static str,
    pub label: &'static str,
    pub emphasis_class: &'static str,
    pub pulse: PulseBehavior,
}

const IDLE: StatusPresentation = StatusPresentation {
    icon: "MessageCircle",
    label: "Ready",
    emphasis_class: "text-text-secondary",
    pulse: PulseBehavior::None,
};

/// Presentation for a status. Total over every variant.
pub fn describe(status: SessionStatus) -> StatusPresentation {
    match status {
        SessionStatus::Idle => IDLE,
        SessionStatus::Recording => StatusPresentation {
            icon: "Mic",
            label: "Listening...",
            emphasis_class: "text-primary",
            pulse: PulseBehavior::Breathing,
        },
        SessionStatus::Processing => StatusPresentation {
            icon: "Brain",
            label: "Processing...",
            emphasis_class: "text-accent",
            pulse: PulseBehavior::GentlePulse,
        },
        SessionStatus::Speaking => StatusPresentation {
            icon: "Volume2",
            label: "Speaking...",
            emphasis_class: "text-secondary",
            pulse: PulseBehavior::Breathing,
        },
        SessionStatus::Ended => StatusPresentation {
            icon: "PhoneOff",
            label: "Session ended",
            emphasis_class: "text-text-secondary",
            pulse: PulseBehavior::None,
        },
    }
}

/// Presentation for an unparsed status string; unknown values render as idle
pub fn describe_raw(raw: &str) -> StatusPresentation {
    match raw.parse::<SessionStatus>() {
        Ok(status) => describe(status),
        Err(_) => IDLE,
    }
}

/// Holds the current status and hands out its presentation
#[derive(Debug, Default)]
pub struct SessionStateMachine {
    status: SessionStatus,
}

impl SessionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Replace the status, returning the previous one
    pub fn set_status(&mut self, status: SessionStatus) -> SessionStatus {
        std::mem::replace(&mut self.status, status)
    }

    pub fn presentation(&self) -> StatusPresentation {
        describe(self.status)
    }
}
