//! Conversation overlay session management
//!
//! This module provides the `OverlayController` that manages:
//! - Conversation status and its presentation
//! - The elapsed-duration tick
//! - The emergency trigger and its timed acknowledgment
//! - The end-session confirmation gate and the navigation it causes

mod collaborators;
mod config;
mod emergency;
mod end_flow;
mod overlay;
mod stats;
mod status;
mod timer;

pub use collaborators::{Callback, Collaborators, LogNavigator, Navigator};
pub use config::OverlayConfig;
pub use emergency::{EmergencyFlow, EMERGENCY_BANNER};
pub use end_flow::{EndSessionFlow, DEFAULT_DASHBOARD_PATH};
pub use overlay::OverlayController;
pub use stats::OverlaySnapshot;
pub use status::{
    describe, describe_raw, PulseBehavior, SessionStateMachine, SessionStatus,
    StatusPresentation, UnknownStatus,
};
pub use timer::{display_duration, format_duration, DurationTimer};
