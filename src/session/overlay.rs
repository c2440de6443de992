use super::collaborators::Collaborators;
use super::config::OverlayConfig;
use super::emergency::EmergencyFlow;
use super::end_flow::EndSessionFlow;
use super::stats::OverlaySnapshot;
use super::status::{SessionStateMachine, SessionStatus, StatusPresentation};
use super::timer::{display_duration, DurationTimer};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Controller behind the active-conversation overlay
///
/// Composes the status machine, the duration timer, the emergency flow and
/// the end-session gate. Both timers are owned here and cancelled on
/// teardown or drop.
///
/// Timers are spawned on the current tokio runtime. Without one, nothing
/// panics: the duration does not tick and the emergency banner is not shown,
/// but status changes and collaborator calls still happen.
pub struct OverlayController {
    /// Overlay configuration
    config: OverlayConfig,

    /// Host callbacks and router
    collaborators: Collaborators,

    /// When the overlay was mounted
    mounted_at: DateTime<Utc>,

    status: SessionStateMachine,
    timer: DurationTimer,
    emergency: EmergencyFlow,
    end_flow: EndSessionFlow,

    /// Most recent navigation target
    last_navigation: Option<String>,

    /// Set once teardown has released the timers
    torn_down: bool,
}

impl OverlayController {
    /// Mount a new overlay in the idle state with zero elapsed time
    pub fn mount(config: OverlayConfig, collaborators: Collaborators) -> Self {
        info!("Mounting conversation overlay: {}", config.session_id);

        let timer = DurationTimer::new(config.tick_period);
        let emergency = EmergencyFlow::new(config.emergency_ack_window);

        Self {
            config,
            collaborators,
            mounted_at: Utc::now(),
            status: SessionStateMachine::new(),
            timer,
            emergency,
            end_flow: EndSessionFlow::new(),
            last_navigation: None,
            torn_down: false,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }

    pub fn status(&self) -> SessionStatus {
        self.status.status()
    }

    pub fn presentation(&self) -> StatusPresentation {
        self.status.presentation()
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.timer.elapsed_seconds()
    }

    pub fn duration_display(&self) -> Option<String> {
        display_duration(self.elapsed_seconds())
    }

    pub fn is_ticking(&self) -> bool {
        self.timer.is_running()
    }

    pub fn emergency_acknowledged(&self) -> bool {
        self.emergency.is_acknowledged()
    }

    pub fn end_confirmation_pending(&self) -> bool {
        self.end_flow.is_pending()
    }

    pub fn last_navigation(&self) -> Option<&str> {
        self.last_navigation.as_deref()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Apply a status pushed by the voice pipeline
    ///
    /// No transition is rejected. The tick runs exactly while the status is
    /// recording, processing or speaking.
    pub fn set_status(&mut self, status: SessionStatus) {
        if !self.is_mounted("set_status") {
            return;
        }

        let previous = self.status.set_status(status);
        if previous != status {
            info!(
                "Overlay {} status: {} -> {}",
                self.config.session_id, previous, status
            );
        }

        if status.is_active() {
            self.timer.start();
        } else {
            self.timer.stop();
        }
    }

    /// Apply an unparsed status; unrecognised values fall back to idle
    pub fn set_status_raw(&mut self, raw: &str) {
        let status = match raw.parse::<SessionStatus>() {
            Ok(status) => status,
            Err(e) => {
                warn!("{}; treating as idle", e);
                SessionStatus::Idle
            }
        };
        self.set_status(status);
    }

    /// Accept the elapsed time from an external clock
    ///
    /// Only applied while the session is active; the duration stays frozen
    /// in idle and ended.
    pub fn sync_duration(&mut self, seconds: u64) {
        if !self.is_mounted("sync_duration") {
            return;
        }

        let status = self.status();
        if !status.is_active() {
            warn!(
                "Ignoring duration push of {}s while overlay {} is {}",
                seconds, self.config.session_id, status
            );
            return;
        }

        self.timer.sync(seconds);
    }

    pub fn trigger_emergency(&mut self) {
        if !self.is_mounted("trigger_emergency") {
            return;
        }
        self.emergency.trigger(&self.collaborators);
    }

    pub fn request_end(&mut self) {
        if !self.is_mounted("request_end") {
            return;
        }
        self.end_flow.request();
    }

    /// End the conversation and route to the dashboard
    ///
    /// Runs the same side effects whether or not `request_end` came first.
    pub fn confirm_end(&mut self) {
        if !self.is_mounted("confirm_end") {
            return;
        }

        self.end_flow
            .confirm(&self.collaborators, &self.config.dashboard_path);
        self.last_navigation = Some(self.config.dashboard_path.clone());
        self.set_status(SessionStatus::Ended);

        info!(
            "Conversation {} ended after {}s",
            self.config.session_id,
            self.elapsed_seconds()
        );
    }

    pub fn cancel_end(&mut self) {
        if !self.is_mounted("cancel_end") {
            return;
        }
        self.end_flow.cancel();
    }

    /// Interaction anywhere outside the confirmation prompt
    pub fn outside_click(&mut self) {
        if !self.is_mounted("outside_click") {
            return;
        }
        self.end_flow.outside_interaction();
    }

    /// Logo press: leave for the dashboard without ending the session
    pub fn back_to_dashboard(&mut self) {
        if !self.is_mounted("back_to_dashboard") {
            return;
        }
        self.collaborators.navigate(&self.config.dashboard_path);
        self.last_navigation = Some(self.config.dashboard_path.clone());
    }

    pub fn snapshot(&self) -> OverlaySnapshot {
        let elapsed_seconds = self.elapsed_seconds();

        OverlaySnapshot {
            session_id: self.config.session_id.clone(),
            mounted_at: self.mounted_at,
            status: self.status(),
            presentation: self.presentation(),
            elapsed_seconds,
            duration_display: display_duration(elapsed_seconds),
            emergency_acknowledged: self.emergency.is_acknowledged(),
            emergency_banner: self.emergency.banner(),
            end_confirmation_pending: self.end_flow.is_pending(),
            last_navigation: self.last_navigation.clone(),
        }
    }

    /// Unmount: cancel both timers. Later events are ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }

        self.timer.stop();
        self.emergency.cancel();
        self.torn_down = true;

        info!(
            "Unmounted conversation overlay: {} ({}s elapsed)",
            self.config.session_id,
            self.timer.elapsed_seconds()
        );
    }

    fn is_mounted(&self, op: &str) -> bool {
        if self.torn_down {
            warn!(
                "Ignoring {} on unmounted overlay {}",
                op, self.config.session_id
            );
        }
        !self.torn_down
    }
}

impl Drop for OverlayController {
    fn drop(&mut self) {
        self.teardown();
    }
}
