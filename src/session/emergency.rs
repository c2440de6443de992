use super::collaborators::Collaborators;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Banner shown while an emergency trigger is acknowledged
pub const EMERGENCY_BANNER: &str = "Emergency services contacted";

/// Emergency trigger with a timed acknowledgment banner
pub struct EmergencyFlow {
    /// Whether the acknowledgment banner is showing
    acknowledged: Arc<AtomicBool>,

    /// Bumped on every trigger; a dismiss only applies to its own trigger
    generation: Arc<AtomicU64>,

    /// How long the banner stays up
    window: Duration,

    /// Pending auto-dismiss
    dismiss_task: Option<JoinHandle<()>>,
}

impl EmergencyFlow {
    pub fn new(window: Duration) -> Self {
        Self {
            acknowledged: Arc::new(AtomicBool::new(false)),
            generation: Arc::new(AtomicU64::new(0)),
            window,
            dismiss_task: None,
        }
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged.load(Ordering::SeqCst)
    }

    pub fn banner(&self) -> Option<&'static str> {
        self.is_acknowledged().then_some(EMERGENCY_BANNER)
    }

    /// Notify the emergency collaborator and show the banner
    ///
    /// The notification goes out before any timer work. A trigger while the
    /// banner is up restarts the window. Outside a tokio runtime the
    /// notification is still sent but no banner is shown, since nothing
    /// could dismiss it.
    pub fn trigger(&mut self, collaborators: &Collaborators) {
        warn!("Emergency triggered");
        collaborators.notify_emergency();

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                error!("Cannot schedule emergency acknowledgment: {}", e);
                return;
            }
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.acknowledged.store(true, Ordering::SeqCst);

        if let Some(previous) = self.dismiss_task.take() {
            previous.abort();
        }

        let acknowledged = Arc::clone(&self.acknowledged);
        let current = Arc::clone(&self.generation);
        let window = self.window;

        self.dismiss_task = Some(handle.spawn(async move {
            tokio::time::sleep(window).await;
            if current.load(Ordering::SeqCst) == generation {
                acknowledged.store(false, Ordering::SeqCst);
                debug!("Emergency acknowledgment dismissed");
            }
        }));
    }

    /// Cancel the pending dismiss without touching the banner state
    pub fn cancel(&mut self) {
        if let Some(task) = self.dismiss_task.take() {
            task.abort();
        }
    }
}

impl Drop for EmergencyFlow {
    fn drop(&mut self) {
        self.cancel();
    }
}
