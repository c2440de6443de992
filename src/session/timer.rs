use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, warn};

/// Format elapsed seconds as `MM:SS`
///
/// Minutes are not wrapped into hours: `7325` renders as `"122:05"`.
pub fn format_duration(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Duration text for the status pill, or `None` while nothing has elapsed
pub fn display_duration(seconds: u64) -> Option<String> {
    if seconds == 0 {
        None
    } else {
        Some(format_duration(seconds))
    }
}

/// Low bits of the shared counter hold seconds; high bits hold a stop epoch
const SECONDS_MASK: u64 = (1 << 48) - 1;
const EPOCH_UNIT: u64 = 1 << 48;

/// Elapsed-seconds counter with an owned, cancellable tick task
pub struct DurationTimer {
    /// Seconds elapsed in the current session, tagged with the stop epoch
    elapsed: Arc<AtomicU64>,

    /// Tick period (one second outside of tests)
    period: Duration,

    /// Handle for the running tick task, if any
    tick_task: Option<JoinHandle<()>>,
}

impl DurationTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            elapsed: Arc::new(AtomicU64::new(0)),
            period,
            tick_task: None,
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.load(Ordering::SeqCst) & SECONDS_MASK
    }

    pub fn is_running(&self) -> bool {
        self.tick_task.is_some()
    }

    /// Start ticking. No-op if already running.
    ///
    /// Outside a tokio runtime nothing is spawned: an error is logged and
    /// `false` is returned.
    pub fn start(&mut self) -> bool {
        if self.tick_task.is_some() {
            return true;
        }

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                error!("Cannot start duration tick: {}", e);
                return false;
            }
        };

        let elapsed = Arc::clone(&self.elapsed);
        let epoch = elapsed.load(Ordering::SeqCst) & !SECONDS_MASK;
        let period = self.period;

        let task = handle.spawn(async move {
            // First increment lands one full period after start
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                // A tick racing `stop` sees the bumped epoch and does not land
                let ticked = elapsed.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| {
                    ((v & !SECONDS_MASK) == epoch).then_some(v + 1)
                });

                match ticked {
                    Ok(previous) => debug!(
                        "Conversation duration: {}",
                        format_duration((previous & SECONDS_MASK) + 1)
                    ),
                    Err(_) => break,
                }
            }
        });

        self.tick_task = Some(task);
        true
    }

    /// Cancel the tick task. The counter keeps its value and no further
    /// tick lands once this returns.
    pub fn stop(&mut self) {
        if let Some(task) = self.tick_task.take() {
            self.elapsed.fetch_add(EPOCH_UNIT, Ordering::SeqCst);
            task.abort();
        }
    }

    /// Accept a duration pushed by an external clock
    ///
    /// The counter never moves backwards mid-session; a smaller value is
    /// ignored and `false` is returned.
    pub fn sync(&self, seconds: u64) -> bool {
        let seconds = seconds.min(SECONDS_MASK);
        let synced = self
            .elapsed
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| {
                (seconds >= (v & SECONDS_MASK)).then_some((v & !SECONDS_MASK) | seconds)
            });

        match synced {
            Ok(_) => true,
            Err(previous) => {
                warn!(
                    "Ignoring duration regression: {}s pushed, {}s already elapsed",
                    seconds,
                    previous & SECONDS_MASK
                );
                false
            }
        }
    }
}

impl Drop for DurationTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
