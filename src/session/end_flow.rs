use super::collaborators::Collaborators;
use tracing::{debug, info};

/// Where a confirmed end (and the logo) always sends the user
pub const DEFAULT_DASHBOARD_PATH: &str = "/main-dashboard";

/// "End conversation?" confirmation gate
///
/// The gate is cosmetic: `confirm` runs its side effects whether or not
/// `request` opened it first.
#[derive(Debug, Default)]
pub struct EndSessionFlow {
    pending: bool,
}

impl EndSessionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Open the confirmation prompt
    pub fn request(&mut self) {
        debug!("End confirmation opened");
        self.pending = true;
    }

    /// End the conversation and navigate to `dashboard_path`
    pub fn confirm(&mut self, collaborators: &Collaborators, dashboard_path: &str) {
        if !self.pending {
            debug!("End confirmed without an open prompt");
        }

        info!("Ending conversation");
        collaborators.end_conversation();
        collaborators.navigate(dashboard_path);
        self.pending = false;
    }

    /// Close the prompt with no side effects
    pub fn cancel(&mut self) {
        if self.pending {
            debug!("End confirmation dismissed");
        }
        self.pending = false;
    }

    /// A click outside the prompt while it is open dismisses it
    pub fn outside_interaction(&mut self) {
        if self.pending {
            self.cancel();
        }
    }
}
