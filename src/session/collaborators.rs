use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Fire-and-forget callback supplied by the host application
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// Routing collaborator
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str) + Send + Sync,
{
    fn navigate(&self, path: &str) {
        self(path)
    }
}

/// Navigator that only logs; used when nothing routes for real
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str) {
        info!("Navigate to {}", path);
    }
}

/// External effects the overlay may emit
///
/// Both callbacks are optional; an absent one is a no-op.
#[derive(Clone)]
pub struct Collaborators {
    on_emergency: Option<Callback>,
    on_end_conversation: Option<Callback>,
    navigator: Arc<dyn Navigator>,
}

impl Collaborators {
    pub fn new(navigator: impl Navigator + 'static) -> Self {
        Self {
            on_emergency: None,
            on_end_conversation: None,
            navigator: Arc::new(navigator),
        }
    }

    pub fn on_emergency(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_emergency = Some(Arc::new(f));
        self
    }

    pub fn on_end_conversation(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_end_conversation = Some(Arc::new(f));
        self
    }

    pub(crate) fn notify_emergency(&self) {
        if let Some(f) = &self.on_emergency {
            f();
        }
    }

    pub(crate) fn end_conversation(&self) {
        if let Some(f) = &self.on_end_conversation {
            f();
        }
    }

    pub(crate) fn navigate(&self, path: &str) {
        self.navigator.navigate(path);
    }
}

impl Default for Collaborators {
    fn default() -> Self {
        Self::new(LogNavigator)
    }
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators")
            .field("on_emergency", &self.on_emergency.is_some())
            .field("on_end_conversation", &self.on_end_conversation.is_some())
            .finish_non_exhaustive()
    }
}
