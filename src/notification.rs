use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// How long a toast stays up unless dismissed first.
pub const DISPLAY_DURATION: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub shown_at: Instant,
}

impl Notification {
    pub fn remaining(&self, ttl: Duration) -> Duration {
        ttl.saturating_sub(self.shown_at.elapsed())
    }
}

/// Holds at most one toast. Showing a new one replaces the current one.
#[derive(Clone)]
pub struct NotificationSlot {
    current: Arc<RwLock<Option<Notification>>>,
    ttl: Duration,
}

impl Default for NotificationSlot {
    fn default() -> Self {
        Self::new(DISPLAY_DURATION)
    }
}

impl NotificationSlot {
    pub fn new(ttl: Duration) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn show(&self, message: impl Into<String>, severity: Severity) {
        *self.current.write() = Some(Notification {
            message: message.into(),
            severity,
            shown_at: Instant::now(),
        });
    }

    pub fn dismiss(&self) {
        *self.current.write() = None;
    }

    /// The visible toast, if any. An expired toast is cleared on the way.
    pub fn current(&self) -> Option<Notification> {
        let mut current = self.current.write();
        if current
            .as_ref()
            .is_some_and(|n| n.shown_at.elapsed() >= self.ttl)
        {
            *current = None;
        }
        current.clone()
    }
}
