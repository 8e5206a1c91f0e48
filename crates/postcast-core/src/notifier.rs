//! Notification emitter - a single transient message with auto-dismiss.

use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::{Notification, Severity};

/// How long a notification stays visible.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3);

/// Single-slot notification state shared by the store and the toast boundary.
///
/// Cloning is cheap; all clones publish to the same slot.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<NotifierInner>,
}

struct NotifierInner {
    state: watch::Sender<Notification>,
    ttl: Duration,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl NotifierInner {
    fn expire(&self, sequence: u64) {
        self.state.send_if_modified(|current| {
            if current.sequence == sequence && current.visible {
                current.visible = false;
                tracing::debug!(sequence, "Notification expired");
                true
            } else {
                false
            }
        });
    }
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        let (state, _) = watch::channel(Notification::default());
        Self {
            inner: Arc::new(NotifierInner {
                state,
                ttl,
                timer: Mutex::new(None),
            }),
        }
    }

    /// Show `message`, replacing whatever is visible, and restart the dismiss timer.
    /// Returns the sequence number of the new notification.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> u64 {
        let message = message.into();
        let mut sequence = 0;
        self.inner.state.send_modify(|current| {
            sequence = current.sequence + 1;
            *current = Notification {
                sequence,
                message,
                severity,
                visible: true,
            };
        });

        tracing::debug!(sequence, severity = severity.as_str(), "Notification shown");
        self.restart_timer(sequence);
        sequence
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.notify(message, Severity::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.notify(message, Severity::Error)
    }

    /// Hide the current notification immediately.
    pub fn dismiss(&self) {
        self.cancel_timer();
        self.inner.state.send_if_modified(|current| {
            let was_visible = current.visible;
            current.visible = false;
            was_visible
        });
    }

    /// Snapshot of the current slot.
    pub fn current(&self) -> Notification {
        self.inner.state.borrow().clone()
    }

    /// Receiver that observes every change of the slot.
    pub fn subscribe(&self) -> watch::Receiver<Notification> {
        self.inner.state.subscribe()
    }

    fn restart_timer(&self, sequence: u64) {
        let mut timer = self
            .inner
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = timer.take() {
            previous.abort();
        }

        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!(sequence, "No async runtime, notification will not auto-dismiss");
            return;
        };

        let inner: Weak<NotifierInner> = Arc::downgrade(&self.inner);
        let ttl = self.inner.ttl;
        *timer = Some(runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(inner) = inner.upgrade() {
                inner.expire(sequence);
            }
        }));
    }

    fn cancel_timer(&self) {
        let mut timer = self
            .inner
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = timer.take() {
            previous.abort();
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
