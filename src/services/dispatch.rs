//! Fire-and-forget execution of timer signals

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use super::{notifier::NotificationSink, screen_timeout::TimeoutWriter};
use crate::{error::ActionError, state::Signal};

/// Screen timeouts applied on expiry and on wake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutSettings {
    pub short_timeout_ms: u64,
    pub normal_timeout_ms: u64,
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            short_timeout_ms: 5_000,
            normal_timeout_ms: 600_000,
        }
    }
}

/// One queued screen-timeout write
#[derive(Debug, Clone, Copy)]
struct TimeoutWrite {
    timeout_ms: u64,
    reason: &'static str,
}

/// Routes signals to the host collaborators.
///
/// Timeout writes go through a single writer task and are applied in the
/// order they were emitted, so a restore issued after an expiry always wins.
/// Notifications are delivered independently. Failures are logged and never
/// reported back to the timer.
#[derive(Clone)]
pub struct Dispatcher {
    writer: Arc<dyn TimeoutWriter>,
    writes: mpsc::UnboundedSender<TimeoutWrite>,
    sink: Arc<dyn NotificationSink>,
    timeouts: TimeoutSettings,
}

impl Dispatcher {
    /// Build the dispatcher and spawn its writer task.
    ///
    /// Must be called from within a tokio runtime. The writer task ends once
    /// every clone of the dispatcher is dropped.
    pub fn new(
        writer: Arc<dyn TimeoutWriter>,
        sink: Arc<dyn NotificationSink>,
        timeouts: TimeoutSettings,
    ) -> Self {
        let (writes, queue) = mpsc::unbounded_channel();
        tokio::spawn(timeout_writer_task(Arc::clone(&writer), queue));

        Self {
            writer,
            writes,
            sink,
            timeouts,
        }
    }

    pub fn dispatch(&self, signals: &[Signal]) {
        for signal in signals {
            match signal {
                Signal::Notify(notification) => self.notify(notification.to_string()),
                Signal::Expired => self.set_timeout(self.timeouts.short_timeout_ms, "sleep"),
                Signal::Restore => self.set_timeout(self.timeouts.normal_timeout_ms, "restore"),
            }
        }
    }

    pub fn notify(&self, message: String) {
        let delivery = self.sink.notify(message);
        tokio::spawn(async move {
            if let Err(e) = delivery.await {
                warn!("Notification not delivered: {}", e);
            }
        });
    }

    fn set_timeout(&self, timeout_ms: u64, reason: &'static str) {
        let write = TimeoutWrite { timeout_ms, reason };
        if self.writes.send(write).is_err() {
            error!(
                "Timeout writer task is gone, dropping {} timeout of {}ms",
                reason, timeout_ms
            );
        }
    }

    /// Apply the normal timeout once and wait for the result (start-up restore)
    pub async fn restore_now(&self) -> Result<(), ActionError> {
        self.writer.set_timeout(self.timeouts.normal_timeout_ms).await
    }
}

/// Apply queued timeout writes one at a time
async fn timeout_writer_task(
    writer: Arc<dyn TimeoutWriter>,
    mut writes: mpsc::UnboundedReceiver<TimeoutWrite>,
) {
    while let Some(TimeoutWrite { timeout_ms, reason }) = writes.recv().await {
        if let Err(e) = writer.set_timeout(timeout_ms).await {
            error!("Failed to apply {} timeout of {}ms: {}", reason, timeout_ms, e);
        }
    }

    debug!("Timeout writer task finished");
}
