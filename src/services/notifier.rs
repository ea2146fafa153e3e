//! Notification sinks

use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, FutureExt};
use tracing::info;

use super::command::CommandTemplate;
use crate::error::ActionError;

/// Shows short status messages to the user. Delivery is best-effort.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: String) -> BoxFuture<'static, Result<(), ActionError>>;
}

/// Writes messages to the log only
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, message: String) -> BoxFuture<'static, Result<(), ActionError>> {
        info!("Notification: {}", message);
        async { Ok(()) }.boxed()
    }
}

/// Logs the message and runs a command template with `{message}` substituted
#[derive(Debug, Clone)]
pub struct CommandSink {
    template: Arc<CommandTemplate>,
}

impl CommandSink {
    pub fn new(template: CommandTemplate) -> Self {
        Self {
            template: Arc::new(template),
        }
    }
}

impl NotificationSink for CommandSink {
    fn notify(&self, message: String) -> BoxFuture<'static, Result<(), ActionError>> {
        info!("Notification: {}", message);
        let template = Arc::clone(&self.template);
        async move { template.run(&[("message", message.as_str())]).await }.boxed()
    }
}

/// Keeps every message in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, message: String) -> BoxFuture<'static, Result<(), ActionError>> {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message);
        }
        async { Ok(()) }.boxed()
    }
}
