//! Screen-timeout writer

use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, FutureExt};
use tracing::info;

use super::command::CommandTemplate;
use crate::error::ActionError;

/// Applies the host's inactivity (screen-off) timeout
pub trait TimeoutWriter: Send + Sync {
    fn set_timeout(&self, timeout_ms: u64) -> BoxFuture<'static, Result<(), ActionError>>;
}

/// Writes the timeout by running a command template.
///
/// `{ms}` expands to milliseconds and `{secs}` to whole seconds (at least 1).
#[derive(Debug, Clone)]
pub struct CommandTimeoutWriter {
    template: Arc<CommandTemplate>,
}

impl CommandTimeoutWriter {
    pub fn new(template: CommandTemplate) -> Self {
        Self {
            template: Arc::new(template),
        }
    }
}

impl TimeoutWriter for CommandTimeoutWriter {
    fn set_timeout(&self, timeout_ms: u64) -> BoxFuture<'static, Result<(), ActionError>> {
        let template = Arc::clone(&self.template);
        async move {
            let ms = timeout_ms.to_string();
            let secs = (timeout_ms / 1000).max(1).to_string();
            template.run(&[("ms", ms.as_str()), ("secs", secs.as_str())]).await?;
            info!("Screen timeout set to {}ms", timeout_ms);
            Ok(())
        }
        .boxed()
    }
}

/// Keeps every requested timeout in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingTimeoutWriter {
    written: Arc<Mutex<Vec<u64>>>,
}

impl RecordingTimeoutWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn written(&self) -> Vec<u64> {
        self.written.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

impl TimeoutWriter for RecordingTimeoutWriter {
    fn set_timeout(&self, timeout_ms: u64) -> BoxFuture<'static, Result<(), ActionError>> {
        if let Ok(mut written) = self.written.lock() {
            written.push(timeout_ms);
        }
        async { Ok(()) }.boxed()
    }
}
