//! Host collaborator module
//!
//! Screen-timeout writers, notification sinks, and the dispatcher that turns
//! timer signals into calls on them.

pub mod command;
pub mod dispatch;
pub mod notifier;
pub mod screen_timeout;

// Re-export main types
pub use command::{check_command_available, CommandTemplate};
pub use dispatch::{Dispatcher, TimeoutSettings};
pub use notifier::{CommandSink, LogSink, NotificationSink, RecordingSink};
pub use screen_timeout::{CommandTimeoutWriter, RecordingTimeoutWriter, TimeoutWriter};
