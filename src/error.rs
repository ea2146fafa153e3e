//! Error types
//!
//! The timer core itself is infallible. These errors come from building the
//! preset list, from host collaborators, and from talking to the timer task.

use thiserror::Error;

/// Rejected preset list
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresetError {
    #[error("preset list is empty")]
    Empty,

    #[error("preset list has no disabled (0 second) entry")]
    MissingSentinel,

    #[error("preset list has {0} disabled entries, expected exactly one")]
    MultipleSentinels(usize),
}

/// Failure of an outbound host action (timeout writer, notification sink)
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("command template is empty")]
    EmptyCommand,

    #[error("failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Failure to reach the timer task
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("sleep timer task is not running")]
    TimerUnavailable,

    #[error("sleep timer task dropped the reply")]
    NoReply,
}
