//! Countdown engine
//!
//! Pure state machine over {Idle, Running}. It owns no timer: the owner calls
//! [`Countdown::tick`] once per second while [`Countdown::is_running`] holds.
//!
//! ```text
//! Idle --start(d>0)--> Running --tick--> Running
//!                        |  \--tick (reaches 0, Expired)--> Idle
//!                        \--cancel / wake--> Idle
//! ```

use serde::Serialize;

use super::signals::{Notification, Signal, Transition};

/// Remaining values that trigger a one-time warning
pub const NOTIFY_THRESHOLDS: [u64; 3] = [300, 60, 5];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
}

/// Remaining seconds of the active countdown.
///
/// `remaining_seconds` is zero exactly when the phase is `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    phase: Phase,
    remaining_seconds: u64,
}

impl Countdown {
    pub fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            remaining_seconds: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    /// Begin counting down from `duration_seconds`.
    ///
    /// Replaces any running countdown. A zero duration leaves the engine idle.
    pub fn start(self, duration_seconds: u64) -> Transition<Self> {
        if duration_seconds == 0 {
            return self.cancel();
        }

        Transition::quiet(Self {
            phase: Phase::Running,
            remaining_seconds: duration_seconds,
        })
    }

    /// Stop counting. Idempotent and silent.
    pub fn cancel(self) -> Transition<Self> {
        Transition::quiet(Self::idle())
    }

    /// Advance the countdown by one second
    pub fn tick(self) -> Transition<Self> {
        if !self.is_running() {
            return Transition::quiet(self);
        }

        let remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if remaining_seconds == 0 {
            return Transition::with(Self::idle(), Signal::Expired);
        }

        let next = Self {
            phase: Phase::Running,
            remaining_seconds,
        };

        if NOTIFY_THRESHOLDS.contains(&remaining_seconds) {
            Transition::with(
                next,
                Signal::Notify(Notification::Threshold {
                    seconds: remaining_seconds,
                }),
            )
        } else {
            Transition::quiet(next)
        }
    }

    /// Display turned on: drop any countdown and restore the normal timeout
    pub fn on_wake(self) -> Transition<Self> {
        self.cancel()
            .then(|idle| Transition::with(idle, Signal::Restore))
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::idle()
    }
}
