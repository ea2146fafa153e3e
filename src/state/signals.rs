//! Signals emitted by timer transitions

use std::fmt;

use crate::utils::format::{format_remaining, format_threshold};

/// Human-readable status for the notification sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The timer task came up
    Ready,
    /// A cycle press selected a running preset
    PresetSelected { label: String },
    /// A cycle press landed on the disabled entry
    Disabled,
    /// A query press while the countdown runs
    Remaining { seconds: u64 },
    /// The countdown crossed one of the warning thresholds
    Threshold { seconds: u64 },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Ready => write!(f, "Sleep timer ready"),
            Notification::PresetSelected { label } => write!(f, "Sleep timer: {}", label),
            Notification::Disabled => write!(f, "Sleep timer: OFF"),
            Notification::Remaining { seconds } => {
                write!(f, "Remaining: {}", format_remaining(*seconds))
            }
            Notification::Threshold { seconds } => {
                write!(f, "TV Sleeping in {}", format_threshold(*seconds))
            }
        }
    }
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    Notify(Notification),
    /// Countdown reached zero: apply the short screen timeout
    Expired,
    /// Display woke up: apply the normal screen timeout
    Restore,
}

/// New state plus whatever it emitted on the way
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Transition<S> {
    pub state: S,
    pub signals: Vec<Signal>,
}

impl<S> Transition<S> {
    pub fn quiet(state: S) -> Self {
        Self {
            state,
            signals: Vec::new(),
        }
    }

    pub fn with(state: S, signal: Signal) -> Self {
        Self {
            state,
            signals: vec![signal],
        }
    }

    /// Apply a follow-up transition, keeping signals in emission order
    pub fn then<T>(self, next: impl FnOnce(S) -> Transition<T>) -> Transition<T> {
        let Transition { state, mut signals } = self;
        let mut next = next(state);
        signals.append(&mut next.signals);
        Transition {
            state: next.state,
            signals,
        }
    }

    pub fn map<T>(self, f: impl FnOnce(S) -> T) -> Transition<T> {
        Transition {
            state: f(self.state),
            signals: self.signals,
        }
    }

    /// First notification in the batch, if any
    pub fn notification(&self) -> Option<&Notification> {
        self.signals.iter().find_map(|signal| match signal {
            Signal::Notify(notification) => Some(notification),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_messages() {
        assert_eq!(
            Notification::PresetSelected { label: "30 min".into() }.to_string(),
            "Sleep timer: 30 min"
        );
        assert_eq!(Notification::Disabled.to_string(), "Sleep timer: OFF");
        assert_eq!(Notification::Remaining { seconds: 10 }.to_string(), "Remaining: 10s");
        assert_eq!(Notification::Remaining { seconds: 65 }.to_string(), "Remaining: 1m 5s");
        assert_eq!(Notification::Threshold { seconds: 300 }.to_string(), "TV Sleeping in 5m");
        assert_eq!(Notification::Threshold { seconds: 5 }.to_string(), "TV Sleeping in 5s");
    }

    #[test]
    fn then_keeps_signal_order() {
        let transition = Transition::with(1u8, Signal::Expired)
            .then(|n| Transition::with(n + 1, Signal::Restore));
        assert_eq!(transition.state, 2);
        assert_eq!(transition.signals, vec![Signal::Expired, Signal::Restore]);
    }
}
