//! Timer selector
//!
//! Turns cycle-button presses into either a status query or a move to the
//! next preset. The first press after the debounce window while a countdown
//! runs only reports the remaining time; any other press cycles.

use std::time::{Duration, Instant};

use super::{
    countdown::Countdown,
    presets::PresetList,
    signals::{Notification, Signal, Transition},
};

/// Presses closer together than this are treated as one cycling gesture
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(3000);

/// Immutable selection rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerPolicy {
    pub presets: PresetList,
    pub debounce_window: Duration,
}

impl TimerPolicy {
    pub fn new(presets: PresetList, debounce_window: Duration) -> Self {
        Self {
            presets,
            debounce_window,
        }
    }
}

impl Default for TimerPolicy {
    fn default() -> Self {
        Self::new(PresetList::standard(), DEFAULT_DEBOUNCE_WINDOW)
    }
}

/// What a press turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKind {
    Query,
    Cycle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    current_index: usize,
    last_press: Option<Instant>,
}

impl Selector {
    /// Selection parked on the disabled entry, no press seen yet
    pub fn new(policy: &TimerPolicy) -> Self {
        Self {
            current_index: policy.presets.disabled_index(),
            last_press: None,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Classify a press at `now` without applying it
    pub fn classify(
        &self,
        countdown: &Countdown,
        policy: &TimerPolicy,
        now: Instant,
    ) -> PressKind {
        let window_elapsed = match self.last_press {
            Some(last) => now.saturating_duration_since(last) >= policy.debounce_window,
            None => true,
        };

        if countdown.remaining_seconds() > 0 && window_elapsed {
            PressKind::Query
        } else {
            PressKind::Cycle
        }
    }

    /// Apply a cycle-button press
    pub fn on_button_press(
        self,
        countdown: Countdown,
        policy: &TimerPolicy,
        now: Instant,
    ) -> Transition<(Selector, Countdown)> {
        let pressed = Self {
            last_press: Some(now),
            ..self
        };

        match self.classify(&countdown, policy, now) {
            PressKind::Query => Transition::with(
                (pressed, countdown),
                Signal::Notify(Notification::Remaining {
                    seconds: countdown.remaining_seconds(),
                }),
            ),
            PressKind::Cycle => {
                let next = Self {
                    current_index: policy.presets.next_index(self.current_index),
                    ..pressed
                };
                let preset = policy.presets.get(next.current_index);

                let notification = if preset.is_disabled() {
                    Notification::Disabled
                } else {
                    Notification::PresetSelected {
                        label: preset.label.clone(),
                    }
                };

                countdown
                    .cancel()
                    .then(|idle| idle.start(preset.duration_seconds))
                    .then(|seeded| Transition::with(seeded, Signal::Notify(notification)))
                    .map(|seeded| (next, seeded))
            }
        }
    }
}
