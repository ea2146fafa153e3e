//! Combined selector and countdown state

use std::time::Instant;

use serde::Serialize;

use super::{
    countdown::{Countdown, Phase},
    selector::{Selector, TimerPolicy},
    signals::{Notification, Transition},
};

/// Everything the sleep timer knows, owned by a single task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub selector: Selector,
    pub countdown: Countdown,
}

impl TimerState {
    /// Fresh state: disabled preset selected, countdown idle
    pub fn new(policy: &TimerPolicy) -> Self {
        Self {
            selector: Selector::new(policy),
            countdown: Countdown::idle(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.countdown.is_running()
    }

    /// Cycle-button press
    pub fn press(self, policy: &TimerPolicy, now: Instant) -> Transition<Self> {
        self.selector
            .on_button_press(self.countdown, policy, now)
            .map(|(selector, countdown)| Self {
                selector,
                countdown,
            })
    }

    /// One-second clock tick
    pub fn tick(self) -> Transition<Self> {
        self.countdown.tick().map(|countdown| Self { countdown, ..self })
    }

    /// Display turned on
    pub fn wake(self) -> Transition<Self> {
        self.countdown.on_wake().map(|countdown| Self { countdown, ..self })
    }

    /// Stop the countdown without any signal (service shutdown)
    pub fn stop(self) -> Transition<Self> {
        self.countdown.cancel().map(|countdown| Self { countdown, ..self })
    }

    pub fn snapshot(
        &self,
        policy: &TimerPolicy,
        last_notification: Option<&Notification>,
    ) -> TimerSnapshot {
        let preset = policy.presets.get(self.selector.current_index());
        TimerSnapshot {
            preset_index: self.selector.current_index(),
            preset_label: preset.label.clone(),
            phase: self.countdown.phase(),
            remaining_seconds: self.countdown.remaining_seconds(),
            last_notification: last_notification.map(|n| n.to_string()),
        }
    }
}

/// Read-only view published to the HTTP layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub preset_index: usize,
    pub preset_label: String,
    pub phase: Phase,
    pub remaining_seconds: u64,
    pub last_notification: Option<String>,
}

impl TimerSnapshot {
    /// Snapshot before the timer task has published anything
    pub fn initial(policy: &TimerPolicy) -> Self {
        TimerState::new(policy).snapshot(policy, None)
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::signals::Signal;
    use std::time::Duration;

    #[test]
    fn full_hour_scenario() {
        let policy = TimerPolicy::default();
        let t0 = Instant::now();

        let started = TimerState::new(&policy).press(&policy, t0);
        assert_eq!(started.state.selector.current_index(), 0);
        assert_eq!(started.state.countdown.remaining_seconds(), 3600);

        let mut state = started.state;
        let mut signals = Vec::new();
        for _ in 0..3595 {
            let transition = state.tick();
            state = transition.state;
            signals.extend(transition.signals);
        }
        assert_eq!(state.countdown.remaining_seconds(), 5);
        assert_eq!(
            signals,
            vec![
                Signal::Notify(Notification::Threshold { seconds: 300 }),
                Signal::Notify(Notification::Threshold { seconds: 60 }),
                Signal::Notify(Notification::Threshold { seconds: 5 }),
            ]
        );

        for _ in 0..5 {
            let transition = state.tick();
            state = transition.state;
            signals.extend(transition.signals);
        }
        assert!(!state.is_running());
        assert_eq!(signals.last(), Some(&Signal::Expired));

        let next = state.press(&policy, t0 + Duration::from_secs(3600));
        assert_eq!(next.state.selector.current_index(), 1);
        assert_eq!(next.state.countdown.remaining_seconds(), 1800);
    }

    #[test]
    fn query_with_ten_seconds_left() {
        let policy = TimerPolicy::default();
        let t0 = Instant::now();
        let mut state = TimerState::new(&policy).press(&policy, t0).state;
        for _ in 0..3590 {
            state = state.tick().state;
        }
        assert_eq!(state.countdown.remaining_seconds(), 10);

        let query = state.press(&policy, t0 + Duration::from_secs(3590));
        assert_eq!(query.notification().map(|n| n.to_string()).as_deref(), Some("Remaining: 10s"));
        assert_eq!(query.state.countdown, state.countdown);
        assert_eq!(query.state.selector.current_index(), 0);

        let after = query.state.tick().state;
        assert_eq!(after.countdown.remaining_seconds(), 9);
    }

    #[test]
    fn wake_keeps_selection_but_stops_countdown() {
        let policy = TimerPolicy::default();
        let state = TimerState::new(&policy).press(&policy, Instant::now()).state;

        let woken = state.wake();
        assert_eq!(woken.signals, vec![Signal::Restore]);
        assert!(!woken.state.is_running());
        assert_eq!(woken.state.selector, state.selector);
    }

    #[test]
    fn snapshot_reports_selection() {
        let policy = TimerPolicy::default();
        let initial = TimerSnapshot::initial(&policy);
        assert_eq!(initial.preset_label, "OFF");
        assert!(!initial.is_running());

        let state = TimerState::new(&policy).press(&policy, Instant::now()).state;
        let snapshot = state.snapshot(&policy, Some(&Notification::Disabled));
        assert_eq!(snapshot.preset_label, "60 min");
        assert_eq!(snapshot.remaining_seconds, 3600);
        assert_eq!(snapshot.last_notification.as_deref(), Some("Sleep timer: OFF"));
    }
}
