//! Sleep timer background task
//!
//! Sole owner of the [`TimerState`]. Presses and wake-ups arrive over the
//! command queue; the one-second tick is a single deadline that is re-armed
//! only while the countdown is running, so a cancelled countdown never
//! receives a late tick.

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::{mpsc, oneshot},
    time::{sleep_until, Instant},
};
use tracing::{debug, info};

use crate::{
    services::Dispatcher,
    state::{
        AppState, Notification, PressKind, TimerCommand, TimerSnapshot, TimerState, Transition,
    },
};

const TICK: Duration = Duration::from_secs(1);

struct SleepTimer {
    state: Arc<AppState>,
    dispatcher: Dispatcher,
    timer: TimerState,
    next_tick: Option<Instant>,
    last_notification: Option<Notification>,
}

impl SleepTimer {
    fn new(state: Arc<AppState>, dispatcher: Dispatcher) -> Self {
        let timer = TimerState::new(&state.policy);
        Self {
            state,
            dispatcher,
            timer,
            next_tick: None,
            last_notification: None,
        }
    }

    fn snapshot(&self) -> TimerSnapshot {
        self.timer
            .snapshot(&self.state.policy, self.last_notification.as_ref())
    }

    /// Adopt a transition, hand its signals to the host and publish the result
    fn apply(&mut self, transition: Transition<TimerState>) {
        if let Some(notification) = transition.notification() {
            self.last_notification = Some(notification.clone());
        }
        self.dispatcher.dispatch(&transition.signals);
        self.timer = transition.state;

        if !self.timer.is_running() {
            self.next_tick = None;
        }

        self.state.publish(self.snapshot());
    }

    fn press(&mut self, reply: Option<oneshot::Sender<TimerSnapshot>>) {
        let now = Instant::now();
        let policy = &self.state.policy;
        let kind = self
            .timer
            .selector
            .classify(&self.timer.countdown, policy, now.into_std());

        let transition = self.timer.press(policy, now.into_std());
        self.apply(transition);

        if kind == PressKind::Cycle {
            // a new countdown starts its own clock
            self.next_tick = self.timer.is_running().then(|| now + TICK);
            info!(
                "Selected preset {} ({})",
                self.timer.selector.current_index(),
                self.state.policy.presets.get(self.timer.selector.current_index()).label
            );
        } else {
            debug!(
                "Status query, {}s remaining",
                self.timer.countdown.remaining_seconds()
            );
        }

        self.reply(reply);
    }

    fn wake(&mut self, reply: Option<oneshot::Sender<TimerSnapshot>>) {
        if self.timer.is_running() {
            info!("Display woke up, cancelling countdown");
        } else {
            info!("Display woke up, restoring normal timeout");
        }
        let transition = self.timer.wake();
        self.apply(transition);
        self.reply(reply);
    }

    fn tick(&mut self, deadline: Instant) {
        let transition = self.timer.tick();
        self.apply(transition);

        if self.timer.is_running() {
            self.next_tick = Some(deadline + TICK);
        } else {
            info!("Sleep timer expired, applying short screen timeout");
        }
    }

    fn stop(&mut self) {
        let transition = self.timer.stop();
        self.apply(transition);
    }

    fn reply(&self, reply: Option<oneshot::Sender<TimerSnapshot>>) {
        if let Some(reply) = reply {
            // the requester may have given up waiting
            let _ = reply.send(self.snapshot());
        }
    }
}

/// Background task that owns the sleep timer until stopped
pub async fn sleep_timer_task(
    state: Arc<AppState>,
    mut commands: mpsc::Receiver<TimerCommand>,
    dispatcher: Dispatcher,
) {
    info!("Starting sleep timer task");

    let mut timer = SleepTimer::new(state, dispatcher);
    timer.dispatcher.notify(Notification::Ready.to_string());
    timer.state.publish(timer.snapshot());

    loop {
        let next_tick = timer.next_tick;
        let tick = async move {
            match next_tick {
                Some(deadline) => {
                    sleep_until(deadline).await;
                    deadline
                }
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            command = commands.recv() => {
                match command {
                    Some(TimerCommand::Press { reply }) => timer.press(reply),
                    Some(TimerCommand::Wake { reply }) => timer.wake(reply),
                    Some(TimerCommand::Stop) => {
                        info!("Stopping sleep timer task");
                        timer.stop();
                        break;
                    }
                    None => {
                        info!("Command queue closed, stopping sleep timer task");
                        timer.stop();
                        break;
                    }
                }
            }

            deadline = tick => timer.tick(deadline),
        }
    }
}
