//! Countdown state machine

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::scheduler::{Scheduler, TickHandle, TICK_PERIOD};

/// Default countdown length (5 minutes)
pub const DEFAULT_TOTAL_SECONDS: u64 = 300;

/// Timer state owned by the countdown controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub total_seconds: u64,
    pub remaining_seconds: u64,
    pub running: bool,
}

impl TimerState {
    /// Create an idle timer state with a full countdown of `total_seconds`
    pub fn new(total_seconds: u64) -> Self {
        Self {
            total_seconds,
            remaining_seconds: total_seconds,
            running: false,
        }
    }

    /// Check if the countdown is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Portion of the countdown still left, in `[0, 1]`
    pub fn fraction(&self) -> f64 {
        if self.total_seconds == 0 {
            0.0
        } else {
            self.remaining_seconds as f64 / self.total_seconds as f64
        }
    }

    /// Remaining time as `M:SS`
    pub fn label(&self) -> String {
        crate::render::format_clock(self.remaining_seconds)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_SECONDS)
    }
}

/// Receives redraw requests and the completion notification.
pub trait CountdownObserver: Send {
    /// Called after every state change that affects the progress ring
    fn redraw(&mut self, state: &TimerState);

    /// Called exactly once per run, when the countdown reaches zero
    fn completed(&mut self);
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown was not running, or the tick belonged to a cancelled schedule
    Ignored,
    /// One second was taken off
    Advanced { remaining: u64 },
    /// The countdown reached zero and stopped
    Completed,
}

/// Single-timer countdown controller.
///
/// All commands are guarded transitions: calling one in a state where it
/// does not apply is a no-op and returns `false`.
pub struct Countdown {
    state: TimerState,
    scheduler: Box<dyn Scheduler>,
    observer: Box<dyn CountdownObserver>,
    active_tick: Option<TickHandle>,
}

impl Countdown {
    pub fn new(
        total_seconds: u64,
        scheduler: Box<dyn Scheduler>,
        observer: Box<dyn CountdownObserver>,
    ) -> Self {
        Self {
            state: TimerState::new(total_seconds),
            scheduler,
            observer,
            active_tick: None,
        }
    }

    /// Current timer state
    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Select a preset duration. Ignored while running.
    pub fn select_preset(&mut self, minutes: u32) -> bool {
        if self.state.running || minutes == 0 {
            debug!("Ignoring preset {}m (running={})", minutes, self.state.running);
            return false;
        }

        self.state.total_seconds = u64::from(minutes) * 60;
        self.state.remaining_seconds = self.state.total_seconds;
        info!("Preset selected: {} minutes", minutes);
        self.notify_redraw();
        true
    }

    /// Start counting down from the current remaining time
    pub fn start(&mut self) -> bool {
        if self.state.running || self.state.remaining_seconds == 0 {
            debug!(
                "Ignoring start (running={}, remaining={})",
                self.state.running, self.state.remaining_seconds
            );
            return false;
        }

        self.state.running = true;
        self.active_tick = Some(self.scheduler.schedule(TICK_PERIOD));
        info!("Countdown started with {}s remaining", self.state.remaining_seconds);
        self.notify_redraw();
        true
    }

    /// Pause the countdown, keeping the remaining time
    pub fn stop(&mut self) -> bool {
        if !self.state.running {
            debug!("Ignoring stop, countdown is not running");
            return false;
        }

        self.halt();
        info!("Countdown stopped with {}s remaining", self.state.remaining_seconds);
        self.notify_redraw();
        true
    }

    /// Stop and rewind to the full duration. Always applies.
    pub fn reset(&mut self) -> bool {
        if self.state.running {
            self.halt();
        }
        self.state.remaining_seconds = self.state.total_seconds;
        info!("Countdown reset to {}s", self.state.total_seconds);
        self.notify_redraw();
        true
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.running {
            return TickOutcome::Ignored;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if self.state.remaining_seconds == 0 {
            self.halt();
            info!("Countdown finished");
            self.notify_redraw();
            self.observer.completed();
            return TickOutcome::Completed;
        }

        self.notify_redraw();
        TickOutcome::Advanced {
            remaining: self.state.remaining_seconds,
        }
    }

    /// Apply a tick delivered by the scheduler for `handle`.
    ///
    /// Ticks from a schedule that has since been cancelled are dropped.
    pub fn tick_from(&mut self, handle: TickHandle) -> TickOutcome {
        if self.active_tick != Some(handle) {
            debug!("Dropping stale tick from {:?}", handle);
            return TickOutcome::Ignored;
        }
        self.tick()
    }

    fn halt(&mut self) {
        self.state.running = false;
        if let Some(handle) = self.active_tick.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn notify_redraw(&mut self) {
        let state = self.state;
        self.observer.redraw(&state);
    }
}

impl std::fmt::Debug for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Countdown")
            .field("state", &self.state)
            .field("active_tick", &self.active_tick)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use proptest::prelude::*;

    use super::*;
    use crate::countdown::{ManualScheduler, DEFAULT_PRESETS};

    #[derive(Default)]
    struct Recorded {
        redraws: usize,
        completions: usize,
    }

    struct Recorder(Arc<Mutex<Recorded>>);

    impl CountdownObserver for Recorder {
        fn redraw(&mut self, _state: &TimerState) {
            self.0.lock().unwrap().redraws += 1;
        }

        fn completed(&mut self) {
            self.0.lock().unwrap().completions += 1;
        }
    }

    fn countdown() -> (Countdown, ManualScheduler, Arc<Mutex<Recorded>>) {
        let scheduler = ManualScheduler::new();
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let countdown = Countdown::new(
            DEFAULT_TOTAL_SECONDS,
            Box::new(scheduler.clone()),
            Box::new(Recorder(Arc::clone(&recorded))),
        );
        (countdown, scheduler, recorded)
    }

    #[test]
    fn starts_idle_with_default_duration() {
        let (countdown, _, _) = countdown();
        let state = countdown.state();
        assert_eq!(state.total_seconds, 300);
        assert_eq!(state.remaining_seconds, 300);
        assert!(!state.running);
        assert_eq!(state.label(), "5:00");
    }

    #[test]
    fn preset_ignored_while_running() {
        let (mut countdown, _, _) = countdown();
        assert!(countdown.start());
        countdown.tick();

        assert!(!countdown.select_preset(10));
        assert_eq!(countdown.state().total_seconds, 300);
        assert_eq!(countdown.state().remaining_seconds, 299);
    }

    #[test]
    fn zero_minute_preset_is_ignored() {
        let (mut countdown, _, _) = countdown();
        assert!(!countdown.select_preset(0));
        assert_eq!(countdown.state().total_seconds, 300);
    }

    #[test]
    fn start_schedules_and_stop_cancels() {
        let (mut countdown, scheduler, _) = countdown();
        assert!(countdown.start());
        assert!(!countdown.start());
        assert_eq!(scheduler.live_handles().len(), 1);

        assert!(countdown.stop());
        assert!(!countdown.stop());
        assert!(scheduler.live_handles().is_empty());
    }

    #[test]
    fn start_requires_remaining_time() {
        let (mut countdown, _, _) = countdown();
        countdown.select_preset(1);
        countdown.start();
        for _ in 0..60 {
            countdown.tick();
        }
        assert_eq!(countdown.state().remaining_seconds, 0);
        assert!(!countdown.start());
    }

    #[test]
    fn ticks_after_stop_are_noops() {
        let (mut countdown, _, _) = countdown();
        countdown.start();
        countdown.tick();
        countdown.stop();

        for _ in 0..10 {
            assert_eq!(countdown.tick(), TickOutcome::Ignored);
        }
        assert_eq!(countdown.state().remaining_seconds, 299);
    }

    #[test]
    fn stale_tick_handle_is_dropped() {
        let (mut countdown, scheduler, _) = countdown();
        countdown.start();
        let first = scheduler.live_handles()[0];
        countdown.stop();
        countdown.start();
        let second = scheduler.live_handles()[0];
        assert_ne!(first, second);

        assert_eq!(countdown.tick_from(first), TickOutcome::Ignored);
        assert_eq!(
            countdown.tick_from(second),
            TickOutcome::Advanced { remaining: 299 }
        );
    }

    #[test]
    fn reset_restores_full_duration_from_any_state() {
        let (mut countdown, scheduler, _) = countdown();
        countdown.start();
        countdown.tick();
        countdown.tick();
        assert!(countdown.reset());
        assert_eq!(countdown.state(), TimerState::new(300));
        assert!(scheduler.live_handles().is_empty());

        countdown.start();
        countdown.tick();
        countdown.stop();
        countdown.reset();
        assert_eq!(countdown.state(), TimerState::new(300));
    }

    #[test]
    fn full_run_completes_exactly_once() {
        let (mut countdown, scheduler, recorded) = countdown();
        assert!(countdown.start());

        for _ in 0..299 {
            assert!(matches!(countdown.tick(), TickOutcome::Advanced { .. }));
        }
        assert_eq!(countdown.tick(), TickOutcome::Completed);

        let state = countdown.state();
        assert_eq!(state.remaining_seconds, 0);
        assert!(!state.running);
        assert!(scheduler.live_handles().is_empty());
        assert_eq!(recorded.lock().unwrap().completions, 1);

        assert_eq!(countdown.tick(), TickOutcome::Ignored);
        assert_eq!(recorded.lock().unwrap().completions, 1);
    }

    #[test]
    fn machine_is_reusable_after_completion() {
        let (mut countdown, _, recorded) = countdown();
        countdown.select_preset(1);
        for _ in 0..2 {
            countdown.reset();
            countdown.start();
            while countdown.tick() != TickOutcome::Completed {}
        }
        assert_eq!(recorded.lock().unwrap().completions, 2);
    }

    #[test]
    fn every_applied_command_redraws() {
        let (mut countdown, _, recorded) = countdown();
        countdown.select_preset(2);
        countdown.start();
        countdown.tick();
        countdown.stop();
        countdown.stop();
        assert_eq!(recorded.lock().unwrap().redraws, 4);
    }

    #[test]
    fn fraction_is_zero_for_empty_total() {
        let state = TimerState::new(0);
        assert_eq!(state.fraction(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_preset_sets_full_duration(index in 0usize..DEFAULT_PRESETS.len()) {
            let (mut countdown, _, _) = countdown();
            let minutes = DEFAULT_PRESETS[index];
            prop_assert!(countdown.select_preset(minutes));
            let state = countdown.state();
            prop_assert_eq!(state.total_seconds, u64::from(minutes) * 60);
            prop_assert_eq!(state.remaining_seconds, state.total_seconds);
        }

        #[test]
        fn prop_each_tick_takes_one_second(ticks in 1u64..299) {
            let (mut countdown, _, _) = countdown();
            countdown.start();
            for n in 1..=ticks {
                countdown.tick();
                prop_assert_eq!(countdown.state().remaining_seconds, 300 - n);
                prop_assert!(countdown.is_running());
            }
        }
    }
}
