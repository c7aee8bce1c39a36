//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use super::events::{ChannelObserver, TimerEvent};
use crate::{
    countdown::{Countdown, Presets, Scheduler, TickHandle, TickOutcome, TimerState},
    storage::{ProfileData, ProfileManager, Session, Settings},
};

/// Startup values for `AppState`
#[derive(Debug, Clone)]
pub struct StateConfig {
    pub port: u16,
    pub host: String,
    /// Initial countdown length
    pub total_seconds: u64,
    pub presets: Presets,
    pub settings: Settings,
}

/// Main application state: the countdown plus everything around it
#[derive(Debug)]
pub struct AppState {
    /// The countdown state machine
    pub countdown: Arc<Mutex<Countdown>>,
    pub presets: Presets,
    pub settings: Settings,
    /// Active profile and its session log
    pub profiles: Arc<Mutex<ProfileManager>>,
    pub sessions: Arc<Mutex<Vec<Session>>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Completion events for background tasks
    pub event_tx: broadcast::Sender<TimerEvent>,
    /// Latest timer state, updated on every redraw
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create the application state around a fresh countdown
    pub fn new(
        config: StateConfig,
        profiles: ProfileManager,
        scheduler: Box<dyn Scheduler>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(16);
        let (timer_update_tx, timer_update_rx) =
            watch::channel(TimerState::new(config.total_seconds));

        let observer = ChannelObserver::new(timer_update_tx.clone(), event_tx.clone());
        let countdown = Countdown::new(config.total_seconds, scheduler, Box::new(observer));

        let sessions = match profiles.load_data() {
            Ok(data) => data.sessions,
            Err(e) => {
                warn!("Failed to load sessions for profile {}: {}", profiles.current(), e);
                Vec::new()
            }
        };

        Self {
            countdown: Arc::new(Mutex::new(countdown)),
            presets: config.presets,
            settings: config.settings,
            profiles: Arc::new(Mutex::new(profiles)),
            sessions: Arc::new(Mutex::new(sessions)),
            start_time: Instant::now(),
            port: config.port,
            host: config.host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            event_tx,
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    /// Select a preset duration. Returns whether it applied and the new state.
    pub fn select_preset(&self, minutes: u32) -> Result<(bool, TimerState), String> {
        self.command("preset", |countdown| countdown.select_preset(minutes))
    }

    /// Start the countdown
    pub fn start(&self) -> Result<(bool, TimerState), String> {
        self.command("start", |countdown| countdown.start())
    }

    /// Stop the countdown, logging the run as not completed
    pub fn stop(&self) -> Result<(bool, TimerState), String> {
        let (applied, state) = self.command("stop", |countdown| countdown.stop())?;
        if applied {
            self.record_session(Session::now(state.total_seconds, false));
        }
        Ok((applied, state))
    }

    /// Reset the countdown. A run interrupted by the reset is logged as not completed.
    pub fn reset(&self) -> Result<(bool, TimerState), String> {
        let mut was_running = false;
        let (applied, state) = self.command("reset", |countdown| {
            was_running = countdown.is_running();
            countdown.reset()
        })?;
        if was_running {
            self.record_session(Session::now(state.total_seconds, false));
        }
        Ok((applied, state))
    }

    /// Apply a scheduler tick
    pub fn on_tick(&self, handle: TickHandle) -> Result<TickOutcome, String> {
        let (outcome, state) = {
            let mut countdown = lock(&self.countdown, "countdown")?;
            let outcome = countdown.tick_from(handle);
            (outcome, countdown.state())
        };

        if outcome == TickOutcome::Completed {
            self.record_session(Session::now(state.total_seconds, true));
        }
        Ok(outcome)
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        lock(&self.countdown, "countdown").map(|countdown| countdown.state())
    }

    /// Subscribe to timer state updates
    pub fn watch_timer(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Sessions logged for the active profile
    pub fn get_sessions(&self) -> Result<Vec<Session>, String> {
        lock(&self.sessions, "sessions").map(|sessions| sessions.clone())
    }

    /// Active profile name and all known profiles
    pub fn get_profiles(&self) -> Result<(String, Vec<String>), String> {
        let profiles = lock(&self.profiles, "profiles")?;
        let names = profiles.list_profiles().map_err(|e| e.to_string())?;
        Ok((profiles.current().to_string(), names))
    }

    /// Switch to another profile and load its session log
    pub fn switch_profile(&self, name: &str) -> Result<(), String> {
        let mut profiles = lock(&self.profiles, "profiles")?;
        profiles.switch(name).map_err(|e| e.to_string())?;

        let loaded = match profiles.load_data() {
            Ok(data) => data.sessions,
            Err(e) => {
                warn!("Failed to load sessions for profile {}: {}", name, e);
                Vec::new()
            }
        };
        drop(profiles);

        *lock(&self.sessions, "sessions")? = loaded;
        self.touch_last_action("profile");
        Ok(())
    }

    /// Append a session and persist the profile. Storage failures are only logged.
    pub fn record_session(&self, session: Session) {
        info!(
            "Recording session: {} min, completed={}",
            session.duration, session.completed
        );

        let data = match lock(&self.sessions, "sessions") {
            Ok(mut sessions) => {
                sessions.push(session);
                ProfileData {
                    sessions: sessions.clone(),
                }
            }
            Err(e) => {
                warn!("{}", e);
                return;
            }
        };

        match lock(&self.profiles, "profiles") {
            Ok(profiles) => {
                if let Err(e) = profiles.save_data(&data) {
                    warn!("Failed to save sessions: {}", e);
                }
            }
            Err(e) => warn!("{}", e),
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn command<F>(&self, action: &str, apply: F) -> Result<(bool, TimerState), String>
    where
        F: FnOnce(&mut Countdown) -> bool,
    {
        let (applied, state) = {
            let mut countdown = lock(&self.countdown, "countdown")?;
            let applied = apply(&mut *countdown);
            (applied, countdown.state())
        };

        if applied {
            self.touch_last_action(action);
        }
        Ok((applied, state))
    }

    fn touch_last_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, String> {
    mutex
        .lock()
        .map_err(|e| format!("Failed to lock {} state: {}", what, e))
}
