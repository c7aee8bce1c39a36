//! Tick driver background task

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{
    countdown::{TickHandle, TickOutcome},
    state::AppState,
};

/// Background task that feeds scheduler ticks into the countdown
pub async fn tick_driver_task(state: Arc<AppState>, mut tick_rx: mpsc::UnboundedReceiver<TickHandle>) {
    info!("Starting tick driver task");

    while let Some(handle) = tick_rx.recv().await {
        match state.on_tick(handle) {
            Ok(TickOutcome::Advanced { remaining }) => {
                debug!("Tick: {}s remaining", remaining);
            }
            Ok(TickOutcome::Completed) => {
                info!("Countdown reached zero");
            }
            Ok(TickOutcome::Ignored) => {
                debug!("Tick from {:?} ignored", handle);
            }
            Err(e) => {
                error!("Failed to apply tick: {}", e);
            }
        }
    }

    info!("Tick channel closed, tick driver exiting");
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;
    use crate::{
        countdown::{Presets, TokioScheduler},
        state::{StateConfig, TimerEvent},
        storage::{ProfileManager, Settings},
    };

    #[tokio::test(start_paused = true)]
    async fn drives_a_countdown_to_completion() {
        let tmp = TempDir::new().unwrap();
        let (scheduler, tick_rx) = TokioScheduler::new();
        let config = StateConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
            total_seconds: 3,
            presets: Presets::default(),
            settings: Settings::default(),
        };
        let profiles = ProfileManager::open(tmp.path()).unwrap();
        let state = Arc::new(AppState::new(config, profiles, Box::new(scheduler)));
        let mut events = state.event_tx.subscribe();

        tokio::spawn(tick_driver_task(Arc::clone(&state), tick_rx));
        state.start().unwrap();

        let event = tokio::time::timeout(Duration::from_secs(10), events.recv())
            .await
            .expect("countdown should finish")
            .unwrap();
        assert_eq!(event, TimerEvent::Completed { total_seconds: 3 });

        let timer = state.get_timer_state().unwrap();
        assert_eq!(timer.remaining_seconds, 0);
        assert!(!timer.running);

        // Nothing ticks after completion
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(state.get_timer_state().unwrap().remaining_seconds, 0);
        assert_eq!(state.get_sessions().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_halts_ticking() {
        let tmp = TempDir::new().unwrap();
        let (scheduler, tick_rx) = TokioScheduler::new();
        let config = StateConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
            total_seconds: 300,
            presets: Presets::default(),
            settings: Settings::default(),
        };
        let profiles = ProfileManager::open(tmp.path()).unwrap();
        let state = Arc::new(AppState::new(config, profiles, Box::new(scheduler)));
        tokio::spawn(tick_driver_task(Arc::clone(&state), tick_rx));

        state.start().unwrap();
        tokio::time::sleep(Duration::from_millis(2500)).await;
        state.stop().unwrap();
        let stopped_at = state.get_timer_state().unwrap().remaining_seconds;
        assert_eq!(stopped_at, 298);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(state.get_timer_state().unwrap().remaining_seconds, stopped_at);
    }
}
