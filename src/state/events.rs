//! Countdown notifications

use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

use crate::countdown::{CountdownObserver, TimerState};

/// Events broadcast to background tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// A countdown run reached zero
    Completed { total_seconds: u64 },
}

/// Forwards countdown notifications into channels.
///
/// Redraws go to a watch channel holding the latest state, completions
/// are broadcast as `TimerEvent::Completed`.
#[derive(Debug)]
pub struct ChannelObserver {
    timer_update_tx: watch::Sender<TimerState>,
    event_tx: broadcast::Sender<TimerEvent>,
}

impl ChannelObserver {
    pub fn new(
        timer_update_tx: watch::Sender<TimerState>,
        event_tx: broadcast::Sender<TimerEvent>,
    ) -> Self {
        Self {
            timer_update_tx,
            event_tx,
        }
    }
}

impl CountdownObserver for ChannelObserver {
    fn redraw(&mut self, state: &TimerState) {
        // send_replace keeps the value even when nobody is watching
        self.timer_update_tx.send_replace(*state);
    }

    fn completed(&mut self) {
        let total_seconds = self.timer_update_tx.borrow().total_seconds;
        match self.event_tx.send(TimerEvent::Completed { total_seconds }) {
            Ok(receivers) => debug!("Completion sent to {} listeners", receivers),
            Err(_) => warn!("Countdown finished but no completion listeners are running"),
        }
    }
}
