//! Completion alert background task

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

use crate::{extensions::Alert, state::TimerEvent};

/// Background task that fires the configured alerts whenever a countdown finishes
pub async fn completion_alert_task(mut events: broadcast::Receiver<TimerEvent>, alerts: Vec<Alert>) {
    info!("Starting completion alert task with {} alerts", alerts.len());

    loop {
        match events.recv().await {
            Ok(TimerEvent::Completed { total_seconds }) => {
                info!("Timer of {}s finished, firing alerts", total_seconds);
                for alert in &alerts {
                    if let Err(e) = alert.fire().await {
                        warn!("Alert failed: {}", e);
                    }
                }
            }
            Err(RecvError::Lagged(missed)) => {
                warn!("Completion alert task lagged, {} events missed", missed);
            }
            Err(RecvError::Closed) => {
                info!("Event channel closed, completion alert task exiting");
                break;
            }
        }
    }
}
