//! Alerts fired when a countdown finishes

use clap::ValueEnum;
use tokio::{io::AsyncWriteExt, process::Command};
use tracing::{debug, info, warn};

/// Alert names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlertKind {
    /// Log a "time's up" message
    Log,
    /// Ring the terminal bell
    Bell,
    /// Run the configured sound command
    Sound,
}

/// A configured completion alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    Log,
    Bell,
    /// External program and its arguments
    Command { program: String, args: Vec<String> },
}

impl Alert {
    /// Build the alert list from command line choices.
    ///
    /// `Sound` is skipped when no sound command is configured.
    pub fn from_kinds(kinds: &[AlertKind], sound_command: Option<&str>) -> Vec<Alert> {
        let mut alerts = Vec::new();
        for kind in kinds {
            let alert = match kind {
                AlertKind::Log => Some(Alert::Log),
                AlertKind::Bell => Some(Alert::Bell),
                AlertKind::Sound => match sound_command.and_then(Alert::command) {
                    Some(alert) => Some(alert),
                    None => {
                        warn!("Sound alert requested but no --sound-command given, skipping");
                        None
                    }
                },
            };
            if let Some(alert) = alert {
                if !alerts.contains(&alert) {
                    alerts.push(alert);
                }
            }
        }
        alerts
    }

    /// Parse a whitespace separated command line into a command alert
    pub fn command(line: &str) -> Option<Alert> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Alert::Command {
            program,
            args: parts.collect(),
        })
    }

    /// Fire the alert. Failures are reported, never fatal.
    pub async fn fire(&self) -> Result<(), String> {
        match self {
            Alert::Log => {
                info!("Time's up! The timer has finished.");
                Ok(())
            }
            Alert::Bell => {
                let mut stdout = tokio::io::stdout();
                stdout
                    .write_all(b"\x07")
                    .await
                    .map_err(|e| format!("Failed to ring bell: {}", e))?;
                stdout
                    .flush()
                    .await
                    .map_err(|e| format!("Failed to ring bell: {}", e))
            }
            Alert::Command { program, args } => {
                debug!("Running alert command {} {:?}", program, args);

                let output = Command::new(program)
                    .args(args)
                    .output()
                    .await
                    .map_err(|e| format!("Failed to execute {}: {}", program, e))?;

                if !output.status.success() {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    return Err(format!("{} failed: {}", program, stderr.trim()));
                }

                info!("Alert command {} completed", program);
                Ok(())
            }
        }
    }
}
