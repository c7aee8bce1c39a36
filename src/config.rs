//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::{
    countdown::{Presets, DEFAULT_PRESETS},
    extensions::{Alert, AlertKind},
    storage::{default_data_dir, StorageError},
};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "tidskollen")]
#[command(about = "A visual countdown timer for children, driven over a local HTTP API")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Initial countdown length in minutes
    #[arg(short, long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..))]
    pub minutes: u32,

    /// Preset durations in minutes, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_PRESETS.to_vec())]
    pub presets: Vec<u32>,

    /// Alerts fired when the countdown finishes
    #[arg(short, long, value_enum, value_delimiter = ',', default_values_t = vec![AlertKind::Log, AlertKind::Bell])]
    pub alert: Vec<AlertKind>,

    /// Command run by the `sound` alert, e.g. "paplay /usr/share/sounds/freedesktop/stereo/complete.oga"
    #[arg(long)]
    pub sound_command: Option<String>,

    /// Directory for settings and profiles (defaults to the user config dir)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Profile to activate at startup
    #[arg(long)]
    pub profile: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Initial countdown length in seconds
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.minutes) * 60
    }

    pub fn presets(&self) -> Presets {
        Presets::new(self.presets.iter().copied())
    }

    /// Alerts selected on the command line
    pub fn alerts(&self) -> Vec<Alert> {
        Alert::from_kinds(&self.alert, self.sound_command.as_deref())
    }

    /// Resolve the data directory
    pub fn data_dir(&self) -> Result<PathBuf, StorageError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["tidskollen"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.total_seconds(), 300);
        assert_eq!(config.presets(), Presets::default());
        assert_eq!(config.alerts(), vec![Alert::Log, Alert::Bell]);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn custom_presets_and_alerts() {
        let config = Config::try_parse_from([
            "tidskollen",
            "--presets",
            "3,6,9",
            "--alert",
            "sound",
            "--sound-command",
            "aplay ding.wav",
            "--data-dir",
            "/tmp/tk",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.presets().as_slice(), &[3, 6, 9]);
        assert_eq!(
            config.alerts(),
            vec![Alert::Command {
                program: "aplay".to_string(),
                args: vec!["ding.wav".to_string()],
            }]
        );
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/tk"));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn zero_minutes_is_rejected() {
        assert!(Config::try_parse_from(["tidskollen", "--minutes", "0"]).is_err());
    }
}
