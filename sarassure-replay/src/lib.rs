//! # SARASSURE Replay
//!
//! Plays a recorded exercise session through `sarassure-core` the way the
//! exercise page does: one step mounted at a time, advancing on success.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p sarassure-replay -- session.json
//! cargo run -p sarassure-replay -- session.json --config gestures.json --json
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `ReplayConfig` - Resolved run configuration
//! - `Trace` - Recorded session: steps, container layout, input events
//! - `replay` - Drives the steps and builds a `ReplayReport`

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod player;
mod trace;

pub use player::{replay, ReplayReport, StepReport};
pub use trace::{load_gesture_config, load_trace, Trace, TraceStep};

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for sarassure-replay.
#[derive(Debug, Clone, Parser)]
#[command(name = "sarassure-replay")]
#[command(about = "Replay a recorded SARASSURE exercise session")]
#[command(version)]
pub struct CliArgs {
    /// Recorded session (JSON trace)
    pub trace: PathBuf,

    /// Gesture thresholds (JSON), defaults when omitted
    #[arg(long, env = "SARASSURE_GESTURE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Time allowed after the last event for pending timers to fire
    #[arg(long, default_value = "1000")]
    pub settle_ms: u64,
}

/// Replay run configuration.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Trace file.
    pub trace_path: PathBuf,
    /// Gesture thresholds file.
    pub config_path: Option<PathBuf>,
    /// Emit JSON instead of text.
    pub json_output: bool,
    /// Settle time after the last event, in milliseconds.
    pub settle_ms: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            trace_path: PathBuf::from("session.json"),
            config_path: None,
            json_output: false,
            settle_ms: 1_000,
        }
    }
}

impl From<CliArgs> for ReplayConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            trace_path: args.trace,
            config_path: args.config,
            json_output: args.json,
            settle_ms: args.settle_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_args_map_to_config() {
        let args = CliArgs::parse_from([
            "sarassure-replay",
            "run.json",
            "--config",
            "gestures.json",
            "--json",
            "--settle-ms",
            "250",
        ]);
        let config = ReplayConfig::from(args);
        assert_eq!(config.trace_path, PathBuf::from("run.json"));
        assert_eq!(config.config_path, Some(PathBuf::from("gestures.json")));
        assert!(config.json_output);
        assert_eq!(config.settle_ms, 250);
    }

    #[test]
    fn settle_defaults_to_one_second() {
        let args = CliArgs::parse_from(["sarassure-replay", "run.json"]);
        assert_eq!(ReplayConfig::from(args).settle_ms, ReplayConfig::default().settle_ms);
    }
}
