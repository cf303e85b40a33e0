//! # SARASSURE Replay
//!
//! Replays a recorded exercise session and prints per-step outcomes.

use anyhow::Context;
use clap::Parser;
use sarassure_replay::{load_gesture_config, load_trace, replay, CliArgs, ReplayConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sarassure_core=debug"));

    // Logs go to stderr so the report can be piped.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // Use JSON format when RUST_LOG_FORMAT=json
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ReplayConfig::from(CliArgs::parse());
    tracing::info!("Replaying {}", config.trace_path.display());

    let gestures = load_gesture_config(config.config_path.as_deref())?;
    let trace = load_trace(&config.trace_path)?;
    let report = replay(&trace, &gestures, config.settle_ms)
        .with_context(|| format!("Failed to replay {}", config.trace_path.display()))?;

    if config.json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }

    if !report.is_complete() {
        tracing::warn!(
            "Session incomplete: {}/{} steps",
            report.completed_steps(),
            report.total_steps
        );
    }
    Ok(())
}
