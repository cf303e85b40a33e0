//! Recorded session format.

use std::fs;
use std::path::Path;

use anyhow::Context;
use sarassure_core::{ContainerRect, GestureConfig, InputEvent, StepProps};
use serde::{Deserialize, Serialize};

/// One step of the recorded exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    /// Step props as stored for the exercise.
    pub props: StepProps,
    /// Container layout while this step was shown, if it differed.
    #[serde(default)]
    pub container: Option<ContainerRect>,
}

/// A recorded exercise session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Image container layout.
    pub container: ContainerRect,
    /// Steps in exercise order.
    pub steps: Vec<TraceStep>,
    /// Input events in timestamp order.
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

impl Trace {
    /// Container used for step `index`.
    #[must_use]
    pub fn container_for(&self, index: usize) -> ContainerRect {
        self.steps
            .get(index)
            .and_then(|step| step.container)
            .unwrap_or(self.container)
    }
}

/// Load a trace file.
///
/// # Errors
///
/// Returns an error if the file can't be read or isn't a valid trace.
pub fn load_trace(path: &Path) -> anyhow::Result<Trace> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace {}", path.display()))?;
    let trace: Trace = serde_json::from_str(&json)
        .with_context(|| format!("Invalid trace {}", path.display()))?;

    if trace
        .events
        .windows(2)
        .any(|pair| pair[1].timestamp_ms() < pair[0].timestamp_ms())
    {
        anyhow::bail!("Events in {} are not in timestamp order", path.display());
    }

    tracing::debug!(
        "Loaded trace {}: {} steps, {} events",
        path.display(),
        trace.steps.len(),
        trace.events.len()
    );
    Ok(trace)
}

/// Load gesture thresholds, or the defaults when no file is given.
///
/// # Errors
///
/// Returns an error if the file can't be read or holds invalid thresholds.
pub fn load_gesture_config(path: Option<&Path>) -> anyhow::Result<GestureConfig> {
    let Some(path) = path else {
        return Ok(GestureConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read gesture config {}", path.display()))?;
    GestureConfig::from_json(&json)
        .with_context(|| format!("Invalid gesture config {}", path.display()))
}
