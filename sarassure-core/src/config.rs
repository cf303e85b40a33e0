//! Gesture thresholds.
//!
//! All distances are in the caller's pointer coordinate space (viewport
//! pixels), all durations in milliseconds.

use serde::{Deserialize, Serialize};

use crate::error::{ExerciseError, ExerciseResult};

/// Timing and distance thresholds used by the tracker and classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Movement beyond this distance marks the attempt as moved and
    /// cancels a pending long-press. Also the upper bound of a tap.
    pub move_slop_px: f32,
    /// Minimum travel for a swipe or scroll.
    pub swipe_min_px: f32,
    /// A tap must be released before this delay.
    pub quick_tap_ms: u64,
    /// Hold duration that resolves a long-press.
    pub long_press_ms: u64,
    /// Maximum delay between the two taps of a double-tap (inclusive).
    pub double_tap_window_ms: u64,
    /// Maximum per-axis offset between the two taps of a double-tap.
    pub double_tap_radius_px: f32,
    /// Minimum drag displacement for drag-and-drop.
    pub drag_min_px: f32,
    /// Delay between a matching text value and the success signal.
    pub text_commit_delay_ms: u64,
    /// Consecutive failures before the hint is shown.
    pub hint_after_failures: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            move_slop_px: 10.0,
            swipe_min_px: 50.0,
            quick_tap_ms: 700,
            long_press_ms: 700,
            double_tap_window_ms: 300,
            double_tap_radius_px: 50.0,
            drag_min_px: 30.0,
            text_commit_delay_ms: 500,
            hint_after_failures: 3,
        }
    }
}

impl GestureConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the thresholds are invalid.
    pub fn from_json(json: &str) -> ExerciseResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that thresholds are positive and the tap/swipe bands don't overlap.
    ///
    /// # Errors
    ///
    /// Returns [`ExerciseError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> ExerciseResult<()> {
        let distances = [
            ("move_slop_px", self.move_slop_px),
            ("swipe_min_px", self.swipe_min_px),
            ("double_tap_radius_px", self.double_tap_radius_px),
            ("drag_min_px", self.drag_min_px),
        ];
        for (name, value) in distances {
            if !value.is_finite() || value <= 0.0 {
                return Err(ExerciseError::InvalidConfig(format!(
                    "{name} must be a positive distance, got {value}"
                )));
            }
        }

        let durations = [
            ("quick_tap_ms", self.quick_tap_ms),
            ("long_press_ms", self.long_press_ms),
            ("double_tap_window_ms", self.double_tap_window_ms),
        ];
        for (name, value) in durations {
            if value == 0 {
                return Err(ExerciseError::InvalidConfig(format!(
                    "{name} must be greater than zero"
                )));
            }
        }

        if self.move_slop_px >= self.swipe_min_px {
            return Err(ExerciseError::InvalidConfig(format!(
                "move_slop_px ({}) must be smaller than swipe_min_px ({})",
                self.move_slop_px, self.swipe_min_px
            )));
        }

        if self.hint_after_failures == 0 {
            return Err(ExerciseError::InvalidConfig(
                "hint_after_failures must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
