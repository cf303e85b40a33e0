//! Error types for exercise-player operations.

use thiserror::Error;

/// Result type for exercise-player operations.
pub type ExerciseResult<T> = Result<T, ExerciseError>;

/// Errors that can occur while loading or validating step data.
///
/// Gesture decisions themselves never fail: a wrong gesture is an
/// [`InteractionOutcome::Failure`](crate::InteractionOutcome::Failure), not an error.
#[derive(Debug, Error)]
pub enum ExerciseError {
    /// Action zone geometry is outside the 0-100 percent range.
    #[error("Invalid action zone: {0}")]
    InvalidZone(String),

    /// Admin colour string could not be parsed.
    #[error("Invalid colour: {0}")]
    InvalidColor(String),

    /// Gesture thresholds are inconsistent.
    #[error("Invalid gesture configuration: {0}")]
    InvalidConfig(String),

    /// Screenshot could not be resolved to a displayable image.
    #[error("Failed to load image: {0}")]
    ImageLoad(String),

    /// Step props serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
