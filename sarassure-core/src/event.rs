//! Input events for the exercise player.

use serde::{Deserialize, Serialize};

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Pointer pressed (finger down / mouse button down).
    Down,
    /// Pointer moved.
    Move,
    /// Pointer released.
    Up,
    /// Pointer cancelled by the host (e.g., palm rejection, scroll takeover).
    Cancel,
}

/// A raw pointer event in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Pointer identifier (for multi-touch).
    #[serde(default)]
    pub pointer_id: u32,
    /// Phase of this event.
    pub phase: PointerPhase,
    /// X position.
    pub x: f32,
    /// Y position.
    pub y: f32,
    /// Timestamp in milliseconds since the step started.
    pub timestamp_ms: u64,
}

impl PointerEvent {
    /// Create a pointer event for the primary pointer.
    #[must_use]
    pub const fn new(phase: PointerPhase, x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self {
            pointer_id: 0,
            phase,
            x,
            y,
            timestamp_ms,
        }
    }

    /// Pointer pressed.
    #[must_use]
    pub const fn down(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Down, x, y, timestamp_ms)
    }

    /// Pointer moved.
    #[must_use]
    pub const fn moved(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Move, x, y, timestamp_ms)
    }

    /// Pointer released.
    #[must_use]
    pub const fn up(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Up, x, y, timestamp_ms)
    }

    /// Pointer cancelled.
    #[must_use]
    pub const fn cancel(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self::new(PointerPhase::Cancel, x, y, timestamp_ms)
    }

    /// Set the pointer identifier.
    #[must_use]
    pub const fn with_pointer_id(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }
}

/// All input events an exercise step can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InputEvent {
    /// Raw pointer event.
    Pointer(PointerEvent),

    /// Native drag of the zone started.
    DragStart {
        /// Timestamp in milliseconds.
        timestamp_ms: u64,
    },

    /// Native drag of the zone ended.
    DragEnd {
        /// Horizontal displacement of the zone.
        offset_x: f32,
        /// Vertical displacement of the zone.
        offset_y: f32,
        /// Timestamp in milliseconds.
        timestamp_ms: u64,
    },

    /// The text-entry value changed.
    TextChange {
        /// Full current value of the field.
        value: String,
        /// Timestamp in milliseconds.
        timestamp_ms: u64,
    },

    /// The text-entry field lost focus.
    TextBlur {
        /// Timestamp in milliseconds.
        timestamp_ms: u64,
    },

    /// Pointer left the image container.
    PointerLeave {
        /// Timestamp in milliseconds.
        timestamp_ms: u64,
    },

    /// Clock advance with no user input; fires due timers.
    Tick {
        /// Timestamp in milliseconds.
        timestamp_ms: u64,
    },
}

impl InputEvent {
    /// Timestamp of this event.
    #[must_use]
    pub const fn timestamp_ms(&self) -> u64 {
        match self {
            Self::Pointer(pointer) => pointer.timestamp_ms,
            Self::DragStart { timestamp_ms }
            | Self::DragEnd { timestamp_ms, .. }
            | Self::TextChange { timestamp_ms, .. }
            | Self::TextBlur { timestamp_ms }
            | Self::PointerLeave { timestamp_ms }
            | Self::Tick { timestamp_ms } => *timestamp_ms,
        }
    }
}
