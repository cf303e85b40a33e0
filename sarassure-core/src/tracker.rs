//! Pointer tracking - turns down/move/up events into gesture attempts.

use serde::{Deserialize, Serialize};

use crate::event::PointerEvent;

/// One pointer-down-to-pointer-up interaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureAttempt {
    /// Pointer that owns this attempt.
    pub pointer_id: u32,
    /// True between down and up/cancel.
    pub is_active: bool,
    /// Time of the pointer-down.
    pub start_time_ms: u64,
    /// Origin X.
    pub start_x: f32,
    /// Origin Y.
    pub start_y: f32,
    /// Latest X.
    pub current_x: f32,
    /// Latest Y.
    pub current_y: f32,
    /// Set once the pointer travelled beyond the movement slop.
    pub has_moved: bool,
}

impl GestureAttempt {
    /// Start an attempt at a pointer-down.
    #[must_use]
    pub const fn begin(down: &PointerEvent) -> Self {
        Self {
            pointer_id: down.pointer_id,
            is_active: true,
            start_time_ms: down.timestamp_ms,
            start_x: down.x,
            start_y: down.y,
            current_x: down.x,
            current_y: down.y,
            has_moved: false,
        }
    }

    /// Displacement from origin to the latest position.
    #[must_use]
    pub fn displacement(&self) -> (f32, f32) {
        (self.current_x - self.start_x, self.current_y - self.start_y)
    }

    /// Euclidean distance from origin to the latest position.
    #[must_use]
    pub fn distance(&self) -> f32 {
        let (dx, dy) = self.displacement();
        dx.hypot(dy)
    }

    /// Time since the pointer-down.
    #[must_use]
    pub const fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.start_time_ms)
    }
}

/// Time and place of a quick tap that may become the first half of a double-tap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TapMark {
    /// Release time of the tap.
    pub time_ms: u64,
    /// Release X.
    pub x: f32,
    /// Release Y.
    pub y: f32,
}

/// The only state carried from one gesture attempt to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DoubleTapMemory {
    last_tap: Option<TapMark>,
}

impl DoubleTapMemory {
    /// Whether a tap released at `(x, y)` at `time_ms` completes a double-tap.
    #[must_use]
    pub fn is_second_tap(&self, time_ms: u64, x: f32, y: f32, window_ms: u64, radius: f32) -> bool {
        self.last_tap.is_some_and(|first| {
            time_ms.saturating_sub(first.time_ms) <= window_ms
                && (x - first.x).abs() < radius
                && (y - first.y).abs() < radius
        })
    }

    /// Remember a quick tap as a potential first tap.
    pub fn record(&mut self, time_ms: u64, x: f32, y: f32) {
        self.last_tap = Some(TapMark { time_ms, x, y });
    }

    /// Forget the stored tap.
    pub fn clear(&mut self) {
        self.last_tap = None;
    }

    /// The stored tap, if any.
    #[must_use]
    pub const fn last_tap(&self) -> Option<TapMark> {
        self.last_tap
    }
}

/// Result of feeding a pointer-move to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionUpdate {
    /// No attempt in flight for this pointer.
    Ignored,
    /// Position updated.
    Tracked,
    /// Position updated and the movement slop was crossed for the first time.
    StartedMoving,
}

/// Accumulates the in-flight gesture attempt.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    attempt: Option<GestureAttempt>,
}

impl PointerTracker {
    /// Create an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin an attempt. Returns `false` if one is already in flight.
    pub fn press(&mut self, down: &PointerEvent) -> bool {
        if self.is_active() {
            return false;
        }
        self.attempt = Some(GestureAttempt::begin(down));
        true
    }

    /// Update the attempt owned by this pointer.
    pub fn motion(&mut self, event: &PointerEvent, move_slop: f32) -> MotionUpdate {
        let Some(attempt) = self.attempt.as_mut().filter(|a| a.pointer_id == event.pointer_id)
        else {
            return MotionUpdate::Ignored;
        };

        attempt.current_x = event.x;
        attempt.current_y = event.y;

        if !attempt.has_moved && attempt.distance() > move_slop {
            attempt.has_moved = true;
            return MotionUpdate::StartedMoving;
        }
        MotionUpdate::Tracked
    }

    /// Finish the attempt owned by this pointer and hand it over.
    pub fn release(&mut self, up: &PointerEvent) -> Option<GestureAttempt> {
        if self.attempt.as_ref()?.pointer_id != up.pointer_id {
            return None;
        }
        let mut attempt = self.attempt.take()?;
        attempt.current_x = up.x;
        attempt.current_y = up.y;
        attempt.is_active = false;
        Some(attempt)
    }

    /// Drop the attempt without classifying it.
    pub fn cancel(&mut self) -> Option<GestureAttempt> {
        self.attempt.take()
    }

    /// Whether an attempt is in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.attempt.is_some_and(|a| a.is_active)
    }

    /// The in-flight attempt, if any.
    #[must_use]
    pub const fn attempt(&self) -> Option<&GestureAttempt> {
        self.attempt.as_ref()
    }
}
