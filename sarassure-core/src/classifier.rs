//! # Gesture classification
//!
//! Decides, at pointer-up, whether a finished gesture attempt satisfies
//! the step's expected action.
//!
//! ```text
//! origin outside zone ──────────────▶ Reject(OutsideZone)
//! travel > swipe_min  ── dominant axis ──▶ swipe / scroll match
//! travel < move_slop  ── tap family ─────▶ tap / double-tap / open text entry
//! anything else       ──────────────▶ Reject (drag-and-drop excepted)
//! ```
//!
//! The classifier holds no state. The double-tap memory is owned by the
//! caller and passed in explicitly.

use serde::{Deserialize, Serialize};

use crate::action::ActionType;
use crate::config::GestureConfig;
use crate::tracker::{DoubleTapMemory, GestureAttempt};

/// Direction of a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    /// Towards negative X.
    Left,
    /// Towards positive X.
    Right,
    /// Towards negative Y.
    Up,
    /// Towards positive Y.
    Down,
}

/// A gesture recognized as the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    /// Single quick tap.
    Tap,
    /// Second tap of a double-tap.
    DoubleTap,
    /// Hold past the long-press delay.
    LongPress,
    /// Directional swipe.
    Swipe(SwipeDirection),
    /// Vertical scroll.
    Scroll,
    /// Zone dragged far enough.
    DragAndDrop,
    /// Expected value typed.
    TextEntry,
}

/// Why a gesture was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Gesture started outside the active zone.
    OutsideZone,
    /// Swipe on the expected axis but the wrong way, or on the wrong axis.
    WrongDirection,
    /// A different gesture than the expected one.
    WrongGesture,
    /// Drag too short.
    DragTooShort,
    /// Nothing recognizable (e.g., slow tap, medium travel).
    Unrecognized,
}

/// Decision for one finished gesture attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Expected gesture performed.
    Accept(Gesture),
    /// Wrong gesture.
    Reject(RejectReason),
    /// First tap of a double-tap stored; waiting for the second.
    AwaitSecondTap,
    /// Tap on a text/number step; the entry surface should open.
    OpenTextEntry,
    /// Nothing to report (drag-and-drop resolves through its own path).
    NoDecision,
}

/// Classify a released gesture attempt against the expected action.
///
/// `in_zone` is the membership of the attempt's origin in the active zone,
/// computed by the caller. `release_ms` is the pointer-up time.
pub fn classify(
    attempt: &GestureAttempt,
    release_ms: u64,
    action: ActionType,
    in_zone: bool,
    memory: &mut DoubleTapMemory,
    config: &GestureConfig,
) -> Verdict {
    if !in_zone {
        tracing::debug!(%action, "Gesture origin outside action zone");
        return Verdict::Reject(RejectReason::OutsideZone);
    }

    let (dx, dy) = attempt.displacement();
    let distance = dx.hypot(dy);

    if distance > config.swipe_min_px {
        tracing::debug!(%action, dx, dy, "Large motion");
        if let Some(verdict) = classify_large_motion(dx, dy, action, config.swipe_min_px) {
            return verdict;
        }
    } else if distance < config.move_slop_px {
        tracing::debug!(%action, distance, "Small motion");
        if let Some(verdict) = classify_small_motion(attempt, release_ms, action, memory, config) {
            return verdict;
        }
    }

    if action == ActionType::DragAndDrop {
        return Verdict::NoDecision;
    }

    let reason = if distance > config.swipe_min_px {
        RejectReason::WrongGesture
    } else {
        RejectReason::Unrecognized
    };
    tracing::debug!(%action, distance, ?reason, "Gesture fell through");
    Verdict::Reject(reason)
}

fn classify_large_motion(dx: f32, dy: f32, action: ActionType, min: f32) -> Option<Verdict> {
    if dx.abs() > dy.abs() {
        match action {
            ActionType::SwipeLeft if dx < -min => {
                return Some(Verdict::Accept(Gesture::Swipe(SwipeDirection::Left)));
            }
            ActionType::SwipeRight if dx > min => {
                return Some(Verdict::Accept(Gesture::Swipe(SwipeDirection::Right)));
            }
            ActionType::SwipeLeft | ActionType::SwipeRight => {
                return Some(Verdict::Reject(RejectReason::WrongDirection));
            }
            _ => {}
        }
    } else {
        match action {
            ActionType::SwipeUp if dy < -min => {
                return Some(Verdict::Accept(Gesture::Swipe(SwipeDirection::Up)));
            }
            ActionType::SwipeDown if dy > min => {
                return Some(Verdict::Accept(Gesture::Swipe(SwipeDirection::Down)));
            }
            ActionType::Scroll if dy.abs() > min => {
                return Some(Verdict::Accept(Gesture::Scroll));
            }
            ActionType::SwipeUp | ActionType::SwipeDown | ActionType::Scroll => {
                return Some(Verdict::Reject(RejectReason::WrongDirection));
            }
            _ => {}
        }
    }

    // Swipe expected but performed along the other axis.
    action
        .is_swipe_family()
        .then_some(Verdict::Reject(RejectReason::WrongDirection))
}

fn classify_small_motion(
    attempt: &GestureAttempt,
    release_ms: u64,
    action: ActionType,
    memory: &mut DoubleTapMemory,
    config: &GestureConfig,
) -> Option<Verdict> {
    let is_quick_tap = attempt.elapsed_ms(release_ms) < config.quick_tap_ms;
    let (x, y) = (attempt.current_x, attempt.current_y);

    match action {
        ActionType::DoubleTap => {
            if memory.is_second_tap(
                release_ms,
                x,
                y,
                config.double_tap_window_ms,
                config.double_tap_radius_px,
            ) {
                memory.clear();
                Some(Verdict::Accept(Gesture::DoubleTap))
            } else if is_quick_tap {
                memory.record(release_ms, x, y);
                Some(Verdict::AwaitSecondTap)
            } else {
                None
            }
        }
        ActionType::Tap | ActionType::Bravo if is_quick_tap => Some(Verdict::Accept(Gesture::Tap)),
        ActionType::TextInput | ActionType::NumberInput if is_quick_tap => {
            Some(Verdict::OpenTextEntry)
        }
        ActionType::LongPress | ActionType::DragAndDrop => None,
        _ if is_quick_tap => Some(Verdict::Reject(RejectReason::WrongGesture)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::PointerEvent;

    fn attempt(from: (f32, f32), to: (f32, f32), start_ms: u64) -> GestureAttempt {
        let mut attempt = GestureAttempt::begin(&PointerEvent::down(from.0, from.1, start_ms));
        attempt.current_x = to.0;
        attempt.current_y = to.1;
        attempt.is_active = false;
        attempt
    }

    fn run(action: ActionType, from: (f32, f32), to: (f32, f32), held_ms: u64) -> Verdict {
        let mut memory = DoubleTapMemory::default();
        classify(
            &attempt(from, to, 0),
            held_ms,
            action,
            true,
            &mut memory,
            &GestureConfig::default(),
        )
    }

    #[test]
    fn outside_zone_rejects_before_classifying() {
        let mut memory = DoubleTapMemory::default();
        let verdict = classify(
            &attempt((10.0, 10.0), (10.0, 10.0), 0),
            50,
            ActionType::Tap,
            false,
            &mut memory,
            &GestureConfig::default(),
        );
        assert_eq!(verdict, Verdict::Reject(RejectReason::OutsideZone));
    }

    #[test]
    fn quick_tap_accepted() {
        assert_eq!(
            run(ActionType::Tap, (5.0, 5.0), (8.0, 6.0), 120),
            Verdict::Accept(Gesture::Tap)
        );
    }

    #[test]
    fn slow_tap_rejected() {
        assert_eq!(
            run(ActionType::Tap, (5.0, 5.0), (5.0, 5.0), 700),
            Verdict::Reject(RejectReason::Unrecognized)
        );
    }

    #[test]
    fn swipe_left_accepted() {
        assert_eq!(
            run(ActionType::SwipeLeft, (100.0, 50.0), (40.0, 52.0), 200),
            Verdict::Accept(Gesture::Swipe(SwipeDirection::Left))
        );
    }

    #[test]
    fn short_swipe_is_not_a_swipe() {
        assert_eq!(
            run(ActionType::SwipeLeft, (100.0, 50.0), (70.0, 52.0), 200),
            Verdict::Reject(RejectReason::Unrecognized)
        );
    }

    #[test]
    fn swipe_wrong_way_rejected() {
        assert_eq!(
            run(ActionType::SwipeRight, (100.0, 50.0), (40.0, 50.0), 200),
            Verdict::Reject(RejectReason::WrongDirection)
        );
    }

    #[test]
    fn swipe_wrong_axis_rejected() {
        assert_eq!(
            run(ActionType::SwipeLeft, (100.0, 100.0), (100.0, 30.0), 200),
            Verdict::Reject(RejectReason::WrongDirection)
        );
        assert_eq!(
            run(ActionType::Scroll, (100.0, 100.0), (30.0, 100.0), 200),
            Verdict::Reject(RejectReason::WrongDirection)
        );
    }

    #[test]
    fn vertical_swipes_and_scroll() {
        assert_eq!(
            run(ActionType::SwipeUp, (50.0, 200.0), (52.0, 100.0), 200),
            Verdict::Accept(Gesture::Swipe(SwipeDirection::Up))
        );
        assert_eq!(
            run(ActionType::SwipeDown, (50.0, 100.0), (52.0, 200.0), 200),
            Verdict::Accept(Gesture::Swipe(SwipeDirection::Down))
        );
        assert_eq!(
            run(ActionType::Scroll, (50.0, 200.0), (50.0, 100.0), 200),
            Verdict::Accept(Gesture::Scroll)
        );
        assert_eq!(
            run(ActionType::Scroll, (50.0, 100.0), (50.0, 200.0), 200),
            Verdict::Accept(Gesture::Scroll)
        );
    }

    #[test]
    fn swipe_when_tap_expected_rejected() {
        assert_eq!(
            run(ActionType::Tap, (100.0, 50.0), (20.0, 50.0), 200),
            Verdict::Reject(RejectReason::WrongGesture)
        );
    }

    #[test]
    fn tap_when_swipe_expected_rejected() {
        assert_eq!(
            run(ActionType::SwipeUp, (100.0, 50.0), (100.0, 50.0), 100),
            Verdict::Reject(RejectReason::WrongGesture)
        );
    }

    #[test]
    fn medium_travel_rejected() {
        assert_eq!(
            run(ActionType::Tap, (0.0, 0.0), (30.0, 0.0), 100),
            Verdict::Reject(RejectReason::Unrecognized)
        );
    }

    #[test]
    fn early_release_of_long_press_rejected() {
        assert_eq!(
            run(ActionType::LongPress, (0.0, 0.0), (0.0, 0.0), 300),
            Verdict::Reject(RejectReason::Unrecognized)
        );
    }

    #[test]
    fn text_entry_opens_on_tap() {
        assert_eq!(
            run(ActionType::NumberInput, (0.0, 0.0), (1.0, 1.0), 100),
            Verdict::OpenTextEntry
        );
        assert_eq!(
            run(ActionType::TextInput, (0.0, 0.0), (1.0, 1.0), 900),
            Verdict::Reject(RejectReason::Unrecognized)
        );
    }

    #[test]
    fn bravo_accepts_any_quick_tap() {
        assert_eq!(
            run(ActionType::Bravo, (0.0, 0.0), (2.0, 0.0), 100),
            Verdict::Accept(Gesture::Tap)
        );
    }

    #[test]
    fn unknown_action_always_rejects() {
        assert!(matches!(
            run(ActionType::Unknown, (0.0, 0.0), (0.0, 0.0), 100),
            Verdict::Reject(_)
        ));
        assert!(matches!(
            run(ActionType::Unknown, (0.0, 0.0), (90.0, 0.0), 100),
            Verdict::Reject(_)
        ));
    }

    #[test]
    fn drag_and_drop_never_decided_here() {
        assert_eq!(
            run(ActionType::DragAndDrop, (0.0, 0.0), (0.0, 0.0), 100),
            Verdict::NoDecision
        );
        assert_eq!(
            run(ActionType::DragAndDrop, (0.0, 0.0), (90.0, 0.0), 100),
            Verdict::NoDecision
        );
    }

    #[test]
    fn double_tap_sequence() {
        let config = GestureConfig::default();
        let mut memory = DoubleTapMemory::default();

        let first = attempt((10.0, 10.0), (10.0, 10.0), 0);
        let verdict = classify(&first, 80, ActionType::DoubleTap, true, &mut memory, &config);
        assert_eq!(verdict, Verdict::AwaitSecondTap);
        assert!(memory.last_tap().is_some());

        let second = attempt((12.0, 11.0), (12.0, 11.0), 200);
        let verdict = classify(&second, 260, ActionType::DoubleTap, true, &mut memory, &config);
        assert_eq!(verdict, Verdict::Accept(Gesture::DoubleTap));
        assert!(memory.last_tap().is_none());
    }

    #[test]
    fn double_tap_too_slow_rearms() {
        let config = GestureConfig::default();
        let mut memory = DoubleTapMemory::default();

        let first = attempt((10.0, 10.0), (10.0, 10.0), 0);
        classify(&first, 100, ActionType::DoubleTap, true, &mut memory, &config);

        let second = attempt((10.0, 10.0), (10.0, 10.0), 350);
        let verdict = classify(&second, 401, ActionType::DoubleTap, true, &mut memory, &config);
        assert_eq!(verdict, Verdict::AwaitSecondTap);
        assert_eq!(memory.last_tap().map(|t| t.time_ms), Some(401));
    }

    #[test]
    fn slow_single_tap_on_double_tap_rejected() {
        assert_eq!(
            run(ActionType::DoubleTap, (0.0, 0.0), (0.0, 0.0), 800),
            Verdict::Reject(RejectReason::Unrecognized)
        );
    }
}
