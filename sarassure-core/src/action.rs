//! Expected action types for an exercise step.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The gesture a step expects from the learner.
///
/// Deserializes from the snake_case names stored with each step. Names
/// that aren't recognized become [`ActionType::Unknown`] rather than an
/// error: such a step renders with the default animation and every
/// resolved gesture on it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum ActionType {
    /// Single quick tap.
    Tap,
    /// Two quick taps close together.
    DoubleTap,
    /// Press and hold without moving.
    LongPress,
    /// Horizontal swipe towards the left.
    SwipeLeft,
    /// Horizontal swipe towards the right.
    SwipeRight,
    /// Vertical swipe upwards.
    SwipeUp,
    /// Vertical swipe downwards.
    SwipeDown,
    /// Vertical scroll in either direction.
    Scroll,
    /// Drag the zone itself.
    DragAndDrop,
    /// Type the expected text.
    TextInput,
    /// Type the expected number.
    NumberInput,
    /// Celebration step: any tap on the zone completes the exercise.
    Bravo,
    /// Unrecognized action name.
    Unknown,
}

impl ActionType {
    /// All recognized action types.
    pub const ALL: [Self; 12] = [
        Self::Tap,
        Self::DoubleTap,
        Self::LongPress,
        Self::SwipeLeft,
        Self::SwipeRight,
        Self::SwipeUp,
        Self::SwipeDown,
        Self::Scroll,
        Self::DragAndDrop,
        Self::TextInput,
        Self::NumberInput,
        Self::Bravo,
    ];

    /// Parse a stored action name. Unrecognized names map to [`ActionType::Unknown`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "tap" => Self::Tap,
            "double_tap" => Self::DoubleTap,
            "long_press" => Self::LongPress,
            "swipe_left" => Self::SwipeLeft,
            "swipe_right" => Self::SwipeRight,
            "swipe_up" => Self::SwipeUp,
            "swipe_down" => Self::SwipeDown,
            "scroll" => Self::Scroll,
            "drag_and_drop" => Self::DragAndDrop,
            "text_input" => Self::TextInput,
            "number_input" => Self::NumberInput,
            "bravo" => Self::Bravo,
            other => {
                tracing::warn!("Unrecognized action type {other:?}, using fallback behaviour");
                Self::Unknown
            }
        }
    }

    /// Stored name of this action type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::DoubleTap => "double_tap",
            Self::LongPress => "long_press",
            Self::SwipeLeft => "swipe_left",
            Self::SwipeRight => "swipe_right",
            Self::SwipeUp => "swipe_up",
            Self::SwipeDown => "swipe_down",
            Self::Scroll => "scroll",
            Self::DragAndDrop => "drag_and_drop",
            Self::TextInput => "text_input",
            Self::NumberInput => "number_input",
            Self::Bravo => "bravo",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the gesture must originate in the step's start area
    /// rather than its target area.
    #[must_use]
    pub const fn uses_start_area(self) -> bool {
        matches!(
            self,
            Self::Tap
                | Self::DoubleTap
                | Self::LongPress
                | Self::SwipeLeft
                | Self::SwipeRight
                | Self::SwipeUp
                | Self::SwipeDown
                | Self::Scroll
                | Self::DragAndDrop
                | Self::Bravo
        )
    }

    /// Swipes in any direction plus scroll.
    #[must_use]
    pub const fn is_swipe_family(self) -> bool {
        matches!(
            self,
            Self::SwipeLeft | Self::SwipeRight | Self::SwipeUp | Self::SwipeDown | Self::Scroll
        )
    }

    /// Text or number entry.
    #[must_use]
    pub const fn is_text_entry(self) -> bool {
        matches!(self, Self::TextInput | Self::NumberInput)
    }

    /// Plain-language description of the gesture, shown in the hint.
    #[must_use]
    pub const fn hint_label(self) -> &'static str {
        match self {
            Self::Tap => "un simple tap",
            Self::DoubleTap => "un double tap (2 fois rapidement)",
            Self::LongPress => "un appui long (>700ms)",
            Self::SwipeLeft => "un glissement vers la gauche",
            Self::SwipeRight => "un glissement vers la droite",
            Self::SwipeUp => "un glissement vers le haut",
            Self::SwipeDown => "un glissement vers le bas",
            Self::Scroll => "un scroll (haut ou bas)",
            Self::DragAndDrop => "un maintien et déplacement",
            Self::TextInput => "une saisie de texte",
            Self::NumberInput => "une saisie de nombre",
            Self::Bravo | Self::Unknown => "l'action attendue",
        }
    }
}

impl From<String> for ActionType {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<&str> for ActionType {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<ActionType> for &'static str {
    fn from(action: ActionType) -> Self {
        action.as_str()
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
