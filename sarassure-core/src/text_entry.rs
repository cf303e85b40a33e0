//! Text and number entry anchored at the target zone.
//!
//! There is no submit button: every change is compared with the expected
//! value and a match is committed after a short delay.

use serde::{Deserialize, Serialize};

use crate::action::ActionType;
use crate::timer::TimerHandle;

/// Keyboard flavour of the entry surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Free text.
    Text,
    /// Numeric keypad.
    Number,
}

impl EntryKind {
    /// Entry flavour for an action type, if it takes typed input.
    #[must_use]
    pub const fn for_action(action: ActionType) -> Option<Self> {
        match action {
            ActionType::TextInput => Some(Self::Text),
            ActionType::NumberInput => Some(Self::Number),
            _ => None,
        }
    }

    /// HTML `inputmode` hint.
    #[must_use]
    pub const fn input_mode(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "numeric",
        }
    }

    /// Placeholder shown in the empty field.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Text => "Tapez ici...",
            Self::Number => "0",
        }
    }
}

/// Case-insensitive, whitespace-trimmed comparison with the expected value.
///
/// An empty value or a missing expectation never matches.
#[must_use]
pub fn matches_expected(value: &str, expected: Option<&str>) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    expected.is_some_and(|expected| value.to_lowercase() == expected.trim().to_lowercase())
}

/// State of the entry surface.
#[derive(Debug, Clone)]
pub struct TextEntry {
    kind: EntryKind,
    open: bool,
    value: String,
    pending_commit: Option<TimerHandle>,
}

impl TextEntry {
    /// A closed entry surface.
    #[must_use]
    pub fn new(kind: EntryKind) -> Self {
        Self {
            kind,
            open: false,
            value: String::new(),
            pending_commit: None,
        }
    }

    /// Show the surface.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the surface and clear its value. Returns the pending commit,
    /// which the caller must cancel.
    pub fn close(&mut self) -> Option<TimerHandle> {
        self.open = false;
        self.value.clear();
        self.pending_commit.take()
    }

    /// Replace the value. Returns the previously pending commit, which the
    /// caller must cancel.
    pub fn set_value(&mut self, value: &str) -> Option<TimerHandle> {
        self.value.clear();
        self.value.push_str(value);
        self.pending_commit.take()
    }

    /// Remember the commit scheduled for the current value.
    pub fn set_pending_commit(&mut self, handle: TimerHandle) {
        self.pending_commit = Some(handle);
    }

    /// Forget the pending commit once it fired.
    pub fn clear_pending_commit(&mut self) {
        self.pending_commit = None;
    }

    /// Keyboard flavour.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Whether the surface is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether a commit is scheduled.
    #[must_use]
    pub const fn has_pending_commit(&self) -> bool {
        self.pending_commit.is_some()
    }
}
