//! Wrong-action bookkeeping and the hint shown after repeated failures.

use serde::{Deserialize, Serialize};

use crate::action::ActionType;

/// Consecutive wrong actions on the current step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptCounter {
    failures: u32,
    hint_visible: bool,
}

impl AttemptCounter {
    /// Create a counter at zero with the hint hidden.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a wrong action. The hint becomes visible once `threshold` is reached.
    ///
    /// Returns the number of consecutive failures so far.
    pub fn record_failure(&mut self, threshold: u32) -> u32 {
        self.failures = self.failures.saturating_add(1);
        if self.failures >= threshold {
            self.hint_visible = true;
        }
        self.failures
    }

    /// A correct action resets the count and hides the hint.
    pub fn record_success(&mut self) {
        self.failures = 0;
        self.hint_visible = false;
    }

    /// Learner closed the hint.
    pub fn dismiss_hint(&mut self) {
        self.hint_visible = false;
    }

    /// Consecutive failures so far.
    #[must_use]
    pub const fn failures(&self) -> u32 {
        self.failures
    }

    /// Whether the hint is displayed.
    #[must_use]
    pub const fn hint_visible(&self) -> bool {
        self.hint_visible
    }
}

/// Text of the hint banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintMessage {
    /// Banner title.
    pub title: String,
    /// Which gesture is expected.
    pub instruction: String,
    /// Encouragement line.
    pub footer: String,
}

impl HintMessage {
    /// Hint for a step expecting `action`.
    #[must_use]
    pub fn for_action(action: ActionType) -> Self {
        Self {
            title: "Ce n'est pas le bon geste!".to_string(),
            instruction: format!("Vous devez effectuer: {}", action.hint_label()),
            footer: "Essayez à nouveau...".to_string(),
        }
    }
}
