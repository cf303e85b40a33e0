//! # Exercise step controller
//!
//! One [`ExerciseStep`] per displayed step. It owns every piece of
//! per-step state (in-flight attempt, double-tap memory, attempt counter,
//! timers, text entry) and turns input events into interaction outcomes.
//!
//! ```text
//! Idle ─▶ AwaitingGesture ─┬─▶ Success            (host advances the step)
//!                          ├─▶ Failure ──────────▶ AwaitingGesture
//!                          ├─▶ AwaitingSecondTap ─▶ AwaitingGesture
//!                          └─▶ AwaitingTextCommit ▶ Success
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::action::ActionType;
use crate::classifier::{classify, Gesture, RejectReason, Verdict};
use crate::config::GestureConfig;
use crate::error::ExerciseResult;
use crate::event::{InputEvent, PointerEvent, PointerPhase};
use crate::feedback::{animation_color, animation_for, zone_style, Animation, ZoneStyle};
use crate::hint::{AttemptCounter, HintMessage};
use crate::image::{ImageId, NO_IMAGE_TEXT};
use crate::magnifier::{LensView, Magnifier};
use crate::text_entry::{matches_expected, EntryKind, TextEntry};
use crate::timer::{TimerHandle, TimerQueue};
use crate::tracker::{DoubleTapMemory, MotionUpdate, PointerTracker};
use crate::zone::{active_zone, zone_contains, ActionZone, ContainerRect, ZoneRect};

/// Unique identifier of a mounted step instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepId(Uuid);

impl StepId {
    /// Create a new unique step ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StepId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Construction-time inputs of a step. Immutable for the step's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepProps {
    /// Screenshot identifier. `None` disables interaction.
    #[serde(default, alias = "image_id", alias = "app_image_id")]
    pub image_id: Option<ImageId>,
    /// Zone for typed input and other target-oriented actions.
    #[serde(default, alias = "target_area")]
    pub target_area: Option<ActionZone>,
    /// Zone where start-oriented gestures must originate.
    #[serde(default, alias = "start_area")]
    pub start_area: Option<ActionZone>,
    /// Expected gesture.
    #[serde(alias = "action_type")]
    pub action_type: ActionType,
    /// Render the zone nearly invisible. It still gates gestures.
    #[serde(default, alias = "hide_action_zone")]
    pub hide_action_zone: bool,
    /// Start with the magnifier enabled.
    #[serde(default, alias = "is_zoom_active")]
    pub is_zoom_active: bool,
    /// Open the text entry on mount for `text_input` steps.
    #[serde(default, alias = "keyboard_auto_show")]
    pub keyboard_auto_show: bool,
    /// Expected typed value when the zone doesn't carry one.
    #[serde(default, alias = "expected_input")]
    pub expected_input: Option<String>,
}

impl StepProps {
    /// Props for a step with a screenshot and an expected action.
    #[must_use]
    pub fn new(image_id: impl Into<String>, action_type: ActionType) -> Self {
        Self {
            image_id: Some(ImageId::new(image_id)),
            target_area: None,
            start_area: None,
            action_type,
            hide_action_zone: false,
            is_zoom_active: false,
            keyboard_auto_show: false,
            expected_input: None,
        }
    }

    /// Set the start area.
    #[must_use]
    pub fn with_start_area(mut self, zone: ActionZone) -> Self {
        self.start_area = Some(zone);
        self
    }

    /// Set the target area.
    #[must_use]
    pub fn with_target_area(mut self, zone: ActionZone) -> Self {
        self.target_area = Some(zone);
        self
    }

    /// The zone gestures are validated against.
    #[must_use]
    pub fn active_zone(&self) -> Option<&ActionZone> {
        active_zone(
            self.action_type,
            self.start_area.as_ref(),
            self.target_area.as_ref(),
        )
    }
}

/// Why a step is waiting for more input before deciding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingReason {
    /// First tap of a double-tap recorded.
    AwaitingSecondTap,
    /// Text entry open, or a matching value waiting for its commit delay.
    AwaitingTextCommit,
}

/// Result of an interaction on a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InteractionOutcome {
    /// Expected action performed.
    Success {
        /// Gesture that satisfied the step.
        gesture: Gesture,
    },
    /// Wrong action.
    Failure {
        /// Consecutive failures including this one.
        attempts_so_far: u32,
        /// Whether the hint is now displayed.
        hint_visible: bool,
        /// Why the gesture was rejected.
        reason: RejectReason,
    },
    /// No decision yet.
    Pending {
        /// What the step is waiting for.
        reason: PendingReason,
    },
}

impl InteractionOutcome {
    /// `Some(success)` for decided outcomes, `None` while pending.
    #[must_use]
    pub const fn decision(&self) -> Option<bool> {
        match self {
            Self::Success { .. } => Some(true),
            Self::Failure { .. } => Some(false),
            Self::Pending { .. } => None,
        }
    }

    /// Whether this is a success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepTimer {
    LongPress,
    TextCommit,
}

/// Render model of the zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneView {
    /// Centre X, percent.
    pub x_percent: f32,
    /// Centre Y, percent.
    pub y_percent: f32,
    /// Width, percent.
    pub width_percent: f32,
    /// Height, percent.
    pub height_percent: f32,
    /// Resolved CSS.
    pub style: ZoneStyle,
    /// Guidance animation.
    pub animation: Animation,
    /// Pulse colour.
    pub animation_color: String,
    /// Icon in the middle of the zone.
    pub icon_name: Option<String>,
    /// Whether the zone itself is draggable.
    pub draggable: bool,
}

/// Render model of the text entry surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEntryView {
    /// Keyboard flavour.
    pub kind: EntryKind,
    /// Current value.
    pub value: String,
    /// Placeholder.
    pub placeholder: &'static str,
}

/// Everything a host needs to draw the step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepView {
    /// Whether input is handled at all.
    pub interactive: bool,
    /// Placeholder text replacing the screenshot.
    pub placeholder: Option<&'static str>,
    /// Active zone, if any.
    pub zone: Option<ZoneView>,
    /// Hint banner, when visible.
    pub hint: Option<HintMessage>,
    /// Text entry, when open.
    pub text_entry: Option<TextEntryView>,
}

/// Interprets input on one exercise step.
pub struct ExerciseStep {
    id: StepId,
    props: StepProps,
    config: GestureConfig,
    tracker: PointerTracker,
    double_tap: DoubleTapMemory,
    attempts: AttemptCounter,
    timers: TimerQueue<StepTimer>,
    long_press: Option<TimerHandle>,
    text_entry: Option<TextEntry>,
    dragging: bool,
    magnifier: Magnifier,
    container: Option<ContainerRect>,
    on_interaction: Option<Box<dyn FnMut(bool)>>,
    mounted: bool,
}

impl fmt::Debug for ExerciseStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExerciseStep")
            .field("id", &self.id)
            .field("action_type", &self.props.action_type)
            .field("attempts", &self.attempts)
            .field("tracker", &self.tracker)
            .field("pending_timers", &self.timers.len())
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

impl ExerciseStep {
    /// Mount a step with default thresholds.
    #[must_use]
    pub fn new(props: StepProps) -> Self {
        Self::with_config(props, GestureConfig::default())
    }

    /// Mount a step with custom thresholds.
    #[must_use]
    pub fn with_config(props: StepProps, config: GestureConfig) -> Self {
        let id = StepId::new();
        let mut text_entry = EntryKind::for_action(props.action_type).map(TextEntry::new);

        let auto_open = match props.action_type {
            ActionType::NumberInput => true,
            ActionType::TextInput => props.keyboard_auto_show,
            _ => false,
        };
        if auto_open {
            if let Some(entry) = text_entry.as_mut() {
                entry.open();
            }
        }

        if props.image_id.is_none() {
            tracing::debug!("Step {id} has no screenshot, interaction disabled");
        }
        if let Some(zone) = props.active_zone() {
            if let Err(e) = zone.validate() {
                tracing::warn!("Step {id}: {e}");
            }
        }

        tracing::debug!(step = %id, action = %props.action_type, "Step mounted");

        Self {
            id,
            magnifier: Magnifier::new(props.is_zoom_active),
            props,
            config,
            tracker: PointerTracker::new(),
            double_tap: DoubleTapMemory::default(),
            attempts: AttemptCounter::new(),
            timers: TimerQueue::new(),
            long_press: None,
            text_entry,
            dragging: false,
            container: None,
            on_interaction: None,
            mounted: true,
        }
    }

    /// Mount a step after validating its zone geometry and thresholds.
    ///
    /// # Errors
    ///
    /// Returns an error if the active zone or the configuration is invalid.
    pub fn try_new(props: StepProps, config: GestureConfig) -> ExerciseResult<Self> {
        config.validate()?;
        if let Some(zone) = props.active_zone() {
            zone.validate()?;
        }
        Ok(Self::with_config(props, config))
    }

    /// Mount a step from its JSON props.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the step is invalid.
    pub fn from_json(json: &str, config: GestureConfig) -> ExerciseResult<Self> {
        let props: StepProps = serde_json::from_str(json)?;
        Self::try_new(props, config)
    }

    /// Register the callback notified of every decided outcome.
    pub fn set_on_interaction<F>(&mut self, callback: F)
    where
        F: FnMut(bool) + 'static,
    {
        self.on_interaction = Some(Box::new(callback));
    }

    /// Record where the image container is rendered. Until this is
    /// known the zone can't be measured and gates nothing.
    pub fn set_container(&mut self, container: ContainerRect) {
        self.container = Some(container);
    }

    /// Forget the container layout (e.g., while re-laying out).
    pub fn clear_container(&mut self) {
        self.container = None;
    }

    /// Step instance identifier.
    #[must_use]
    pub const fn id(&self) -> StepId {
        self.id
    }

    /// Props the step was mounted with.
    #[must_use]
    pub const fn props(&self) -> &StepProps {
        &self.props
    }

    /// Thresholds in use.
    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Whether input is handled: mounted and showing a screenshot.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.mounted && self.props.image_id.is_some()
    }

    /// Rendered bounding box of the active zone, once measurable.
    #[must_use]
    pub fn zone_bounds(&self) -> Option<ZoneRect> {
        let zone = self.props.active_zone()?;
        self.container.map(|c| zone.bounds(c))
    }

    /// Attempt counter and hint state.
    #[must_use]
    pub const fn attempts(&self) -> &AttemptCounter {
        &self.attempts
    }

    /// Double-tap memory carried across attempts.
    #[must_use]
    pub const fn double_tap_memory(&self) -> &DoubleTapMemory {
        &self.double_tap
    }

    /// Text entry state, on text and number steps.
    #[must_use]
    pub const fn text_entry(&self) -> Option<&TextEntry> {
        self.text_entry.as_ref()
    }

    /// Whether a gesture is in flight.
    #[must_use]
    pub fn gesture_in_flight(&self) -> bool {
        self.tracker.is_active()
    }

    /// Whether a drag of the zone is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Earliest pending timer deadline, so a host can arm a wake-up and call [`Self::tick`].
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Close the hint banner.
    pub fn dismiss_hint(&mut self) {
        self.attempts.dismiss_hint();
    }

    /// Toggle the magnifier. Returns the new state.
    pub fn toggle_zoom(&mut self) -> bool {
        self.magnifier.toggle()
    }

    /// Magnifier lens for an image rendered at the given size.
    #[must_use]
    pub fn lens(&self, image_width: f32, image_height: f32) -> Option<LensView> {
        self.magnifier.view(image_width, image_height)
    }

    /// Tear the step down: cancel timers and drop in-flight state so
    /// nothing fires against the next step.
    pub fn unmount(&mut self) {
        let cancelled = self.timers.cancel_all();
        self.long_press = None;
        self.tracker.cancel();
        if let Some(entry) = self.text_entry.as_mut() {
            entry.close();
        }
        self.dragging = false;
        self.mounted = false;
        tracing::debug!(step = %self.id, cancelled, "Step unmounted");
    }

    /// Advance the clock without input. Returns outcomes of fired timers.
    pub fn tick(&mut self, now_ms: u64) -> Vec<InteractionOutcome> {
        let mut outcomes = Vec::new();
        if !self.is_interactive() {
            return outcomes;
        }
        while let Some((handle, timer)) = self.timers.pop_due(now_ms) {
            if let Some(outcome) = self.fire(handle, timer) {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    /// Process an input event.
    ///
    /// Timers due at or before the event's timestamp fire first, so the
    /// result may hold a timer outcome followed by the event's own.
    pub fn handle(&mut self, event: &InputEvent) -> Vec<InteractionOutcome> {
        if !self.is_interactive() {
            return Vec::new();
        }
        let mut outcomes = self.tick(event.timestamp_ms());

        let outcome = match event {
            InputEvent::Pointer(pointer) => self.handle_pointer(pointer),
            InputEvent::DragStart { .. } => {
                self.dragging = self.props.action_type == ActionType::DragAndDrop;
                None
            }
            InputEvent::DragEnd {
                offset_x, offset_y, ..
            } => self.handle_drag_end(*offset_x, *offset_y),
            InputEvent::TextChange {
                value,
                timestamp_ms,
            } => self.handle_text_change(value, *timestamp_ms),
            InputEvent::TextBlur { .. } => {
                self.close_text_entry();
                None
            }
            InputEvent::PointerLeave { .. } => {
                self.magnifier.hide();
                None
            }
            InputEvent::Tick { .. } => None,
        };

        outcomes.extend(outcome);
        outcomes
    }

    /// Current render model.
    #[must_use]
    pub fn view(&self) -> StepView {
        if self.props.image_id.is_none() {
            return StepView {
                interactive: false,
                placeholder: Some(NO_IMAGE_TEXT),
                zone: None,
                hint: None,
                text_entry: None,
            };
        }

        let action = self.props.action_type;
        let hidden = self.props.hide_action_zone;
        let zone = self.props.active_zone().map(|zone| ZoneView {
            x_percent: zone.x_percent,
            y_percent: zone.y_percent,
            width_percent: zone.width_percent,
            height_percent: zone.height_percent,
            style: zone_style(zone, action, hidden),
            animation: animation_for(action, hidden),
            animation_color: animation_color(zone).to_string(),
            icon_name: zone.icon_name.clone(),
            draggable: action == ActionType::DragAndDrop,
        });

        StepView {
            interactive: self.is_interactive(),
            placeholder: None,
            zone,
            hint: self
                .attempts
                .hint_visible()
                .then(|| HintMessage::for_action(action)),
            text_entry: self
                .text_entry
                .as_ref()
                .filter(|entry| entry.is_open() && self.props.target_area.is_some())
                .map(|entry| TextEntryView {
                    kind: entry.kind(),
                    value: entry.value().to_string(),
                    placeholder: entry.kind().placeholder(),
                }),
        }
    }

    fn handle_pointer(&mut self, event: &PointerEvent) -> Option<InteractionOutcome> {
        match event.phase {
            PointerPhase::Down => {
                self.handle_pointer_down(event);
                None
            }
            PointerPhase::Move => {
                self.handle_pointer_move(event);
                None
            }
            PointerPhase::Up => self.handle_pointer_up(event),
            PointerPhase::Cancel => {
                self.magnifier.hide();
                let owns_attempt = self
                    .tracker
                    .attempt()
                    .is_some_and(|a| a.pointer_id == event.pointer_id);
                if owns_attempt {
                    self.cancel_long_press();
                    self.tracker.cancel();
                }
                None
            }
        }
    }

    fn handle_pointer_down(&mut self, event: &PointerEvent) {
        if let Some(container) = self.container {
            self.magnifier.track(container, event.x, event.y);
        }

        // Drag-and-drop goes through the native drag events.
        if self.props.action_type == ActionType::DragAndDrop {
            return;
        }

        let commit_pending = self
            .text_entry
            .as_ref()
            .is_some_and(TextEntry::has_pending_commit);
        if commit_pending || !self.tracker.press(event) {
            tracing::debug!(
                step = %self.id,
                pointer = event.pointer_id,
                "Pointer-down rejected, gesture already in flight"
            );
            return;
        }

        if self.props.action_type == ActionType::LongPress {
            let deadline = event.timestamp_ms.saturating_add(self.config.long_press_ms);
            self.long_press = Some(self.timers.schedule(StepTimer::LongPress, deadline));
        }
    }

    fn handle_pointer_move(&mut self, event: &PointerEvent) {
        if let Some(container) = self.container {
            self.magnifier.track(container, event.x, event.y);
        }

        if self.props.action_type == ActionType::DragAndDrop {
            return;
        }

        if self.tracker.motion(event, self.config.move_slop_px) == MotionUpdate::StartedMoving {
            tracing::debug!(step = %self.id, "Pointer moved, long-press no longer possible");
            self.cancel_long_press();
        }
    }

    fn handle_pointer_up(&mut self, event: &PointerEvent) -> Option<InteractionOutcome> {
        if self.tracker.attempt()?.pointer_id != event.pointer_id {
            return None;
        }
        self.cancel_long_press();

        if self.props.action_type == ActionType::DragAndDrop {
            return None;
        }

        let attempt = self.tracker.release(event)?;
        let in_zone = self.origin_in_zone(attempt.start_x, attempt.start_y);
        let verdict = classify(
            &attempt,
            event.timestamp_ms,
            self.props.action_type,
            in_zone,
            &mut self.double_tap,
            &self.config,
        );

        match verdict {
            Verdict::Accept(gesture) => Some(self.signal_success(gesture)),
            Verdict::Reject(reason) => Some(self.signal_failure(reason)),
            Verdict::AwaitSecondTap => Some(InteractionOutcome::Pending {
                reason: PendingReason::AwaitingSecondTap,
            }),
            Verdict::OpenTextEntry => {
                if let Some(entry) = self.text_entry.as_mut() {
                    entry.open();
                }
                Some(InteractionOutcome::Pending {
                    reason: PendingReason::AwaitingTextCommit,
                })
            }
            Verdict::NoDecision => None,
        }
    }

    fn handle_drag_end(&mut self, offset_x: f32, offset_y: f32) -> Option<InteractionOutcome> {
        if self.props.action_type != ActionType::DragAndDrop {
            return None;
        }
        self.dragging = false;

        let distance = offset_x.hypot(offset_y);
        tracing::debug!(step = %self.id, distance, "Drag ended");
        if distance > self.config.drag_min_px {
            Some(self.signal_success(Gesture::DragAndDrop))
        } else {
            Some(self.signal_failure(RejectReason::DragTooShort))
        }
    }

    fn handle_text_change(&mut self, value: &str, now_ms: u64) -> Option<InteractionOutcome> {
        let expected = self.expected_value().map(str::to_owned);
        let delay = self.config.text_commit_delay_ms;

        let entry = self.text_entry.as_mut().filter(|entry| entry.is_open())?;
        if let Some(previous) = entry.set_value(value) {
            self.timers.cancel(previous);
        }

        if !matches_expected(value, expected.as_deref()) {
            return None;
        }

        tracing::debug!(step = %self.id, "Expected value typed, committing after {delay}ms");
        let handle = self.timers
            .schedule(StepTimer::TextCommit, now_ms.saturating_add(delay));
        entry.set_pending_commit(handle);
        Some(InteractionOutcome::Pending {
            reason: PendingReason::AwaitingTextCommit,
        })
    }

    fn fire(&mut self, handle: TimerHandle, timer: StepTimer) -> Option<InteractionOutcome> {
        match timer {
            StepTimer::LongPress => {
                if self.long_press != Some(handle) {
                    return None;
                }
                self.long_press = None;
                let attempt = self.tracker.attempt().copied()?;
                if !attempt.is_active || attempt.has_moved {
                    return None;
                }
                // Held outside the zone: the release reports the failure.
                if !self.origin_in_zone(attempt.start_x, attempt.start_y) {
                    return None;
                }
                // The hold itself resolves the attempt; its release is not classified.
                self.tracker.cancel();
                Some(self.signal_success(Gesture::LongPress))
            }
            StepTimer::TextCommit => {
                let entry = self.text_entry.as_mut()?;
                entry.clear_pending_commit();
                entry.close();
                Some(self.signal_success(Gesture::TextEntry))
            }
        }
    }

    fn origin_in_zone(&self, x: f32, y: f32) -> bool {
        if self.props.action_type == ActionType::Bravo {
            return true;
        }
        if self.props.active_zone().is_none() {
            return true;
        }
        zone_contains(self.zone_bounds(), x, y)
    }

    fn expected_value(&self) -> Option<&str> {
        self.props
            .active_zone()
            .and_then(ActionZone::expected)
            .or(self.props.expected_input.as_deref())
    }

    fn cancel_long_press(&mut self) {
        if let Some(handle) = self.long_press.take() {
            self.timers.cancel(handle);
        }
    }

    fn close_text_entry(&mut self) {
        if let Some(pending) = self.text_entry.as_mut().and_then(TextEntry::close) {
            self.timers.cancel(pending);
        }
    }

    fn signal_success(&mut self, gesture: Gesture) -> InteractionOutcome {
        self.attempts.record_success();
        tracing::info!(step = %self.id, action = %self.props.action_type, ?gesture, "Correct action");
        self.notify(true);
        InteractionOutcome::Success { gesture }
    }

    fn signal_failure(&mut self, reason: RejectReason) -> InteractionOutcome {
        let attempts_so_far = self.attempts.record_failure(self.config.hint_after_failures);
        let hint_visible = self.attempts.hint_visible();
        tracing::info!(
            step = %self.id,
            action = %self.props.action_type,
            ?reason,
            attempts_so_far,
            hint_visible,
            "Wrong action"
        );
        self.notify(false);
        InteractionOutcome::Failure {
            attempts_so_far,
            hint_visible,
            reason,
        }
    }

    fn notify(&mut self, success: bool) {
        if let Some(callback) = self.on_interaction.as_mut() {
            callback(success);
        }
    }
}
