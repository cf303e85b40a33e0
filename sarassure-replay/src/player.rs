//! Drives recorded events through the exercise steps.

use std::fmt;

use sarassure_core::{
    ActionType, ExerciseResult, ExerciseStep, GestureConfig, InputEvent, InteractionOutcome,
};
use serde::Serialize;

use crate::trace::Trace;

/// What happened on one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// Zero-based step index.
    pub index: usize,
    /// Expected action.
    pub action_type: ActionType,
    /// Every outcome the step reported, in order.
    pub outcomes: Vec<InteractionOutcome>,
    /// Failures before completion (or in total, if never completed).
    pub failures: u32,
    /// Whether the hint was shown at some point.
    pub hint_shown: bool,
    /// Time of the successful action.
    pub completed_at_ms: Option<u64>,
}

impl StepReport {
    fn new(index: usize, action_type: ActionType) -> Self {
        Self {
            index,
            action_type,
            outcomes: Vec::new(),
            failures: 0,
            hint_shown: false,
            completed_at_ms: None,
        }
    }

    /// Record outcomes observed at `at_ms`. Returns true once the step succeeded.
    fn record(&mut self, outcomes: Vec<InteractionOutcome>, at_ms: u64) -> bool {
        for outcome in outcomes {
            match outcome {
                InteractionOutcome::Success { .. } => {
                    self.completed_at_ms.get_or_insert(at_ms);
                }
                InteractionOutcome::Failure { hint_visible, .. } => {
                    self.failures += 1;
                    self.hint_shown |= hint_visible;
                }
                InteractionOutcome::Pending { .. } => {}
            }
            self.outcomes.push(outcome);
        }
        self.completed_at_ms.is_some()
    }

    /// Whether the step was completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed_at_ms.is_some()
    }
}

/// Result of replaying a whole trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    /// Per-step reports for every step that was mounted.
    pub steps: Vec<StepReport>,
    /// Number of steps in the exercise.
    pub total_steps: usize,
    /// Events received after the last step completed.
    pub ignored_events: usize,
}

impl ReplayReport {
    /// Number of completed steps.
    #[must_use]
    pub fn completed_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.is_completed()).count()
    }

    /// Whether every step was completed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_steps() == self.total_steps
    }
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            write!(
                f,
                "step {}/{} {}: ",
                step.index + 1,
                self.total_steps,
                step.action_type
            )?;
            match step.completed_at_ms {
                Some(at) => write!(f, "completed at {at}ms")?,
                None => write!(f, "not completed")?,
            }
            write!(f, ", {} failure(s)", step.failures)?;
            if step.hint_shown {
                write!(f, ", hint shown")?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "{}/{} steps completed",
            self.completed_steps(),
            self.total_steps
        )?;
        if self.ignored_events > 0 {
            write!(f, " ({} trailing events ignored)", self.ignored_events)?;
        }
        Ok(())
    }
}

struct Mounted {
    step: ExerciseStep,
    report: StepReport,
}

fn mount(trace: &Trace, index: usize, config: &GestureConfig) -> ExerciseResult<Option<Mounted>> {
    let Some(entry) = trace.steps.get(index) else {
        return Ok(None);
    };
    let mut step = ExerciseStep::try_new(entry.props.clone(), config.clone())?;
    step.set_container(trace.container_for(index));
    tracing::debug!(
        "Mounted step {}/{} ({})",
        index + 1,
        trace.steps.len(),
        entry.props.action_type
    );
    Ok(Some(Mounted {
        report: StepReport::new(index, entry.props.action_type),
        step,
    }))
}

/// Replay `trace`, advancing to the next step whenever one succeeds.
///
/// Timers due before an event fire first, so a step completed by its
/// long-press or text-commit timer hands the event to the next step.
/// After the last event the clock runs `settle_ms` further.
///
/// # Errors
///
/// Returns an error if a step's zone geometry or the thresholds are invalid.
pub fn replay(trace: &Trace, config: &GestureConfig, settle_ms: u64) -> ExerciseResult<ReplayReport> {
    config.validate()?;

    let mut reports = Vec::with_capacity(trace.steps.len());
    let mut current = mount(trace, 0, config)?;
    let mut ignored_events = 0;

    for event in &trace.events {
        let now = event.timestamp_ms();

        let timer_completed = current.as_mut().is_some_and(|mounted| {
            let fired = mounted.step.tick(now);
            mounted.report.record(fired, now)
        });
        if timer_completed {
            current = advance(trace, current.take(), &mut reports, config)?;
        }

        let Some(mounted) = current.as_mut() else {
            ignored_events += 1;
            continue;
        };
        let outcomes = mounted.step.handle(event);
        if mounted.report.record(outcomes, now) {
            current = advance(trace, current.take(), &mut reports, config)?;
        }
    }

    if let Some(mut mounted) = current.take() {
        let end = trace
            .events
            .last()
            .map_or(0, InputEvent::timestamp_ms)
            .saturating_add(settle_ms);
        let fired = mounted.step.tick(end);
        mounted.report.record(fired, end);
        mounted.step.unmount();
        reports.push(mounted.report);
    }

    let report = ReplayReport {
        steps: reports,
        total_steps: trace.steps.len(),
        ignored_events,
    };
    tracing::info!(
        "Replay finished: {}/{} steps completed",
        report.completed_steps(),
        report.total_steps
    );
    Ok(report)
}

fn advance(
    trace: &Trace,
    completed: Option<Mounted>,
    reports: &mut Vec<StepReport>,
    config: &GestureConfig,
) -> ExerciseResult<Option<Mounted>> {
    let Some(mut done) = completed else {
        return Ok(None);
    };
    done.step.unmount();
    let index = done.report.index;
    tracing::info!(
        "Step {} completed after {} failure(s)",
        index + 1,
        done.report.failures
    );
    reports.push(done.report);
    mount(trace, index + 1, config)
}
