//! Property tests for zone gating and deterministic replay.

use proptest::prelude::*;
use sarassure_core::{
    ActionType, ActionZone, ContainerRect, ExerciseStep, InputEvent, InteractionOutcome,
    PointerEvent, PointerPhase, RejectReason, StepProps,
};

fn mounted(action: ActionType) -> ExerciseStep {
    let zone = ActionZone::new(50.0, 50.0, 20.0, 20.0);
    let props = StepProps::new("screen", action)
        .with_start_area(zone.clone())
        .with_target_area(zone);
    let mut step = ExerciseStep::new(props);
    step.set_container(ContainerRect::new(0.0, 0.0, 200.0, 100.0));
    step
}

fn arb_action() -> impl Strategy<Value = ActionType> {
    prop::sample::select(ActionType::ALL.to_vec())
}

fn arb_phase() -> impl Strategy<Value = PointerPhase> {
    prop_oneof![
        Just(PointerPhase::Down),
        Just(PointerPhase::Move),
        Just(PointerPhase::Up),
        Just(PointerPhase::Cancel),
    ]
}

fn arb_events() -> impl Strategy<Value = Vec<InputEvent>> {
    prop::collection::vec((arb_phase(), 0.0f32..200.0, 0.0f32..100.0, 0u64..800), 1..40).prop_map(
        |raw| {
            let mut now = 0;
            raw.into_iter()
                .map(|(phase, x, y, dt)| {
                    now += dt;
                    InputEvent::Pointer(PointerEvent::new(phase, x, y, now))
                })
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn tap_succeeds_iff_inside_zone(x in 0.0f32..200.0, y in 0.0f32..100.0) {
        let mut step = mounted(ActionType::Tap);
        let mut outcomes = step.handle(&InputEvent::Pointer(PointerEvent::down(x, y, 0)));
        outcomes.extend(step.handle(&InputEvent::Pointer(PointerEvent::up(x, y, 50))));

        let inside = (80.0..=120.0).contains(&x) && (40.0..=60.0).contains(&y);
        prop_assert_eq!(outcomes.len(), 1);
        if inside {
            prop_assert!(outcomes[0].is_success());
        } else {
            let is_outside_failure = matches!(
                outcomes[0],
                InteractionOutcome::Failure { reason: RejectReason::OutsideZone, .. }
            );
            prop_assert!(is_outside_failure);
        }
    }

    #[test]
    fn outside_origin_never_succeeds(
        action in arb_action(),
        x in 0.0f32..70.0,
        y in 0.0f32..100.0,
        end_x in 0.0f32..200.0,
        end_y in 0.0f32..100.0,
    ) {
        prop_assume!(!matches!(action, ActionType::Bravo | ActionType::DragAndDrop));
        let mut step = mounted(action);
        let mut outcomes = step.handle(&InputEvent::Pointer(PointerEvent::down(x, y, 0)));
        outcomes.extend(step.handle(&InputEvent::Pointer(PointerEvent::up(end_x, end_y, 100))));
        prop_assert!(outcomes.iter().all(|o| !o.is_success()));
    }

    #[test]
    fn replay_is_deterministic(action in arb_action(), events in arb_events()) {
        let run = |events: &[InputEvent]| {
            let mut step = mounted(action);
            let mut outcomes: Vec<InteractionOutcome> =
                events.iter().flat_map(|e| step.handle(e)).collect();
            outcomes.extend(step.tick(u64::MAX / 2));
            (outcomes, step.attempts().failures())
        };
        prop_assert_eq!(run(&events), run(&events));
    }

    #[test]
    fn failures_count_resolved_failures(action in arb_action(), events in arb_events()) {
        let mut step = mounted(action);
        let mut streak = 0;
        for event in &events {
            for outcome in step.handle(event) {
                match outcome.decision() {
                    Some(true) => streak = 0,
                    Some(false) => streak += 1,
                    None => {}
                }
            }
        }
        prop_assert_eq!(step.attempts().failures(), streak);
    }
}
