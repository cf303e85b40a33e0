//! Loading and replaying trace files from disk.

use std::io::Write;

use sarassure_core::{ActionType, Gesture, InteractionOutcome};
use sarassure_replay::{load_gesture_config, load_trace, replay};
use tempfile::NamedTempFile;

const SESSION: &str = r#"{
    "container": {"left": 0, "top": 0, "width": 400, "height": 800},
    "steps": [
        {"props": {"imageId": "home", "actionType": "tap",
                   "startArea": {"x": 50, "y": 50, "width": 20, "height": 10}}},
        {"props": {"app_image_id": "settings", "action_type": "swipe_up",
                   "start_area": {"x_percent": 50, "y_percent": 80,
                                  "width_percent": 50, "height_percent": 20}}},
        {"props": {"imageId": "search", "actionType": "text_input",
                   "keyboardAutoShow": true,
                   "targetArea": {"x": 50, "y": 10, "width": 80, "height": 8,
                                  "expectedValue": "Paramètres"}}}
    ],
    "events": [
        {"type": "Pointer", "data": {"phase": "down", "x": 10.0, "y": 10.0, "timestamp_ms": 0}},
        {"type": "Pointer", "data": {"phase": "up", "x": 10.0, "y": 10.0, "timestamp_ms": 80}},
        {"type": "Pointer", "data": {"phase": "down", "x": 200.0, "y": 400.0, "timestamp_ms": 1000}},
        {"type": "Pointer", "data": {"phase": "up", "x": 200.0, "y": 400.0, "timestamp_ms": 1080}},
        {"type": "Pointer", "data": {"phase": "down", "x": 200.0, "y": 640.0, "timestamp_ms": 2000}},
        {"type": "Pointer", "data": {"phase": "move", "x": 200.0, "y": 560.0, "timestamp_ms": 2100}},
        {"type": "Pointer", "data": {"phase": "up", "x": 200.0, "y": 500.0, "timestamp_ms": 2200}},
        {"type": "TextChange", "data": {"value": "param", "timestamp_ms": 3000}},
        {"type": "TextChange", "data": {"value": "paramètres", "timestamp_ms": 3400}}
    ]
}"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn full_session_completes() {
    let file = write_temp(SESSION);
    let trace = load_trace(file.path()).unwrap();
    let config = load_gesture_config(None).unwrap();
    let report = replay(&trace, &config, 1_000).unwrap();

    assert!(report.is_complete(), "{report}");
    assert_eq!(report.steps[0].failures, 1);
    assert_eq!(report.steps[1].action_type, ActionType::SwipeUp);
    assert_eq!(report.steps[1].completed_at_ms, Some(2_200));
    assert_eq!(
        report.steps[2].outcomes.last(),
        Some(&InteractionOutcome::Success {
            gesture: Gesture::TextEntry
        })
    );
}

#[test]
fn custom_thresholds_change_the_outcome() {
    // The 140px swipe no longer clears a 150px threshold.
    let config_file = write_temp(r#"{"swipe_min_px": 150, "move_slop_px": 10}"#);
    let config = load_gesture_config(Some(config_file.path())).unwrap();
    assert!((config.swipe_min_px - 150.0).abs() < f32::EPSILON);

    let trace = load_trace(write_temp(SESSION).path()).unwrap();
    let report = replay(&trace, &config, 1_000).unwrap();
    assert_eq!(report.completed_steps(), 1);
    assert!(!report.steps[1].is_completed());
}

#[test]
fn invalid_config_is_rejected() {
    let config_file = write_temp(r#"{"move_slop_px": 80, "swipe_min_px": 50}"#);
    let err = load_gesture_config(Some(config_file.path())).unwrap_err();
    assert!(format!("{err:#}").contains("Invalid gesture config"));
}

#[test]
fn unordered_events_are_rejected() {
    let trace = r#"{
        "container": {"left": 0, "top": 0, "width": 100, "height": 100},
        "steps": [],
        "events": [
            {"type": "Tick", "data": {"timestamp_ms": 50}},
            {"type": "Tick", "data": {"timestamp_ms": 10}}
        ]
    }"#;
    let file = write_temp(trace);
    assert!(load_trace(file.path()).is_err());
}

#[test]
fn missing_trace_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = load_trace(&path).unwrap_err();
    assert!(err.to_string().contains("absent.json"));
}
