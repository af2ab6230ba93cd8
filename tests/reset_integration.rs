//! Integration tests for deferred resets

mod common;

use common::{face, feed, look_away, scan, show, uniform, BALANCED};
use cubeguide::core::{PhaseController, ScriptedSolver};
use cubeguide::types::{FaceRecognitionResult, Phase, ReasonCode, TileColor};
use cubeguide::REQUIRED_PRUNE_TABLES;
use std::thread;

#[test]
fn test_repeated_requests_apply_once() {
    let mut controller = PhaseController::new(ScriptedSolver::default());
    show(&mut controller, &uniform(TileColor::White));

    controller.request_reset();
    controller.request_reset();
    controller.reset_handle().request();

    let out = controller.process_face(&FaceRecognitionResult::Invalid).unwrap();
    assert!(out.reset_applied);
    assert_eq!(out.previous_phase, Phase::GotIt);
    let resets = out
        .transitions
        .iter()
        .filter(|t| t.reason == ReasonCode::X001_RESET_APPLIED)
        .count();
    assert_eq!(resets, 1);

    let out = controller.process_face(&FaceRecognitionResult::Invalid).unwrap();
    assert!(!out.reset_applied);
    assert!(!controller.reset_handle().is_pending());
}

#[test]
fn test_reset_from_another_thread() {
    let mut controller = PhaseController::new(ScriptedSolver::default());
    show(&mut controller, &uniform(TileColor::White));

    let handle = controller.reset_handle();
    thread::spawn(move || handle.request()).join().unwrap();

    // Nothing changes until the next frame boundary.
    assert_eq!(controller.phase(), Phase::GotIt);
    assert!(controller.reset_handle().is_pending());

    let out = controller.process_face(&uniform(TileColor::White)).unwrap();
    assert!(out.reset_applied);
    assert_eq!(controller.observed_face_count(), 0);
}

#[test]
fn test_reset_clears_session_but_keeps_readiness() {
    let mut controller = PhaseController::new(ScriptedSolver::solving("U R"));
    scan(&mut controller, BALANCED);
    controller.readiness().set(REQUIRED_PRUNE_TABLES);
    feed(&mut controller, &face(BALANCED[0]), 4);
    assert_eq!(controller.phase(), Phase::DoMove);

    controller.request_reset();
    let out = controller.process_face(&face(BALANCED[0])).unwrap();
    assert_eq!(out.phase, Phase::Start);
    assert_eq!(out.current_move, None);

    let snapshot = controller.snapshot();
    assert!(snapshot.faces.is_empty());
    assert!(snapshot.moves.is_empty());
    assert_eq!(snapshot.solution, None);
    assert_eq!(snapshot.fault, None);
    assert_eq!(snapshot.readiness, REQUIRED_PRUNE_TABLES);
}

#[test]
fn test_last_face_counts_as_new_after_reset() {
    let mut controller = PhaseController::new(ScriptedSolver::default());
    let white = uniform(TileColor::White);
    show(&mut controller, &white);

    controller.request_reset();
    look_away(&mut controller);

    let out = show(&mut controller, &white);
    assert!(out.new_face_accepted());
    assert_eq!(out.phase, Phase::GotIt);
    assert_eq!(controller.observed_face_count(), 1);
}

#[test]
fn test_reset_recovers_from_bad_colors() {
    let mut controller = PhaseController::new(ScriptedSolver::default());
    let mut faces = BALANCED;
    faces[1] = "RRRRRRRRW";
    assert_eq!(scan(&mut controller, faces).phase, Phase::BadColors);

    controller.request_reset();
    look_away(&mut controller);
    assert_eq!(controller.phase(), Phase::Start);

    let out = scan(&mut controller, BALANCED);
    assert_eq!(out.phase, Phase::Complete);
}
