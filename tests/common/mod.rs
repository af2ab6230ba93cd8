//! Frame-feeding helpers shared by the integration tests

#![allow(dead_code)]

use cubeguide::core::{CubeSolver, PhaseController};
use cubeguide::types::{FaceRecognitionResult, FrameOutput, Phase, RubikFace, TileColor};

/// A scrambled-looking but color-balanced set of six faces (U R F D L B)
pub const BALANCED: [&str; 6] = [
    "WWWWWWWWW",
    "RRRRRRRRR",
    "GGGGGGGGG",
    "YYYYYYYYY",
    "OOOOOOOOO",
    "BBBBBBBBB",
];

pub fn face(codes: &str) -> FaceRecognitionResult {
    FaceRecognitionResult::Solved(RubikFace::from_codes(codes).expect("nine tile codes"))
}

pub fn uniform(color: TileColor) -> FaceRecognitionResult {
    FaceRecognitionResult::Solved(RubikFace::uniform(color))
}

/// Feed the same result `n` times, returning every output
pub fn feed<S: CubeSolver>(
    controller: &mut PhaseController<S>,
    result: &FaceRecognitionResult,
    n: usize,
) -> Vec<FrameOutput> {
    (0..n)
        .map(|_| controller.process_face(result).expect("no contract violation"))
        .collect()
}

/// Hold a face until it becomes stable (two frames at the default threshold)
pub fn show<S: CubeSolver>(controller: &mut PhaseController<S>, result: &FaceRecognitionResult) -> FrameOutput {
    feed(controller, result, 2).pop().expect("two outputs")
}

/// Lose the stable face (four missed frames at the default threshold)
pub fn look_away<S: CubeSolver>(controller: &mut PhaseController<S>) -> FrameOutput {
    feed(controller, &FaceRecognitionResult::Invalid, 4)
        .pop()
        .expect("four outputs")
}

/// Scan six faces and the bonus rotation back to the first face.
///
/// Returns the output of the final acceptance frame.
pub fn scan<S: CubeSolver>(controller: &mut PhaseController<S>, faces: [&str; 6]) -> FrameOutput {
    for codes in faces {
        let out = show(controller, &face(codes));
        assert_eq!(out.phase, Phase::GotIt, "face {} recorded", codes);

        let dwell = feed(controller, &face(codes), 4);
        assert_eq!(dwell.last().map(|o| o.phase), Some(Phase::Rotate));

        assert_eq!(look_away(controller).phase, Phase::Searching);
    }
    show(controller, &face(faces[0]))
}
