//! Solver adapter
//!
//! The two-phase search itself lives outside this crate. Hosts plug it in
//! through `CubeSolver`; `ScriptedSolver` answers with fixed results for
//! replays, the API and tests.

use serde::{Deserialize, Serialize};

/// Marker the solver puts in front of its error digit
pub const SOLVER_ERROR_MARKER: &str = "Error";

/// Synchronous, bounded-latency cube solver
pub trait CubeSolver: Send + Sync {
    /// 0 when the facelet string describes a solvable cube, else a negative code
    fn verify(&self, facelets: &str) -> i32;

    /// Space-separated moves, or text ending in `Error N`
    fn solve(&self, facelets: &str, max_depth: u8, max_solutions: u8, separator: bool) -> String;
}

impl<T: CubeSolver + ?Sized> CubeSolver for Box<T> {
    fn verify(&self, facelets: &str) -> i32 {
        (**self).verify(facelets)
    }

    fn solve(&self, facelets: &str, max_depth: u8, max_solutions: u8, separator: bool) -> String {
        (**self).solve(facelets, max_depth, max_solutions, separator)
    }
}

/// Trailing error digit of a failed solve, None when the result is a solution
pub fn solver_error_code(result: &str) -> Option<u8> {
    if !result.contains(SOLVER_ERROR_MARKER) {
        return None;
    }
    let code = result
        .trim_end()
        .chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .and_then(|d| u8::try_from(d).ok())
        // Marker without a digit still counts as a failure.
        .unwrap_or(0);
    Some(code)
}

/// Solver with canned answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptedSolver {
    /// Returned by every `verify`
    pub verify_code: i32,
    /// Returned by every `solve`
    pub solution: String,
}

impl Default for ScriptedSolver {
    fn default() -> Self {
        Self {
            verify_code: 0,
            solution: String::new(),
        }
    }
}

impl ScriptedSolver {
    pub fn new(verify_code: i32, solution: impl Into<String>) -> Self {
        Self {
            verify_code,
            solution: solution.into(),
        }
    }

    /// Verifies fine and returns `solution`
    pub fn solving(solution: impl Into<String>) -> Self {
        Self::new(0, solution)
    }

    /// Verification fails with `code`
    pub fn rejecting(code: i32) -> Self {
        Self::new(code, String::new())
    }
}

impl CubeSolver for ScriptedSolver {
    fn verify(&self, _facelets: &str) -> i32 {
        self.verify_code
    }

    fn solve(&self, _facelets: &str, _max_depth: u8, _max_solutions: u8, _separator: bool) -> String {
        self.solution.clone()
    }
}
