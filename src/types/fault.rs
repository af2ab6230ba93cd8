//! Solver fault codes

use serde::{Deserialize, Serialize};

/// Which solver call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FaultStage {
    Verify,
    Solve,
}

/// A solver failure kept for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverFault {
    pub stage: FaultStage,
    /// Positive error number (1..=8 for known two-phase errors)
    pub code: u8,
}

impl SolverFault {
    /// From a nonzero verify result; verify reports errors as negative numbers
    pub fn from_verify(result: i32) -> Self {
        Self {
            stage: FaultStage::Verify,
            code: u8::try_from(result.unsigned_abs()).unwrap_or(u8::MAX),
        }
    }

    pub fn from_solve(code: u8) -> Self {
        Self {
            stage: FaultStage::Solve,
            code,
        }
    }

    pub fn message(&self) -> &'static str {
        two_phase_error_message(self.code)
    }
}

impl std::fmt::Display for SolverFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {}: {}", self.code, self.message())
    }
}

/// Standard two-phase solver error messages
pub fn two_phase_error_message(code: u8) -> &'static str {
    match code {
        0 => "Cube is solvable",
        1 => "There is not exactly one facelet of each colour",
        2 => "Not all 12 edges exist exactly once",
        3 => "Flip error: One edge has to be flipped",
        4 => "Not all 8 corners exist exactly once",
        5 => "Twist error: One corner has to be twisted",
        6 => "Parity error: Two corners or two edges have to be exchanged",
        7 => "No solution exists for the given maxDepth",
        8 => "Timeout, no solution within given time",
        _ => "Unknown solver error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_code_is_negated() {
        let fault = SolverFault::from_verify(-5);
        assert_eq!(fault.code, 5);
        assert_eq!(fault.stage, FaultStage::Verify);
        assert!(fault.message().starts_with("Twist error"));
    }

    #[test]
    fn test_unknown_code_message() {
        assert_eq!(two_phase_error_message(42), "Unknown solver error");
        assert_eq!(SolverFault::from_verify(-1000).code, u8::MAX);
    }
}
