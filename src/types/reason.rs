//! Reason codes for phase transitions

use serde::{Deserialize, Serialize};

/// Why a phase transition happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // S0xx: Scanning
    // =========================================================================
    /// First or next face recorded
    S001_FACE_RECORDED,
    /// All six faces seen; one more rotation to restore orientation
    S002_BONUS_ROTATION,
    /// Scan finished with valid color counts
    S003_SCAN_COMPLETE,
    /// Scan finished but color counts are wrong
    S004_BAD_COLORS,
    /// Dwell elapsed after a recorded face
    S005_DWELL_ELAPSED,
    /// Stable face lost while the rotate prompt was up
    S006_ROTATION_STARTED,

    // =========================================================================
    // V0xx: Verification and solving
    // =========================================================================
    /// Verification accepted the cube
    V001_CUBE_VERIFIED,
    /// Verification rejected the cube
    V002_VERIFY_FAILED,
    /// Solver tables finished loading
    V003_TABLES_READY,
    /// Solver returned a move sequence
    V004_SOLUTION_FOUND,
    /// Solver returned an error
    V005_SOLVE_FAILED,
    /// Solution split into moves
    V006_MOVES_QUEUED,

    // =========================================================================
    // M0xx: Guided moves
    // =========================================================================
    /// Stable face lost: user started turning
    M001_MOVE_STARTED,
    /// Stable face regained: user finished turning
    M002_MOVE_COMPLETED,
    /// Last move finished
    M003_ALL_MOVES_DONE,

    // =========================================================================
    // X0xx: Session
    // =========================================================================
    /// Deferred reset applied at frame start
    X001_RESET_APPLIED,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::S001_FACE_RECORDED => "S001_FACE_RECORDED",
            Self::S002_BONUS_ROTATION => "S002_BONUS_ROTATION",
            Self::S003_SCAN_COMPLETE => "S003_SCAN_COMPLETE",
            Self::S004_BAD_COLORS => "S004_BAD_COLORS",
            Self::S005_DWELL_ELAPSED => "S005_DWELL_ELAPSED",
            Self::S006_ROTATION_STARTED => "S006_ROTATION_STARTED",
            Self::V001_CUBE_VERIFIED => "V001_CUBE_VERIFIED",
            Self::V002_VERIFY_FAILED => "V002_VERIFY_FAILED",
            Self::V003_TABLES_READY => "V003_TABLES_READY",
            Self::V004_SOLUTION_FOUND => "V004_SOLUTION_FOUND",
            Self::V005_SOLVE_FAILED => "V005_SOLVE_FAILED",
            Self::V006_MOVES_QUEUED => "V006_MOVES_QUEUED",
            Self::M001_MOVE_STARTED => "M001_MOVE_STARTED",
            Self::M002_MOVE_COMPLETED => "M002_MOVE_COMPLETED",
            Self::M003_ALL_MOVES_DONE => "M003_ALL_MOVES_DONE",
            Self::X001_RESET_APPLIED => "X001_RESET_APPLIED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::S001_FACE_RECORDED => "Face recorded",
            Self::S002_BONUS_ROTATION => "All faces seen, one more rotation",
            Self::S003_SCAN_COMPLETE => "Scan complete",
            Self::S004_BAD_COLORS => "Tile color counts invalid",
            Self::S005_DWELL_ELAPSED => "Rotate the cube",
            Self::S006_ROTATION_STARTED => "Rotation started",
            Self::V001_CUBE_VERIFIED => "Cube verified",
            Self::V002_VERIFY_FAILED => "Cube failed verification",
            Self::V003_TABLES_READY => "Solver tables ready",
            Self::V004_SOLUTION_FOUND => "Solution found",
            Self::V005_SOLVE_FAILED => "Solver failed",
            Self::V006_MOVES_QUEUED => "Moves queued",
            Self::M001_MOVE_STARTED => "Move started",
            Self::M002_MOVE_COMPLETED => "Move completed",
            Self::M003_ALL_MOVES_DONE => "Cube solved",
            Self::X001_RESET_APPLIED => "Session reset",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
