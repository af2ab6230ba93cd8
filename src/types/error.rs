//! Error types
//!
//! Recognition noise never shows up here: the stability filter absorbs it.
//! Color-count and solver failures are phases first; these variants only
//! describe them for display. An unknown move mnemonic is a broken solver
//! contract and is returned to the host as a hard error.

use thiserror::Error;

use crate::types::{FaultStage, SolverFault};

/// Errors surfaced by a guided session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuideError {
    /// Tile colors do not add up to nine of each
    #[error("Tile color counts invalid: {counts}")]
    BadColors { counts: String },

    /// The solver's verification rejected the scanned cube
    #[error("Verification failed with code {code}: {message}")]
    Verification { code: u8, message: &'static str },

    /// The solver could not produce a solution
    #[error("Solver failed with code {code}: {message}")]
    Solver { code: u8, message: &'static str },

    /// The solver produced a move outside the mnemonic grammar
    #[error("Unknown move mnemonic '{mnemonic}' in solution \"{solution}\"")]
    UnknownMoveMnemonic { mnemonic: String, solution: String },
}

impl From<SolverFault> for GuideError {
    fn from(fault: SolverFault) -> Self {
        match fault.stage {
            FaultStage::Verify => GuideError::Verification {
                code: fault.code,
                message: fault.message(),
            },
            FaultStage::Solve => GuideError::Solver {
                code: fault.code,
                message: fault.message(),
            },
        }
    }
}

/// A single move mnemonic failed to parse
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown move mnemonic '{0}'")]
pub struct MoveParseError(pub String);

/// A frame-script line failed to parse
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Line {line}: unknown command '{text}'")]
    UnknownCommand { line: usize, text: String },

    #[error("Line {line}: expected nine tile codes (ROYGBW), got '{text}'")]
    BadTiles { line: usize, text: String },

    #[error("Line {line}: bad readiness count '{text}'")]
    BadCount { line: usize, text: String },

    #[error("Line {line}: invalid JSON frame: {reason}")]
    BadJson { line: usize, reason: String },
}
