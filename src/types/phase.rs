//! Application phase definitions

use colored::Color;
use serde::{Deserialize, Serialize};

/// Workflow phase of a guided session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Waiting for the first stable face
    #[default]
    Start,
    /// Looking for the next face after a rotation
    Searching,
    /// A face was just recorded
    GotIt,
    /// User should rotate the whole cube
    Rotate,
    /// Move shown; waiting for the user to finish it
    WaitingForMoveComplete,
    /// User should perform the current move
    DoMove,
    /// All faces scanned with valid color counts
    Complete,
    /// Color counts are wrong; rescan needed
    BadColors,
    /// Cube verified; waiting for solver tables
    Waiting,
    /// Solver tables ready
    Verified,
    /// Solver rejected the cube
    Incorrect,
    /// Solution computed
    Solved,
    /// All moves performed
    Done,
}

impl Phase {
    /// Terminal color for display
    pub fn color(&self) -> Color {
        match self {
            Phase::Start | Phase::Searching => Color::BrightBlack,
            Phase::GotIt | Phase::Rotate => Color::Yellow,
            Phase::Complete | Phase::Waiting | Phase::Verified | Phase::Solved => Color::Cyan,
            Phase::DoMove | Phase::WaitingForMoveComplete => Color::Magenta,
            Phase::Done => Color::Green,
            Phase::BadColors | Phase::Incorrect => Color::Red,
        }
    }

    /// Get emoji for phase
    pub fn emoji(&self) -> &'static str {
        match self {
            Phase::Start | Phase::Searching => "🔍",
            Phase::GotIt => "✋",
            Phase::Rotate => "🔄",
            Phase::Complete | Phase::Waiting | Phase::Verified | Phase::Solved => "🧮",
            Phase::DoMove | Phase::WaitingForMoveComplete => "👉",
            Phase::Done => "🏁",
            Phase::BadColors | Phase::Incorrect => "⛔",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Start => "START",
            Phase::Searching => "SEARCHING",
            Phase::GotIt => "GOT_IT",
            Phase::Rotate => "ROTATE",
            Phase::WaitingForMoveComplete => "WAITING_FOR_MOVE_COMPLETE",
            Phase::DoMove => "DO_MOVE",
            Phase::Complete => "COMPLETE",
            Phase::BadColors => "BAD_COLORS",
            Phase::Waiting => "WAITING",
            Phase::Verified => "VERIFIED",
            Phase::Incorrect => "INCORRECT",
            Phase::Solved => "SOLVED",
            Phase::Done => "DONE",
        };
        write!(f, "{}", name)
    }
}
