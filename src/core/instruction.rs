//! Renderer-facing instructions derived from a snapshot
//!
//! ROTATE shows a whole-cube arrow that alternates between two variants so
//! consecutive prompts look different. DO_MOVE shows an edge arrow for the
//! current move, tinted with that face's center color.

use serde::{Deserialize, Serialize};

use crate::types::{FaceName, Move, Phase, SessionSnapshot, TileColor, Turn};

/// Which whole-cube rotation arrow to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RotationVariant {
    /// Front face rolls to the top
    FrontToTop,
    /// Right face rolls to the top
    RightToTop,
}

/// Arrow length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Amount {
    QuarterTurn,
    HalfTurn,
}

/// Arrow orientation relative to the face's axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Positive,
    Negative,
}

/// What the presentation layer should draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Instruction {
    /// Nothing to draw
    None,
    /// Rotate the whole cube
    FullRotation { variant: RotationVariant },
    /// Turn one face
    EdgeRotation {
        #[serde(rename = "move")]
        mv: Move,
        face: FaceName,
        amount: Amount,
        direction: Direction,
        /// Center color of the face, when recorded
        tint: Option<TileColor>,
    },
}

impl Instruction {
    /// Instruction for the snapshot's phase
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        match snapshot.phase {
            Phase::Rotate => Instruction::FullRotation {
                variant: rotation_variant(snapshot.observed_faces),
            },
            Phase::DoMove => match snapshot.current_move() {
                Some(mv) => Self::edge(mv, snapshot.center_color(mv.face)),
                None => Instruction::None,
            },
            _ => Instruction::None,
        }
    }

    /// Edge arrow for one move
    pub fn edge(mv: Move, tint: Option<TileColor>) -> Self {
        Instruction::EdgeRotation {
            mv,
            face: mv.face,
            amount: amount(mv.turn),
            direction: direction(mv),
            tint,
        }
    }

    /// An arrow has to be drawn over the cube
    pub fn needs_overlay(&self) -> bool {
        !matches!(self, Instruction::None)
    }
}

/// Even counts roll the front face up, odd counts the right face
pub fn rotation_variant(observed_faces: u32) -> RotationVariant {
    if observed_faces % 2 == 0 {
        RotationVariant::FrontToTop
    } else {
        RotationVariant::RightToTop
    }
}

fn amount(turn: Turn) -> Amount {
    match turn {
        Turn::Half => Amount::HalfTurn,
        Turn::Clockwise | Turn::CounterClockwise => Amount::QuarterTurn,
    }
}

// U, L and B face away from their axis, so clockwise draws negative.
fn direction(mv: Move) -> Direction {
    let negative = match mv.face {
        FaceName::Up | FaceName::Left | FaceName::Back => mv.turn == Turn::Clockwise,
        FaceName::Down | FaceName::Right | FaceName::Front => mv.turn == Turn::CounterClockwise,
    };
    if negative {
        Direction::Negative
    } else {
        Direction::Positive
    }
}
