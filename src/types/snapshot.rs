//! Immutable session snapshot published after every frame
//!
//! Renderers and API clients only ever see whole snapshots, so a read never
//! lands in the middle of a frame's transitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{count_tile_colors, FaceName, GuideError, Move, Phase, RubikFace, SolverFault, TileColor};

/// Coarse stability-filter state, for display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StabilityStatus {
    #[default]
    Unrecognized,
    Pending,
    Stable,
    Degrading,
}

/// Everything a presentation layer needs for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Frames processed so far
    pub frame: u64,
    pub phase: Phase,
    pub stability: StabilityStatus,
    /// Monotonic count of recorded faces, including the bonus rotation
    pub observed_faces: u32,
    pub faces: BTreeMap<FaceName, RubikFace>,
    pub tile_colors_valid: bool,
    /// Facelet string, once all six faces with distinct centers are held
    pub facelets: Option<String>,
    pub fault: Option<SolverFault>,
    pub solution: Option<String>,
    pub moves: Vec<Move>,
    pub move_index: usize,
    /// Solver tables loaded so far
    pub readiness: usize,
}

impl SessionSnapshot {
    /// Move at the execution index
    pub fn current_move(&self) -> Option<Move> {
        self.moves.get(self.move_index).copied()
    }

    /// Center color of a recorded face
    pub fn center_color(&self, name: FaceName) -> Option<TileColor> {
        self.faces.get(&name).map(RubikFace::center)
    }

    /// Tile counts per color across recorded faces
    pub fn color_counts(&self) -> BTreeMap<TileColor, usize> {
        count_tile_colors(self.faces.values())
    }

    /// Failure to present to the user, derived from the phase
    pub fn error(&self) -> Option<GuideError> {
        match self.phase {
            Phase::BadColors => {
                let counts = self
                    .color_counts()
                    .iter()
                    .map(|(color, n)| format!("{}={}", color, n))
                    .collect::<Vec<_>>()
                    .join(" ");
                Some(GuideError::BadColors { counts })
            }
            Phase::Incorrect => self.fault.map(GuideError::from),
            _ => None,
        }
    }
}
