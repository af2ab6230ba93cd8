//! Core types for Cubeguide

mod config;
mod error;
mod face;
mod fault;
mod moves;
mod output;
mod phase;
mod reason;
mod snapshot;

pub use config::ControllerConfig;
pub use error::{GuideError, MoveParseError, ScriptError};
pub use face::{count_tile_colors, FaceName, FaceRecognitionResult, Fingerprint, RubikFace, TileColor};
pub use fault::{two_phase_error_message, FaultStage, SolverFault};
pub use moves::{parse_solution, Move, Turn};
pub use output::{FrameOutput, StabilityEvent, Transition};
pub use phase::Phase;
pub use reason::ReasonCode;
pub use snapshot::{SessionSnapshot, StabilityStatus};
