//! Core modules for Cubeguide

pub mod api;
pub mod controller;
pub mod cube_state;
pub mod instruction;
pub mod script;
pub mod solver;
pub mod stability;

pub use api::{create_router, create_router_with_state, run_server, AppState};
pub use controller::{PhaseController, ReadinessCounter, ResetHandle};
pub use cube_state::CubeState;
pub use instruction::{rotation_variant, Amount, Direction, Instruction, RotationVariant};
pub use script::{parse_script, FrameCommand};
pub use solver::{solver_error_code, CubeSolver, ScriptedSolver, SOLVER_ERROR_MARKER};
pub use stability::StabilityFilter;
