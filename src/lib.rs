//! Cubeguide: guided cube scanning and solving
//!
//! A noisy per-frame face-recognition signal goes in, trusted workflow
//! phases come out:
//! frame → StabilityFilter → PhaseController → SessionSnapshot → renderer

pub mod core;
pub mod types;

// =============================================================================
// STABILITY
// =============================================================================

/// Consecutive identical recognitions must exceed this count before a face
/// is accepted (and consecutive misses before it is dropped).
pub const MATCH_THRESHOLD: u32 = 1;

// =============================================================================
// PHASE TIMING
// =============================================================================

/// Frames spent in GOT_IT before the rotate prompt appears
pub const GOT_IT_DWELL_FRAMES: u32 = 3;

/// Prune tables the solver must finish generating before solving starts
pub const REQUIRED_PRUNE_TABLES: usize = 12;

// =============================================================================
// SOLVER LIMITS
// =============================================================================

/// Maximum search depth handed to the solver
pub const SOLVER_MAX_DEPTH: u8 = 25;

/// Solution limit handed to the solver
pub const SOLVER_MAX_SOLUTIONS: u8 = 2;

// =============================================================================
// CUBE GEOMETRY
// =============================================================================

/// Tiles on one face
pub const TILES_PER_FACE: usize = 9;

/// Faces on a cube
pub const FACE_COUNT: usize = 6;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
