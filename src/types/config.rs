//! Controller configuration

use serde::{Deserialize, Serialize};

use crate::{
    GOT_IT_DWELL_FRAMES, MATCH_THRESHOLD, REQUIRED_PRUNE_TABLES, SOLVER_MAX_DEPTH,
    SOLVER_MAX_SOLUTIONS,
};

/// Tunables for one guided session. Missing fields take the crate defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Consecutive matches (and misses) that must be exceeded
    pub match_threshold: u32,
    /// Frames spent in GOT_IT before ROTATE
    pub got_it_dwell_frames: u32,
    /// Readiness count that releases WAITING
    pub required_prune_tables: usize,
    /// Solver search depth
    pub solver_max_depth: u8,
    /// Solver solution limit
    pub solver_max_solutions: u8,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            match_threshold: MATCH_THRESHOLD,
            got_it_dwell_frames: GOT_IT_DWELL_FRAMES,
            required_prune_tables: REQUIRED_PRUNE_TABLES,
            solver_max_depth: SOLVER_MAX_DEPTH,
            solver_max_solutions: SOLVER_MAX_SOLUTIONS,
        }
    }
}
