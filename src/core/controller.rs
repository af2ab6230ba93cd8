//! Phase controller: sequences the guided session
//!
//! Per frame, in this order:
//! 1. apply a pending reset
//! 2. frame-tick transitions (dwell, readiness, verify, solve, queue moves)
//! 3. stability filter update
//! 4. stability-event transitions
//! 5. publish a snapshot
//!
//! Scanning: START → GOT_IT → ROTATE → SEARCHING → GOT_IT … → COMPLETE
//! Solving:  COMPLETE → WAITING → VERIFIED → SOLVED → DO_MOVE
//! Moves:    DO_MOVE ⇄ WAITING_FOR_MOVE_COMPLETE → DONE

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, warn};

use crate::core::cube_state::CubeState;
use crate::core::solver::{solver_error_code, CubeSolver};
use crate::core::stability::StabilityFilter;
use crate::types::{
    parse_solution, ControllerConfig, FaceRecognitionResult, FrameOutput, GuideError, Move,
    MoveParseError, Phase, ReasonCode, RubikFace, SessionSnapshot, SolverFault, StabilityEvent,
    Transition,
};

/// Deferred reset request, safe to fire from any thread
#[derive(Debug, Clone, Default)]
pub struct ResetHandle(Arc<AtomicBool>);

impl ResetHandle {
    /// Ask for a reset at the next frame boundary. Repeated requests
    /// before that frame collapse into one.
    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_pending(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

/// Solver precomputation progress, written by the table loader
#[derive(Debug, Clone, Default)]
pub struct ReadinessCounter(Arc<AtomicUsize>);

impl ReadinessCounter {
    pub fn set(&self, count: usize) {
        self.0.store(count, Ordering::Release);
    }

    /// One more table loaded; returns the new count
    pub fn increment(&self) -> usize {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }
}

/// Guided-session state machine
pub struct PhaseController<S: CubeSolver> {
    solver: S,
    config: ControllerConfig,
    filter: StabilityFilter,
    cube: CubeState,
    phase: Phase,
    /// Frames spent in GOT_IT
    got_it_count: u32,
    /// All faces seen but the cube still owes the rotation back to the start
    allow_one_more_rotation: bool,
    frame: u64,
    reset: ResetHandle,
    readiness: ReadinessCounter,
    publisher: watch::Sender<Arc<SessionSnapshot>>,
}

impl<S: CubeSolver> PhaseController<S> {
    /// Create controller with default config
    pub fn new(solver: S) -> Self {
        Self::with_config(solver, ControllerConfig::default())
    }

    pub fn with_config(solver: S, config: ControllerConfig) -> Self {
        let filter = StabilityFilter::with_threshold(config.match_threshold);
        let (publisher, _) = watch::channel(Arc::new(SessionSnapshot::default()));
        let controller = Self {
            solver,
            config,
            filter,
            cube: CubeState::new(),
            phase: Phase::Start,
            got_it_count: 0,
            allow_one_more_rotation: false,
            frame: 0,
            reset: ResetHandle::default(),
            readiness: ReadinessCounter::default(),
            publisher,
        };
        controller.publish();
        controller
    }

    /// Process one frame's recognition result. Call once per frame.
    ///
    /// Only a solver contract violation (unknown move mnemonic) is an error;
    /// every other failure shows up as a phase.
    pub fn process_face(&mut self, result: &FaceRecognitionResult) -> Result<FrameOutput, GuideError> {
        self.frame += 1;
        let previous_phase = self.phase;
        let mut transitions = Vec::new();

        let reset_applied = self.reset.take();
        if reset_applied {
            self.apply_reset(&mut transitions);
        }

        if let Err(err) = self.on_frame_tick(&mut transitions) {
            error!(frame = self.frame, error = %err, "solver contract violated");
            self.publish();
            return Err(err);
        }

        let event = self.filter.update(result);
        match &event {
            Some(StabilityEvent::Entered { face, is_new }) => {
                self.on_stable_entered(face, *is_new, &mut transitions)
            }
            Some(StabilityEvent::Exited) => self.on_stable_exited(&mut transitions),
            None => {}
        }

        self.publish();

        Ok(FrameOutput {
            timestamp: chrono::Utc::now(),
            frame: self.frame,
            previous_phase,
            phase: self.phase,
            transitions,
            event,
            reset_applied,
            current_move: self.current_move(),
        })
    }

    // =========================================================================
    // Frame-tick transitions
    // =========================================================================

    fn on_frame_tick(&mut self, transitions: &mut Vec<Transition>) -> Result<(), GuideError> {
        match self.phase {
            Phase::Waiting => {
                if self.readiness.get() >= self.config.required_prune_tables {
                    self.set_phase(Phase::Verified, ReasonCode::V003_TABLES_READY, transitions);
                }
            }

            Phase::GotIt => {
                self.got_it_count += 1;
                if self.got_it_count > self.config.got_it_dwell_frames {
                    self.got_it_count = 0;
                    self.set_phase(Phase::Rotate, ReasonCode::S005_DWELL_ELAPSED, transitions);
                }
            }

            Phase::Complete => match self.facelets() {
                Some(facelets) => {
                    let code = self.solver.verify(&facelets);
                    debug!(%facelets, code, "verification result");
                    if code == 0 {
                        self.set_phase(Phase::Waiting, ReasonCode::V001_CUBE_VERIFIED, transitions);
                    } else {
                        self.cube.fault = Some(SolverFault::from_verify(code));
                        self.set_phase(Phase::Incorrect, ReasonCode::V002_VERIFY_FAILED, transitions);
                    }
                }
                None => {
                    self.cube.fault = Some(SolverFault::from_verify(-1));
                    self.set_phase(Phase::Incorrect, ReasonCode::V002_VERIFY_FAILED, transitions);
                }
            },

            Phase::Verified => {
                let result = match self.facelets() {
                    Some(facelets) => self.solver.solve(
                        &facelets,
                        self.config.solver_max_depth,
                        self.config.solver_max_solutions,
                        false,
                    ),
                    None => "Error 1".to_string(),
                };
                debug!(%result, "solver result");
                match solver_error_code(&result) {
                    Some(code) => {
                        self.cube.fault = Some(SolverFault::from_solve(code));
                        self.cube.solution = Some(result);
                        self.set_phase(Phase::Incorrect, ReasonCode::V005_SOLVE_FAILED, transitions);
                    }
                    None => {
                        self.cube.solution = Some(result);
                        self.set_phase(Phase::Solved, ReasonCode::V004_SOLUTION_FOUND, transitions);
                    }
                }
            }

            Phase::Solved => {
                let solution = self.cube.solution.clone().unwrap_or_default();
                let moves = parse_solution(&solution).map_err(|MoveParseError(mnemonic)| {
                    GuideError::UnknownMoveMnemonic {
                        mnemonic,
                        solution: solution.clone(),
                    }
                })?;
                self.cube.moves = moves;
                self.cube.move_index = 0;
                self.set_phase(Phase::DoMove, ReasonCode::V006_MOVES_QUEUED, transitions);
                // Already solved: nothing to guide.
                if self.cube.moves.is_empty() {
                    self.set_phase(Phase::Done, ReasonCode::M003_ALL_MOVES_DONE, transitions);
                }
            }

            _ => {}
        }
        Ok(())
    }

    // =========================================================================
    // Stability-event transitions
    // =========================================================================

    fn on_stable_entered(&mut self, face: &RubikFace, is_new: bool, transitions: &mut Vec<Transition>) {
        if is_new {
            self.on_new_stable_face(face, transitions);
        }

        if self.phase == Phase::WaitingForMoveComplete {
            self.cube.move_index += 1;
            self.set_phase(Phase::DoMove, ReasonCode::M002_MOVE_COMPLETED, transitions);
            if self.cube.move_index >= self.cube.moves.len() {
                self.set_phase(Phase::Done, ReasonCode::M003_ALL_MOVES_DONE, transitions);
            }
        }
    }

    fn on_new_stable_face(&mut self, face: &RubikFace, transitions: &mut Vec<Transition>) {
        match self.phase {
            Phase::Start => {
                self.cube.record_face(face.clone());
                self.set_phase(Phase::GotIt, ReasonCode::S001_FACE_RECORDED, transitions);
            }

            Phase::Searching => {
                self.cube.record_face(face.clone());

                if !self.cube.has_full_face_set() {
                    self.allow_one_more_rotation = true;
                    self.set_phase(Phase::GotIt, ReasonCode::S001_FACE_RECORDED, transitions);
                } else if self.allow_one_more_rotation {
                    // Turn once more so the cube is back in its starting orientation.
                    self.allow_one_more_rotation = false;
                    self.set_phase(Phase::GotIt, ReasonCode::S002_BONUS_ROTATION, transitions);
                } else if self.cube.validate_tile_colors() {
                    self.set_phase(Phase::Complete, ReasonCode::S003_SCAN_COMPLETE, transitions);
                } else {
                    warn!(counts = ?self.cube.color_counts(), "tile color counts invalid");
                    self.set_phase(Phase::BadColors, ReasonCode::S004_BAD_COLORS, transitions);
                }
            }

            _ => {}
        }
    }

    fn on_stable_exited(&mut self, transitions: &mut Vec<Transition>) {
        match self.phase {
            Phase::Rotate => {
                self.set_phase(Phase::Searching, ReasonCode::S006_ROTATION_STARTED, transitions)
            }
            Phase::DoMove => self.set_phase(
                Phase::WaitingForMoveComplete,
                ReasonCode::M001_MOVE_STARTED,
                transitions,
            ),
            _ => {}
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn set_phase(&mut self, to: Phase, reason: ReasonCode, transitions: &mut Vec<Transition>) {
        let from = self.phase;
        debug!(frame = self.frame, %from, %to, reason = reason.code(), "phase transition");
        self.phase = to;
        transitions.push(Transition { from, to, reason });
    }

    fn apply_reset(&mut self, transitions: &mut Vec<Transition>) {
        self.cube.reset();
        self.got_it_count = 0;
        self.allow_one_more_rotation = false;
        self.filter.forget_last_accepted();
        self.set_phase(Phase::Start, ReasonCode::X001_RESET_APPLIED, transitions);
    }

    fn facelets(&self) -> Option<String> {
        let facelets = self.cube.to_facelet_string();
        if facelets.is_none() {
            warn!("no facelet string: face set incomplete or centers not distinct");
        }
        facelets
    }

    fn publish(&self) {
        self.publisher.send_replace(Arc::new(self.snapshot()));
    }

    /// Build a snapshot of the current state
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            frame: self.frame,
            phase: self.phase,
            stability: self.filter.status(),
            observed_faces: self.cube.observed_face_count(),
            faces: self.cube.faces().clone(),
            tile_colors_valid: self.cube.validate_tile_colors(),
            facelets: self.cube.to_facelet_string(),
            fault: self.cube.fault,
            solution: self.cube.solution.clone(),
            moves: self.cube.moves.clone(),
            move_index: self.cube.move_index,
            readiness: self.readiness.get(),
        }
    }

    /// Receive every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<SessionSnapshot>> {
        self.publisher.subscribe()
    }

    /// Request a reset at the next frame boundary
    pub fn request_reset(&self) {
        self.reset.request();
    }

    /// Handle for requesting resets from elsewhere
    pub fn reset_handle(&self) -> ResetHandle {
        self.reset.clone()
    }

    /// Handle for the solver table loader
    pub fn readiness(&self) -> ReadinessCounter {
        self.readiness.clone()
    }

    /// Get current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cube(&self) -> &CubeState {
        &self.cube
    }

    pub fn current_move(&self) -> Option<Move> {
        match self.phase {
            Phase::DoMove | Phase::WaitingForMoveComplete => self.cube.current_move(),
            _ => None,
        }
    }

    /// Count used to alternate the full-rotation prompt
    pub fn observed_face_count(&self) -> u32 {
        self.cube.observed_face_count()
    }

    /// Get frame count
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

// =============================================================================
// TESTS
// =============================================================================
