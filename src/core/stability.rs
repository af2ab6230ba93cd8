//! Stability filter: hysteresis over per-frame face recognition
//!
//! State transitions (threshold t):
//! - UNRECOGNIZED → PENDING: face recognized (match count includes this frame)
//! - PENDING → STABLE: same face seen more than t frames in a row (emit Entered)
//! - PENDING → UNRECOGNIZED: different face or nothing
//! - STABLE → DEGRADING(0): different face or nothing
//! - DEGRADING → STABLE: accepted face seen again
//! - DEGRADING(c) → UNRECOGNIZED once c > t on a further miss (emit Exited),
//!   otherwise DEGRADING(c + 1). With t = 1 the fourth miss in a row exits.

use tracing::debug;

use crate::types::{FaceRecognitionResult, Fingerprint, RubikFace, StabilityEvent, StabilityStatus};
use crate::MATCH_THRESHOLD;

#[derive(Debug, Clone)]
enum FilterState {
    Unrecognized,
    Pending { candidate: RubikFace, matches: u32 },
    Stable { accepted: RubikFace },
    Degrading { accepted: RubikFace, misses: u32 },
}

/// Turns noisy recognitions into stable-face onset/offset events
#[derive(Debug)]
pub struct StabilityFilter {
    /// Current state
    state: FilterState,
    /// Consecutive matches/misses that must be exceeded
    threshold: u32,
    /// Last face that became stable, kept across exits
    last_accepted: Option<Fingerprint>,
}

impl Default for StabilityFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl StabilityFilter {
    /// Create filter with the default threshold
    pub fn new() -> Self {
        Self::with_threshold(MATCH_THRESHOLD)
    }

    pub fn with_threshold(threshold: u32) -> Self {
        Self {
            state: FilterState::Unrecognized,
            threshold,
            last_accepted: None,
        }
    }

    /// Feed one frame's recognition result; returns at most one event
    pub fn update(&mut self, result: &FaceRecognitionResult) -> Option<StabilityEvent> {
        let seen = match result {
            FaceRecognitionResult::Solved(face) => Some(face),
            FaceRecognitionResult::Invalid => None,
        };

        let state = std::mem::replace(&mut self.state, FilterState::Unrecognized);
        let (next, event) = match state {
            FilterState::Unrecognized => match seen {
                Some(face) => (
                    FilterState::Pending {
                        candidate: face.clone(),
                        matches: 1,
                    },
                    None,
                ),
                None => (FilterState::Unrecognized, None),
            },

            FilterState::Pending { candidate, matches } => match seen {
                Some(face) if face.fingerprint() == candidate.fingerprint() => {
                    let matches = matches + 1;
                    if matches > self.threshold {
                        let event = self.accept(&candidate);
                        (FilterState::Stable { accepted: candidate }, Some(event))
                    } else {
                        (FilterState::Pending { candidate, matches }, None)
                    }
                }
                // No partial-match credit: any other face restarts recognition.
                _ => (FilterState::Unrecognized, None),
            },

            FilterState::Stable { accepted } => match seen {
                Some(face) if face.fingerprint() == accepted.fingerprint() => {
                    (FilterState::Stable { accepted }, None)
                }
                _ => (FilterState::Degrading { accepted, misses: 0 }, None),
            },

            FilterState::Degrading { accepted, misses } => match seen {
                Some(face) if face.fingerprint() == accepted.fingerprint() => {
                    (FilterState::Stable { accepted }, None)
                }
                _ if misses > self.threshold => {
                    debug!(previous = %accepted.fingerprint(), "stable face lost");
                    (FilterState::Unrecognized, Some(StabilityEvent::Exited))
                }
                _ => (
                    FilterState::Degrading {
                        accepted,
                        misses: misses + 1,
                    },
                    None,
                ),
            },
        };

        self.state = next;
        event
    }

    fn accept(&mut self, face: &RubikFace) -> StabilityEvent {
        let fingerprint = face.fingerprint();
        let is_new = self.last_accepted != Some(fingerprint);
        debug!(
            last = ?self.last_accepted.map(|f| f.to_string()),
            new = %fingerprint,
            is_new,
            "stable face recognized"
        );
        self.last_accepted = Some(fingerprint);
        StabilityEvent::Entered {
            face: face.clone(),
            is_new,
        }
    }

    /// Get current state
    pub fn status(&self) -> StabilityStatus {
        match self.state {
            FilterState::Unrecognized => StabilityStatus::Unrecognized,
            FilterState::Pending { .. } => StabilityStatus::Pending,
            FilterState::Stable { .. } => StabilityStatus::Stable,
            FilterState::Degrading { .. } => StabilityStatus::Degrading,
        }
    }

    /// Face being tracked: the pending candidate or the accepted face
    pub fn candidate(&self) -> Option<Fingerprint> {
        match &self.state {
            FilterState::Unrecognized => None,
            FilterState::Pending { candidate, .. } => Some(candidate.fingerprint()),
            FilterState::Stable { accepted } | FilterState::Degrading { accepted, .. } => {
                Some(accepted.fingerprint())
            }
        }
    }

    /// Consecutive matches (PENDING) or misses after the first (DEGRADING)
    pub fn counter(&self) -> u32 {
        match self.state {
            FilterState::Pending { matches, .. } => matches,
            FilterState::Degrading { misses, .. } => misses,
            _ => 0,
        }
    }

    /// Treat the next accepted face as new, whatever it is
    pub fn forget_last_accepted(&mut self) {
        self.last_accepted = None;
    }
}

// =============================================================================
// TESTS
// =============================================================================
