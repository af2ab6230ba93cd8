//! Per-frame output returned to the host

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::types::{Move, Phase, ReasonCode, RubikFace};

/// Edge emitted by the stability filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StabilityEvent {
    /// A face became stable. `is_new` is false when it matches the last
    /// accepted face.
    Entered { face: RubikFace, is_new: bool },
    /// The stable face was lost
    Exited,
}

/// One phase change and its cause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    pub reason: ReasonCode,
}

/// Output for each processed frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameOutput {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Frame sequence number, starting at 1
    pub frame: u64,
    /// Phase when the frame started, before any reset
    pub previous_phase: Phase,
    /// Phase after the frame
    pub phase: Phase,
    /// Transitions in the order applied
    pub transitions: Vec<Transition>,
    /// Stability edge, if any
    pub event: Option<StabilityEvent>,
    /// A deferred reset was applied before this frame
    pub reset_applied: bool,
    /// Move the user should perform now
    pub current_move: Option<Move>,
}

impl FrameOutput {
    /// A face not seen just before was accepted (one-shot feedback)
    pub fn new_face_accepted(&self) -> bool {
        matches!(self.event, Some(StabilityEvent::Entered { is_new: true, .. }))
    }

    /// The stable face was lost (one-shot feedback)
    pub fn face_lost(&self) -> bool {
        matches!(self.event, Some(StabilityEvent::Exited))
    }

    pub fn phase_changed(&self) -> bool {
        self.previous_phase != self.phase
    }

    /// Last transition's reason
    pub fn reason(&self) -> Option<ReasonCode> {
        self.transitions.last().map(|t| t.reason)
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let line = format!(
            "{} #{} | phase={} | {}{}",
            self.phase.emoji(),
            self.frame,
            self.phase,
            self.describe_event(),
            self.describe_reason(),
        );
        line.color(self.phase.color()).to_string()
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "frame={} | phase={} | event={} | move={} | reason={}",
            self.frame,
            self.phase,
            self.describe_event(),
            self.current_move
                .map(|m| m.mnemonic())
                .unwrap_or_else(|| "-".to_string()),
            self.reason().map(|r| r.code()).unwrap_or("-"),
        )
    }

    fn describe_event(&self) -> String {
        match &self.event {
            Some(StabilityEvent::Entered { face, is_new: true }) => {
                format!("+face {}", face.fingerprint())
            }
            Some(StabilityEvent::Entered { face, is_new: false }) => {
                format!("=face {}", face.fingerprint())
            }
            Some(StabilityEvent::Exited) => "-face".to_string(),
            None => "-".to_string(),
        }
    }

    fn describe_reason(&self) -> String {
        match self.reason() {
            Some(reason) => format!(" | {}", reason.description()),
            None => String::new(),
        }
    }
}
