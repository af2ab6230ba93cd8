//! Move mnemonics shared with the renderer
//!
//! Grammar: one face letter `U D L R F B`, then nothing (clockwise quarter
//! turn), `'` (counter-clockwise quarter turn) or `2` (half turn).

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::{FaceName, MoveParseError};

lazy_static! {
    static ref RE_MOVE: Regex = Regex::new(r"^([UDLRFB])(['2]?)$").unwrap();
}

/// How far and which way a face turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Turn {
    Clockwise,
    CounterClockwise,
    Half,
}

/// One face turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub face: FaceName,
    pub turn: Turn,
}

impl Move {
    pub fn new(face: FaceName, turn: Turn) -> Self {
        Self { face, turn }
    }

    /// Mnemonic form, e.g. `F2`
    pub fn mnemonic(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = RE_MOVE
            .captures(s)
            .ok_or_else(|| MoveParseError(s.to_string()))?;
        let face = caps[1]
            .chars()
            .next()
            .and_then(FaceName::from_letter)
            .ok_or_else(|| MoveParseError(s.to_string()))?;
        let turn = match &caps[2] {
            "'" => Turn::CounterClockwise,
            "2" => Turn::Half,
            _ => Turn::Clockwise,
        };
        Ok(Move { face, turn })
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let suffix = match self.turn {
            Turn::Clockwise => "",
            Turn::CounterClockwise => "'",
            Turn::Half => "2",
        };
        write!(f, "{}{}", self.face.letter(), suffix)
    }
}

/// Split a space-separated solution into moves.
///
/// Empty tokens (double spaces, trailing space) are skipped.
pub fn parse_solution(solution: &str) -> Result<Vec<Move>, MoveParseError> {
    solution.split_whitespace().map(Move::from_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_letter_is_clockwise_quarter() {
        let m: Move = "U".parse().unwrap();
        assert_eq!(m, Move::new(FaceName::Up, Turn::Clockwise));
    }

    #[test]
    fn test_suffixes() {
        assert_eq!("D'".parse::<Move>().unwrap().turn, Turn::CounterClockwise);
        assert_eq!("F2".parse::<Move>().unwrap().turn, Turn::Half);
    }

    #[test]
    fn test_rejects_unknown_face_and_suffix() {
        assert_eq!("X".parse::<Move>(), Err(MoveParseError("X".to_string())));
        assert!("U3".parse::<Move>().is_err());
        assert!("u".parse::<Move>().is_err());
        assert!("".parse::<Move>().is_err());
        assert!("R2'".parse::<Move>().is_err());
    }

    #[test]
    fn test_parse_solution_order() {
        let moves = parse_solution("U R F2 D'").unwrap();
        let text: Vec<String> = moves.iter().map(Move::mnemonic).collect();
        assert_eq!(text, vec!["U", "R", "F2", "D'"]);
    }

    #[test]
    fn test_parse_solution_tolerates_trailing_space() {
        assert_eq!(parse_solution("L B' ").unwrap().len(), 2);
    }

    #[test]
    fn test_parse_solution_reports_offender() {
        assert_eq!(parse_solution("U X R"), Err(MoveParseError("X".to_string())));
    }
}
