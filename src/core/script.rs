//! Frame scripts: recorded or typed recognizer output
//!
//! One command per line:
//! - `solved WWWWWWWWW`: face recognized, nine tile codes row-major
//! - `invalid`: nothing recognized
//! - `reset`: request a reset
//! - `ready 12`: set the solver readiness counter
//! - a JSON `FaceRecognitionResult`, e.g. `{"status":"INVALID"}`
//! - blank lines and `#` comments are skipped

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{FaceRecognitionResult, RubikFace, ScriptError};

lazy_static! {
    static ref RE_COMMAND: Regex = Regex::new(r"^(?i)(solved|invalid|reset|ready)(?:\s+(\S+))?$").unwrap();
}

/// One parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameCommand {
    /// Feed a frame
    Frame(FaceRecognitionResult),
    /// Request a deferred reset
    Reset,
    /// Set the readiness counter
    Ready(usize),
}

impl FrameCommand {
    /// Parse one line; `Ok(None)` for blanks and comments
    pub fn parse(line_no: usize, line: &str) -> Result<Option<Self>, ScriptError> {
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            return Ok(None);
        }

        if text.starts_with('{') {
            return serde_json::from_str::<FaceRecognitionResult>(text)
                .map(|r| Some(FrameCommand::Frame(r)))
                .map_err(|e| ScriptError::BadJson {
                    line: line_no,
                    reason: e.to_string(),
                });
        }

        let caps = RE_COMMAND.captures(text).ok_or_else(|| ScriptError::UnknownCommand {
            line: line_no,
            text: text.to_string(),
        })?;
        let arg = caps.get(2).map(|m| m.as_str());

        match (caps[1].to_ascii_lowercase().as_str(), arg) {
            ("solved", Some(codes)) => RubikFace::from_codes(codes)
                .map(|face| Some(FrameCommand::Frame(FaceRecognitionResult::Solved(face))))
                .ok_or_else(|| ScriptError::BadTiles {
                    line: line_no,
                    text: codes.to_string(),
                }),
            ("solved", None) => Err(ScriptError::BadTiles {
                line: line_no,
                text: String::new(),
            }),
            ("invalid", None) => Ok(Some(FrameCommand::Frame(FaceRecognitionResult::Invalid))),
            ("reset", None) => Ok(Some(FrameCommand::Reset)),
            ("ready", Some(count)) => count
                .parse()
                .map(|n| Some(FrameCommand::Ready(n)))
                .map_err(|_| ScriptError::BadCount {
                    line: line_no,
                    text: count.to_string(),
                }),
            ("ready", None) => Err(ScriptError::BadCount {
                line: line_no,
                text: String::new(),
            }),
            _ => Err(ScriptError::UnknownCommand {
                line: line_no,
                text: text.to_string(),
            }),
        }
    }
}

/// Parse a whole script, numbering lines from 1
pub fn parse_script(script: &str) -> Result<Vec<FrameCommand>, ScriptError> {
    let mut commands = Vec::new();
    for (i, line) in script.lines().enumerate() {
        if let Some(cmd) = FrameCommand::parse(i + 1, line)? {
            commands.push(cmd);
        }
    }
    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileColor;

    #[test]
    fn test_compact_commands() {
        assert_eq!(
            FrameCommand::parse(1, "solved WWWWWWWWW").unwrap(),
            Some(FrameCommand::Frame(FaceRecognitionResult::Solved(RubikFace::uniform(
                TileColor::White
            ))))
        );
        assert_eq!(
            FrameCommand::parse(1, "INVALID").unwrap(),
            Some(FrameCommand::Frame(FaceRecognitionResult::Invalid))
        );
        assert_eq!(FrameCommand::parse(1, "reset").unwrap(), Some(FrameCommand::Reset));
        assert_eq!(FrameCommand::parse(1, "ready 12").unwrap(), Some(FrameCommand::Ready(12)));
    }

    #[test]
    fn test_blank_and_comment_skipped() {
        assert_eq!(FrameCommand::parse(1, "   ").unwrap(), None);
        assert_eq!(FrameCommand::parse(1, "# up face").unwrap(), None);
    }

    #[test]
    fn test_json_frame() {
        let cmd = FrameCommand::parse(3, r#"{"status":"INVALID"}"#).unwrap();
        assert_eq!(cmd, Some(FrameCommand::Frame(FaceRecognitionResult::Invalid)));
    }

    #[test]
    fn test_errors_carry_line() {
        assert_eq!(
            FrameCommand::parse(4, "solved WWW"),
            Err(ScriptError::BadTiles { line: 4, text: "WWW".to_string() })
        );
        assert!(matches!(
            FrameCommand::parse(5, "jump"),
            Err(ScriptError::UnknownCommand { line: 5, .. })
        ));
        assert!(matches!(
            FrameCommand::parse(6, "ready lots"),
            Err(ScriptError::BadCount { line: 6, .. })
        ));
        assert!(matches!(
            FrameCommand::parse(7, "{not json"),
            Err(ScriptError::BadJson { line: 7, .. })
        ));
        assert!(matches!(
            FrameCommand::parse(8, "invalid extra"),
            Err(ScriptError::UnknownCommand { line: 8, .. })
        ));
    }

    #[test]
    fn test_parse_script_skips_noise() {
        let script = "# scan\nsolved WWWWWWWWW\n\ninvalid\nready 3\n";
        assert_eq!(parse_script(script).unwrap().len(), 3);
    }
}
