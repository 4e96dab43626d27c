use std::{error::Error, fmt};

use maze_chase_core::Heading;
use maze_chase_rendering::FrameInput;

/// Delimiter separating the segments of a script.
const SEGMENT_DELIMITER: char = ',';
/// Separates a key from its repeat count.
const REPEAT_DELIMITER: char = '*';

/// Scripted keyboard input replayed one segment after another.
///
/// A script such as `D*120,W*30,_*10,R` holds `D` for 120 frames, then `W` for
/// 30 frames, releases every key for 10 frames and finally requests a restart.
/// `W`, `A`, `S` and `D` steer north, west, south and east. Frames past the end
/// of the script carry no input.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct InputScript {
    segments: Vec<Segment>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Segment {
    key: Key,
    frames: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Key {
    Steer(Heading),
    Idle,
    Reset,
}

impl InputScript {
    /// Parses a comma separated script.
    pub(crate) fn parse(value: &str) -> Result<Self, InputScriptError> {
        let mut segments = Vec::new();
        for token in value.split(SEGMENT_DELIMITER).map(str::trim) {
            if token.is_empty() {
                continue;
            }
            segments.push(parse_segment(token)?);
        }
        Ok(Self { segments })
    }

    /// Total number of frames covered by the script.
    pub(crate) fn frame_count(&self) -> u64 {
        self.segments
            .iter()
            .fold(0_u64, |total, segment| total.saturating_add(segment.frames))
    }

    /// Input sampled on the zero-based `frame`.
    pub(crate) fn input_for(&self, frame: u64) -> FrameInput {
        let mut start = 0_u64;
        for segment in &self.segments {
            let end = start.saturating_add(segment.frames);
            if frame < end {
                return match segment.key {
                    Key::Steer(heading) => FrameInput {
                        heading: Some(heading),
                        reset: false,
                    },
                    Key::Idle => FrameInput::default(),
                    Key::Reset => FrameInput {
                        heading: None,
                        reset: frame == start,
                    },
                };
            }
            start = end;
        }
        FrameInput::default()
    }
}

fn parse_segment(token: &str) -> Result<Segment, InputScriptError> {
    let (key, frames) = match token.split_once(REPEAT_DELIMITER) {
        Some((key, count)) => {
            let frames = count
                .trim()
                .parse::<u64>()
                .map_err(|_| InputScriptError::InvalidCount(token.to_owned()))?;
            (key.trim(), frames)
        }
        None => (token, 1),
    };

    let key = match key {
        "W" | "w" => Key::Steer(Heading::NORTH),
        "A" | "a" => Key::Steer(Heading::WEST),
        "S" | "s" => Key::Steer(Heading::SOUTH),
        "D" | "d" => Key::Steer(Heading::EAST),
        "_" => Key::Idle,
        "R" | "r" => Key::Reset,
        other => return Err(InputScriptError::UnknownKey(other.to_owned())),
    };

    Ok(Segment { key, frames })
}

/// Errors that can occur while parsing an input script.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum InputScriptError {
    /// The segment named a key outside `W`, `A`, `S`, `D`, `_` and `R`.
    UnknownKey(String),
    /// The repeat count was not a non-negative integer.
    InvalidCount(String),
}

impl fmt::Display for InputScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKey(key) => write!(f, "input key '{key}' is not supported"),
            Self::InvalidCount(segment) => {
                write!(f, "could not parse repeat count in segment '{segment}'")
            }
        }
    }
}

impl Error for InputScriptError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_play_back_in_order() {
        let script = InputScript::parse("D*3, W*2,_").expect("script parses");

        assert_eq!(script.frame_count(), 6);
        assert_eq!(script.input_for(0).heading, Some(Heading::EAST));
        assert_eq!(script.input_for(2).heading, Some(Heading::EAST));
        assert_eq!(script.input_for(3).heading, Some(Heading::NORTH));
        assert_eq!(script.input_for(5), FrameInput::default());
        assert_eq!(script.input_for(99), FrameInput::default());
    }

    #[test]
    fn reset_fires_once_per_segment() {
        let script = InputScript::parse("a,R*3").expect("script parses");

        assert_eq!(script.input_for(0).heading, Some(Heading::WEST));
        assert!(script.input_for(1).reset);
        assert!(!script.input_for(2).reset);
        assert!(!script.input_for(3).reset);
    }

    #[test]
    fn empty_script_has_no_frames() {
        let script = InputScript::parse("").expect("empty script parses");

        assert_eq!(script.frame_count(), 0);
        assert_eq!(script.input_for(0), FrameInput::default());
    }

    #[test]
    fn rejects_unknown_keys_and_bad_counts() {
        assert_eq!(
            InputScript::parse("D*4,Q"),
            Err(InputScriptError::UnknownKey("Q".to_owned()))
        );
        assert_eq!(
            InputScript::parse("S*x"),
            Err(InputScriptError::InvalidCount("S*x".to_owned()))
        );
    }
}
