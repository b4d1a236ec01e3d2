//! Subtitle data types
//!
//! Times are kept as seconds (`f64`) because the playback clock reports
//! seconds and the sync engine compares against it every tick.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Subtitle format enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubtitleFormat {
    /// SubRip: numbered blocks separated by blank lines
    Srt,
    /// WebVTT: `WEBVTT` header followed by cues
    Vtt,
    /// `{"subtitles":[{"startTime","endTime","text"}]}`
    Json,
    /// Timing line followed by exactly one text line, never auto-detected
    Compact,
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubtitleFormat::Srt => write!(f, "SRT"),
            SubtitleFormat::Vtt => write!(f, "WebVTT"),
            SubtitleFormat::Json => write!(f, "JSON"),
            SubtitleFormat::Compact => write!(f, "compact"),
        }
    }
}

/// A point in time within the track
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Timestamp {
    pub hours: u32,
    pub minutes: u32,
    /// Seconds including the fractional part
    pub seconds: f64,
}

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp {
        hours: 0,
        minutes: 0,
        seconds: 0.0,
    };

    pub fn new(hours: u32, minutes: u32, seconds: f64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Timestamp holding everything in the seconds field
    pub fn from_seconds(seconds: f64) -> Self {
        Self {
            hours: 0,
            minutes: 0,
            seconds,
        }
    }

    /// Always `hours * 3600 + minutes * 60 + seconds`
    pub fn total_seconds(&self) -> f64 {
        f64::from(self.hours) * 3600.0 + f64::from(self.minutes) * 60.0 + self.seconds
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_ms = (self.total_seconds() * 1000.0).round() as u64;
        let ms = total_ms % 1000;
        let sec = (total_ms / 1000) % 60;
        let min = (total_ms / 60_000) % 60;
        let hour = total_ms / 3_600_000;
        write!(f, "{:02}:{:02}:{:02}.{:03}", hour, min, sec, ms)
    }
}

/// One subtitle cue
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LyricLine {
    pub start: Timestamp,
    pub end: Timestamp,
    pub text: String,
}

impl LyricLine {
    pub fn new(start: Timestamp, end: Timestamp, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Cue length in seconds, zero for degenerate cues
    pub fn duration(&self) -> f64 {
        (self.end.total_seconds() - self.start.total_seconds()).max(0.0)
    }

    /// Number of characters (not bytes) in the text
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Immutable sequence of cues in parse order
///
/// Cheap to clone: the lines live behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LyricTrack {
    lines: Arc<[LyricLine]>,
}

impl LyricTrack {
    pub fn new(lines: Vec<LyricLine>) -> Self {
        Self {
            lines: lines.into(),
        }
    }

    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }
}

impl Deref for LyricTrack {
    type Target = [LyricLine];

    fn deref(&self) -> &Self::Target {
        &self.lines
    }
}

impl From<Vec<LyricLine>> for LyricTrack {
    fn from(lines: Vec<LyricLine>) -> Self {
        Self::new(lines)
    }
}

impl FromIterator<LyricLine> for LyricTrack {
    fn from_iter<I: IntoIterator<Item = LyricLine>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Errors that fail a whole parse
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Input was empty or whitespace only
    EmptyInput,
    /// A timestamp field is not a non-negative number
    InvalidTimestamp { field: String, reason: String },
    /// JSON input did not match the expected schema
    Json(String),
    /// File could not be read
    Io(String),
}

impl ParseError {
    pub(crate) fn timestamp(field: &str, reason: impl Into<String>) -> Self {
        ParseError::InvalidTimestamp {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyInput => write!(f, "Subtitle input is empty"),
            ParseError::InvalidTimestamp { field, reason } => {
                write!(f, "Invalid timestamp {:?}: {}", field, reason)
            }
            ParseError::Json(e) => write!(f, "JSON error: {}", e),
            ParseError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ParseError {}
