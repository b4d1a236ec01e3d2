//! WebVTT parser
//!
//! Supports the cue subset used for karaoke:
//! ```text
//! WEBVTT
//!
//! 00:00.000 --> 00:02.000
//! Hello world
//! ```
//!
//! Header, NOTE blocks and cue identifiers carry no cue arrow and are skipped.
//! Also hosts the legacy compact form: one timing line immediately followed by
//! exactly one text line.

use super::timestamp::{CUE_ARROW, parse_timing_line};
use super::types::{LyricLine, ParseError, Timestamp};

/// Parse WebVTT content into lyric lines
pub fn parse_vtt(src: &str) -> Result<Vec<LyricLine>, ParseError> {
    let lines: Vec<&str> = src.lines().collect();
    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(timing) = parse_timing_line(lines[i]) else {
            i += 1;
            continue;
        };
        let (start, end) = timing?;
        i += 1;

        // Cue text runs until a blank line or the next timing line
        let mut text = Vec::new();
        while i < lines.len() && !lines[i].trim().is_empty() && !lines[i].contains(CUE_ARROW) {
            text.push(lines[i].trim());
            i += 1;
        }

        result.push(LyricLine::new(start, end, text.join(" ").trim()));
    }

    Ok(result)
}

/// Parse the compact two-line form
///
/// The line right after a timing line is always the cue text, whatever it
/// contains. A trailing timing line with nothing after it yields an empty cue.
pub fn parse_compact(src: &str) -> Result<Vec<LyricLine>, ParseError> {
    let mut result = Vec::new();
    let mut pending: Option<(Timestamp, Timestamp)> = None;

    for line in src.lines() {
        if let Some((start, end)) = pending.take() {
            result.push(LyricLine::new(start, end, line.trim()));
            continue;
        }

        if let Some(timing) = parse_timing_line(line) {
            pending = Some(timing?);
        }
    }

    if let Some((start, end)) = pending {
        result.push(LyricLine::new(start, end, ""));
    }

    Ok(result)
}
