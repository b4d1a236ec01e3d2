//! Timestamp field parsing shared by the text formats
//!
//! Accepted forms: `SS[.ms]`, `MM:SS[.ms]`, `HH:MM:SS[.ms]`.
//! A comma decimal separator (SRT) is normalised to a period.

use super::types::{ParseError, Timestamp};

/// Cue arrow separating start and end on a timing line
pub const CUE_ARROW: &str = "-->";

/// Parse a single timestamp field
pub fn parse_timestamp(src: &str) -> Result<Timestamp, ParseError> {
    let field = src.trim();
    if field.is_empty() {
        return Err(ParseError::timestamp(src, "empty field"));
    }

    let normalized = field.replace(',', ".");
    let parts: Vec<&str> = normalized.split(':').collect();

    match parts.as_slice() {
        [sec] => Ok(Timestamp::new(0, 0, parse_seconds(field, sec)?)),
        [min, sec] => Ok(Timestamp::new(
            0,
            parse_whole(field, min)?,
            parse_seconds(field, sec)?,
        )),
        [hour, min, sec] => Ok(Timestamp::new(
            parse_whole(field, hour)?,
            parse_whole(field, min)?,
            parse_seconds(field, sec)?,
        )),
        _ => Err(ParseError::timestamp(
            field,
            format!("expected 1 to 3 ':' separated segments, found {}", parts.len()),
        )),
    }
}

/// Parse `start --> end[ settings]`
///
/// Returns `None` when the line has no cue arrow. Anything after the end
/// timestamp (VTT cue settings, SRT coordinates) is ignored.
pub fn parse_timing_line(line: &str) -> Option<Result<(Timestamp, Timestamp), ParseError>> {
    let (start, rest) = line.split_once(CUE_ARROW)?;
    let end = rest.split_whitespace().next().unwrap_or("");

    Some(parse_timestamp(start).and_then(|start| Ok((start, parse_timestamp(end)?))))
}

fn parse_whole(field: &str, segment: &str) -> Result<u32, ParseError> {
    segment
        .parse::<u32>()
        .map_err(|e| ParseError::timestamp(field, format!("{:?}: {}", segment, e)))
}

fn parse_seconds(field: &str, segment: &str) -> Result<f64, ParseError> {
    let seconds = segment
        .parse::<f64>()
        .map_err(|e| ParseError::timestamp(field, format!("{:?}: {}", segment, e)))?;

    if !seconds.is_finite() || seconds < 0.0 || segment.starts_with('-') {
        return Err(ParseError::timestamp(
            field,
            "seconds must be a finite non-negative number",
        ));
    }

    Ok(seconds)
}
