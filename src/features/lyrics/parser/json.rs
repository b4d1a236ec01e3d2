//! JSON subtitle parser
//!
//! Schema: `{"subtitles":[{"startTime":number,"endTime":number,"text":string}]}`
//! with times in seconds. Every field is required.

use serde::Deserialize;

use super::types::{LyricLine, ParseError, Timestamp};

#[derive(Debug, Deserialize)]
struct SubtitleList {
    subtitles: Vec<SubtitleEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubtitleEntry {
    start_time: f64,
    end_time: f64,
    text: String,
}

fn to_timestamp(value: f64) -> Result<Timestamp, ParseError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ParseError::timestamp(
            &value.to_string(),
            "seconds must be a finite non-negative number",
        ));
    }
    Ok(Timestamp::from_seconds(value))
}

/// Parse JSON content into lyric lines
pub fn parse_json(src: &str) -> Result<Vec<LyricLine>, ParseError> {
    let list: SubtitleList =
        serde_json::from_str(src).map_err(|e| ParseError::Json(e.to_string()))?;

    list.subtitles
        .into_iter()
        .map(|entry| {
            Ok(LyricLine::new(
                to_timestamp(entry.start_time)?,
                to_timestamp(entry.end_time)?,
                entry.text,
            ))
        })
        .collect()
}
