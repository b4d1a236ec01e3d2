//! Subtitle parsing module
//!
//! Supports multiple subtitle formats:
//! - SRT: SubRip numbered blocks `HH:MM:SS,mmm --> HH:MM:SS,mmm`
//! - VTT: WebVTT cues `HH:MM:SS.mmm --> HH:MM:SS.mmm`
//! - JSON: `{"subtitles":[{"startTime","endTime","text"}]}`
//! - Compact: timing line plus a single text line (explicit only)
//!
//! Parsing never re-sorts cues. Lines that do not look like cues are skipped,
//! but a malformed timestamp or JSON structure fails the whole parse.

mod json;
mod srt;
mod timestamp;
mod types;
mod vtt;

pub use timestamp::{CUE_ARROW, parse_timestamp};
pub use types::*;

use std::path::Path;

/// Detect subtitle format from content
pub fn detect_format(content: &str) -> SubtitleFormat {
    if content.contains("WEBVTT") {
        SubtitleFormat::Vtt
    } else if content.contains(CUE_ARROW) {
        SubtitleFormat::Srt
    } else {
        SubtitleFormat::Json
    }
}

/// Parse subtitles from string content
pub fn parse_subtitles(content: &str) -> Result<LyricTrack, ParseError> {
    parse_with_format(content, detect_format(content))
}

/// Parse subtitles with specified format
pub fn parse_with_format(content: &str, format: SubtitleFormat) -> Result<LyricTrack, ParseError> {
    if content.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    tracing::debug!("Parsing subtitles as {}", format);

    let lines = match format {
        SubtitleFormat::Srt => srt::parse_srt(content),
        SubtitleFormat::Vtt => vtt::parse_vtt(content),
        SubtitleFormat::Json => json::parse_json(content),
        SubtitleFormat::Compact => vtt::parse_compact(content),
    }?;

    let track = LyricTrack::new(discard_inverted(lines));
    tracing::info!("Loaded {} subtitle entries", track.len());
    Ok(track)
}

/// Parse subtitles from file
pub fn parse_subtitle_file(
    path: &Path,
    format: Option<SubtitleFormat>,
) -> Result<LyricTrack, ParseError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ParseError::Io(format!("{}: {}", path.display(), e)))?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(content.as_str());

    match format {
        Some(format) => parse_with_format(content, format),
        None => parse_subtitles(content),
    }
}

/// Drop cues ending before they start
fn discard_inverted(lines: Vec<LyricLine>) -> Vec<LyricLine> {
    lines
        .into_iter()
        .filter(|line| {
            let keep = line.start.total_seconds() <= line.end.total_seconds();
            if !keep {
                tracing::warn!(
                    "Skipping cue ending before it starts: {} --> {} {:?}",
                    line.start,
                    line.end,
                    line.text
                );
            }
            keep
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SRT: &str = "1\n00:00:01,000 --> 00:00:03,000\nLa la la\n\n\
                       2\n00:00:03,500 --> 00:00:06,000\nSecond line\n";
    const VTT: &str = "WEBVTT\n\n00:00:01.000 --> 00:00:03.000\nLa la la\n\n\
                       00:00:03.500 --> 00:00:06.000\nSecond line\n";

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(VTT), SubtitleFormat::Vtt);
        assert_eq!(detect_format(SRT), SubtitleFormat::Srt);
        assert_eq!(detect_format(r#"{"subtitles":[]}"#), SubtitleFormat::Json);
    }

    #[test]
    fn test_srt_and_vtt_agree() {
        assert_eq!(parse_subtitles(SRT).unwrap(), parse_subtitles(VTT).unwrap());
    }

    #[test]
    fn test_ordering_and_bounds() {
        let track = parse_subtitles(SRT).unwrap();
        assert_eq!(track.len(), 2);
        for line in track.iter() {
            assert!(line.start.total_seconds() <= line.end.total_seconds());
        }
        assert!(track[0].start.total_seconds() <= track[1].start.total_seconds());
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(parse_subtitles(VTT).unwrap(), parse_subtitles(VTT).unwrap());
    }

    #[test]
    fn test_forced_vtt_on_arrow_only_text() {
        let content = "00:00\n1\n\n00:00.000 --> 00:02.000\nHello world\n";
        assert_eq!(detect_format(content), SubtitleFormat::Srt);

        let track = parse_with_format(content, SubtitleFormat::Vtt).unwrap();
        assert_eq!(track.len(), 1);
        assert_relative_eq!(track[0].start.total_seconds(), 0.0);
        assert_relative_eq!(track[0].end.total_seconds(), 2.0);
        assert_eq!(track[0].text, "Hello world");
    }

    #[test]
    fn test_json_matches_text_formats() {
        let json = parse_subtitles(r#"{"subtitles":[{"startTime":1,"endTime":3,"text":"La la la"}]}"#)
            .unwrap();
        let srt = parse_subtitles("1\n00:00:01,000 --> 00:00:03,000\nLa la la\n").unwrap();
        assert_eq!(json.len(), 1);
        assert_eq!(json[0].text, srt[0].text);
        assert_eq!(json[0].start.total_seconds(), srt[0].start.total_seconds());
        assert_eq!(json[0].end.total_seconds(), srt[0].end.total_seconds());
    }

    #[test]
    fn test_inverted_cue_is_dropped() {
        let content = "WEBVTT\n\n00:05.000 --> 00:01.000\nBackwards\n\n00:06.000 --> 00:07.000\nFine\n";
        let track = parse_subtitles(content).unwrap();
        assert_eq!(track.len(), 1);
        assert_eq!(track[0].text, "Fine");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_subtitles("  \n "), Err(ParseError::EmptyInput));
    }

    #[test]
    fn test_parse_file_strips_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.vtt");
        std::fs::write(&path, format!("\u{feff}{}", VTT)).unwrap();

        let track = parse_subtitle_file(&path, None).unwrap();
        assert_eq!(track.len(), 2);

        let missing = parse_subtitle_file(&dir.path().join("missing.srt"), None);
        assert!(matches!(missing, Err(ParseError::Io(_))));
    }
}
