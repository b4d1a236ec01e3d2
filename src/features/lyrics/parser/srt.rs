//! SubRip (SRT) parser
//!
//! ```text
//! 1
//! 00:00:01,000 --> 00:00:03,000
//! La la la
//! ```
//!
//! Blocks are separated by blank lines. A block needs at least three lines:
//! sequence index (ignored), timing line, then one or more text lines.

use super::timestamp::parse_timing_line;
use super::types::{LyricLine, ParseError};

/// Split content into blocks of non-blank lines
fn split_blocks(src: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in src.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Parse one block, `Ok(None)` when it is not shaped like a cue
fn parse_block(block: &[&str]) -> Result<Option<LyricLine>, ParseError> {
    if block.len() < 3 {
        return Ok(None);
    }

    let Some(timing) = parse_timing_line(block[1]) else {
        return Ok(None);
    };
    let (start, end) = timing?;

    let text = block[2..]
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(Some(LyricLine::new(start, end, text.trim())))
}

/// Parse SRT content into lyric lines
pub fn parse_srt(src: &str) -> Result<Vec<LyricLine>, ParseError> {
    let blocks = split_blocks(src);
    let mut result = Vec::with_capacity(blocks.len());

    for block in &blocks {
        match parse_block(block)? {
            Some(line) => result.push(line),
            None => tracing::debug!("Skipping non-cue SRT block: {:?}", block.first()),
        }
    }

    Ok(result)
}
