//! Two-tone rich text for the current line
//!
//! Output uses `<color=...>` tags, which TextMeshPro-style text widgets
//! understand. The sung prefix gets one colour and the rest another.

use std::fmt::Write;

use super::sync::{CurrentLine, RenderInstruction};

pub const DEFAULT_SUNG_COLOR: &str = "#FF00FF";
pub const DEFAULT_UNSUNG_COLOR: &str = "#FFFFFF";

/// Colours used for the highlight split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightStyle {
    pub sung_color: String,
    pub unsung_color: String,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            sung_color: DEFAULT_SUNG_COLOR.to_string(),
            unsung_color: DEFAULT_UNSUNG_COLOR.to_string(),
        }
    }
}

impl HighlightStyle {
    pub fn new(sung_color: impl Into<String>, unsung_color: impl Into<String>) -> Self {
        Self {
            sung_color: sung_color.into(),
            unsung_color: unsung_color.into(),
        }
    }

    /// Markup for the current line, plain text when there is no split
    pub fn rich_text(&self, line: &CurrentLine) -> String {
        if line.split.is_none() {
            return line.text.clone();
        }

        let mut result = String::with_capacity(line.text.len() + 32);
        write!(
            &mut result,
            "<color={}>{}<color={}>{}",
            self.sung_color,
            line.sung(),
            self.unsung_color,
            line.unsung()
        )
        .ok();
        result
    }

    /// Markup for the current line of an instruction, empty when idle
    pub fn current_text(&self, instruction: &RenderInstruction) -> String {
        instruction
            .current
            .as_ref()
            .map(|line| self.rich_text(line))
            .unwrap_or_default()
    }
}
