//! Lyrics module - parsing and synchronisation
//!
//! - `parser`: Multi-format subtitle parsing (SRT, WebVTT, JSON)
//! - `sync`: Tick-driven cursor and highlight computation
//! - `display`: Two-tone markup for the active line

pub mod display;
pub mod parser;
pub mod sync;

// Re-export commonly used items
pub use display::HighlightStyle;
pub use parser::*;
pub use sync::{CurrentLine, RenderInstruction, SyncEngine, SyncState};
