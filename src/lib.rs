//! Karaoke lyric synchronisation
//!
//! Parses SRT, WebVTT and JSON subtitles into time-coded lines and tracks the
//! active line against a playback clock, with a character-level highlight
//! split for word-by-word colouring.

pub mod features;

pub use features::lyrics;
