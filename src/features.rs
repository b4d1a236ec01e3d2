//! Feature modules - business logic separated from UI
//!
//! Each feature module contains the core logic for a specific functionality.
//! Features should not depend on rendering or audio output directly.

pub mod karaoke;
pub mod lyrics;
pub mod settings;

pub use karaoke::{KaraokeSession, LyricsSink, PlaybackClock};
pub use settings::{DisplaySettings, Settings, SettingsError, SyncSettings};
