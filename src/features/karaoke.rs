//! Karaoke session - wires playback, lyrics and display together
//!
//! The host builds a [`KaraokeSession`] from a [`PlaybackClock`] and a
//! [`LyricsSink`] and calls [`KaraokeSession::tick`] once per frame. Nothing
//! here is global: whoever needs the session gets a reference to it.

use std::path::Path;

use super::lyrics::{
    LyricTrack, ParseError, RenderInstruction, SubtitleFormat, SyncEngine, parse_subtitle_file,
    parse_subtitles, parse_with_format,
};
use super::settings::DisplaySettings;

/// Source of the current playback position
pub trait PlaybackClock {
    /// Whether audio is currently playing
    fn is_playing(&self) -> bool;
    /// Position in seconds
    fn position_secs(&self) -> f64;
}

/// Receiver of one render instruction per tick
pub trait LyricsSink {
    fn render(&mut self, instruction: &RenderInstruction);
}

impl<F> LyricsSink for F
where
    F: FnMut(&RenderInstruction),
{
    fn render(&mut self, instruction: &RenderInstruction) {
        self(instruction)
    }
}

pub struct KaraokeSession<C, S> {
    engine: SyncEngine,
    clock: C,
    sink: S,
    display: DisplaySettings,
    active: bool,
}

impl<C: PlaybackClock, S: LyricsSink> KaraokeSession<C, S> {
    pub fn new(clock: C, sink: S, display: DisplaySettings) -> Self {
        Self {
            engine: SyncEngine::new(),
            clock,
            sink,
            display,
            active: false,
        }
    }

    /// Parse and load subtitles for a newly selected song
    ///
    /// On failure the previous track is dropped so the song shows no lyrics.
    /// Returns the number of loaded entries.
    pub fn load_subtitles(
        &mut self,
        content: &str,
        format: Option<SubtitleFormat>,
    ) -> Result<usize, ParseError> {
        let parsed = match format {
            Some(format) => parse_with_format(content, format),
            None => parse_subtitles(content),
        };
        self.apply_parsed(parsed)
    }

    /// Same as [`Self::load_subtitles`], reading from a file
    pub fn load_subtitle_file(
        &mut self,
        path: &Path,
        format: Option<SubtitleFormat>,
    ) -> Result<usize, ParseError> {
        self.apply_parsed(parse_subtitle_file(path, format))
    }

    pub fn load_track(&mut self, track: LyricTrack) -> usize {
        let count = track.len();
        self.engine.load(track);
        count
    }

    fn apply_parsed(&mut self, parsed: Result<LyricTrack, ParseError>) -> Result<usize, ParseError> {
        match parsed {
            Ok(track) => Ok(self.load_track(track)),
            Err(e) => {
                tracing::warn!("No lyrics available: {}", e);
                self.engine.clear();
                Err(e)
            }
        }
    }

    /// Rewind and begin ticking
    pub fn start(&mut self) {
        self.engine.reset();
        self.active = true;
    }

    /// Stop ticking, keep the cursor
    pub fn pause(&mut self) {
        self.active = false;
    }

    /// Continue ticking from the current cursor
    pub fn resume(&mut self) {
        self.active = true;
    }

    /// Stop ticking, rewind and blank the display
    pub fn stop(&mut self) {
        self.active = false;
        self.engine.reset();
        self.sink.render(&RenderInstruction::idle());
    }

    /// Run one tick, `None` while paused or stopped
    pub fn tick(&mut self) -> Option<RenderInstruction> {
        if !self.active {
            return None;
        }

        let time = if self.clock.is_playing() {
            self.clock.position_secs()
        } else {
            0.0
        };

        let mut instruction = self.engine.advance(time);
        if !self.display.show_previous_line {
            instruction.previous.clear();
        }
        if !self.display.show_next_line {
            instruction.next.clear();
        }

        self.sink.render(&instruction);
        Some(instruction)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn engine(&self) -> &SyncEngine {
        &self.engine
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
