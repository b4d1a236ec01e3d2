//! Tick-driven lyric synchronisation
//!
//! The engine owns the loaded [`LyricTrack`] and a cursor into it. Each tick
//! the host passes the current playback time and gets back a
//! [`RenderInstruction`] describing what to draw. The engine never reads a
//! clock itself.
//!
//! The cursor moves forward by at most one cue per tick: if several cues
//! expired since the previous call, it takes several ticks to catch up.
//! Only [`SyncEngine::load`] and [`SyncEngine::reset`] move it back.

use super::parser::{LyricLine, LyricTrack};

/// Engine lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// Nothing (or an empty track) loaded
    #[default]
    Idle,
    /// Cursor points at a cue
    Active,
    /// Cursor ran past the last cue
    Finished,
}

/// The line being sung, with its highlight split
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentLine {
    pub text: String,
    /// Characters already sung; `None` renders the line unstyled
    pub split: Option<usize>,
    /// Raw progress through the cue, not clamped
    pub progress: f64,
}

impl CurrentLine {
    fn split_byte_index(&self) -> usize {
        let chars = self.split.unwrap_or(0);
        self.text
            .char_indices()
            .nth(chars)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }

    /// Already sung prefix, empty when unsplit
    pub fn sung(&self) -> &str {
        &self.text[..self.split_byte_index()]
    }

    /// Not yet sung suffix, the whole text when unsplit
    pub fn unsung(&self) -> &str {
        &self.text[self.split_byte_index()..]
    }
}

/// What the sink should show for one tick
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderInstruction {
    /// `None` when idle or finished
    pub current: Option<CurrentLine>,
    /// Preview of the following cue, empty if there is none
    pub next: String,
    /// Cue before the current one, empty if there is none
    pub previous: String,
}

impl RenderInstruction {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }
}

/// Progress through a cue, `1.0` for zero-length cues
pub fn cue_progress(line: &LyricLine, current_time: f64) -> f64 {
    let start = line.start.total_seconds();
    let end = line.end.total_seconds();
    if end <= start {
        return 1.0;
    }
    (current_time - start) / (end - start)
}

/// `round(progress * chars)` clamped to `[0, chars]`
pub fn highlight_split(progress: f64, char_len: usize) -> usize {
    let middle = (progress * char_len as f64).round();
    if middle.is_nan() || middle <= 0.0 {
        0
    } else {
        (middle as usize).min(char_len)
    }
}

/// Cursor over a lyric track
#[derive(Debug, Default)]
pub struct SyncEngine {
    track: LyricTrack,
    current_index: usize,
    state: SyncState,
}

impl SyncEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_track(track: LyricTrack) -> Self {
        let mut engine = Self::new();
        engine.load(track);
        engine
    }

    /// Replace the track and rewind
    pub fn load(&mut self, track: LyricTrack) {
        tracing::debug!("Sync engine loaded {} lines", track.len());
        self.track = track;
        self.reset();
    }

    /// Drop the track
    pub fn clear(&mut self) {
        self.load(LyricTrack::default());
    }

    /// Rewind to the first cue (seek to start, restart, stop)
    pub fn reset(&mut self) {
        self.current_index = 0;
        self.state = if self.track.is_empty() {
            SyncState::Idle
        } else {
            SyncState::Active
        };
    }

    pub fn track(&self) -> &LyricTrack {
        &self.track
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Advance by one tick
    pub fn advance(&mut self, current_time: f64) -> RenderInstruction {
        if let Some(line) = self.track.get(self.current_index) {
            if line.end.total_seconds() < current_time {
                self.current_index += 1;
                if self.current_index >= self.track.len() {
                    tracing::debug!("Reached end of lyrics at {:.3}s", current_time);
                    self.state = SyncState::Finished;
                }
            }
        }

        let Some(line) = self.track.get(self.current_index) else {
            return RenderInstruction::idle();
        };

        let progress = cue_progress(line, current_time);
        let middle = highlight_split(progress, line.char_len());

        let next = self
            .track
            .get(self.current_index + 1)
            .map(|l| l.text.clone())
            .unwrap_or_default();
        let previous = self
            .current_index
            .checked_sub(1)
            .and_then(|idx| self.track.get(idx))
            .map(|l| l.text.clone())
            .unwrap_or_default();

        RenderInstruction {
            current: Some(CurrentLine {
                text: line.text.clone(),
                split: (middle > 0).then_some(middle),
                progress,
            }),
            next,
            previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::lyrics::parser::{Timestamp, parse_subtitles};
    use approx::assert_relative_eq;

    fn line(start: f64, end: f64, text: &str) -> LyricLine {
        LyricLine::new(
            Timestamp::from_seconds(start),
            Timestamp::from_seconds(end),
            text,
        )
    }

    fn engine(lines: Vec<LyricLine>) -> SyncEngine {
        SyncEngine::with_track(lines.into())
    }

    #[test]
    fn test_half_way_split() {
        let track = parse_subtitles("1\n00:00:01,000 --> 00:00:03,000\nLa la la\n").unwrap();
        let mut engine = SyncEngine::with_track(track);

        let instruction = engine.advance(2.0);
        let current = instruction.current.unwrap();
        assert_relative_eq!(current.progress, 0.5);
        assert_eq!(current.split, Some(4));
        assert_eq!(current.sung(), "La l");
        assert_eq!(current.unsung(), "a la");
        assert_eq!(instruction.next, "");
        assert_eq!(instruction.previous, "");
    }

    #[test]
    fn test_before_start_is_unstyled() {
        let mut engine = engine(vec![line(1.0, 3.0, "La la la")]);
        let current = engine.advance(0.0).current.unwrap();
        assert_eq!(current.split, None);
        assert_eq!(current.sung(), "");
        assert_eq!(current.unsung(), "La la la");
    }

    #[test]
    fn test_past_last_line_is_idle() {
        let mut engine = engine(vec![line(1.0, 3.0, "La la la")]);
        assert!(!engine.advance(2.0).is_idle());

        let instruction = engine.advance(10.0);
        assert!(instruction.is_idle());
        assert_eq!(instruction.next, "");
        assert_eq!(engine.state(), SyncState::Finished);

        // Stays finished
        assert!(engine.advance(11.0).is_idle());
        assert_eq!(engine.current_index(), 1);
    }

    #[test]
    fn test_next_and_previous() {
        let mut engine = engine(vec![
            line(0.0, 1.0, "one"),
            line(1.0, 2.0, "two"),
            line(2.0, 3.0, "three"),
        ]);

        let first = engine.advance(0.5);
        assert_eq!(first.current.unwrap().text, "one");
        assert_eq!(first.next, "two");
        assert_eq!(first.previous, "");

        let second = engine.advance(1.5);
        assert_eq!(second.current.unwrap().text, "two");
        assert_eq!(second.next, "three");
        assert_eq!(second.previous, "one");
    }

    #[test]
    fn test_single_step_advance() {
        let mut engine = engine(vec![
            line(0.0, 1.0, "one"),
            line(1.0, 2.0, "two"),
            line(2.0, 3.0, "three"),
            line(3.0, 4.0, "four"),
        ]);

        engine.advance(0.5);
        assert_eq!(engine.current_index(), 0);

        // Three cues have expired, cursor moves one per tick
        let instruction = engine.advance(3.5);
        assert_eq!(engine.current_index(), 1);
        assert_eq!(instruction.current.unwrap().text, "two");
        engine.advance(3.5);
        assert_eq!(engine.current_index(), 2);
        engine.advance(3.5);
        assert_eq!(engine.current_index(), 3);
        engine.advance(3.5);
        assert_eq!(engine.current_index(), 3);
    }

    #[test]
    fn test_monotonic_cursor() {
        let mut engine = engine(vec![
            line(0.0, 1.0, "a"),
            line(1.5, 2.0, "b"),
            line(2.0, 2.0, "c"),
            line(4.0, 6.0, "d"),
        ]);

        let mut last = engine.current_index();
        let mut time = 0.0;
        while time < 8.0 {
            engine.advance(time);
            assert!(engine.current_index() >= last);
            last = engine.current_index();
            time += 0.1;
        }
        assert_eq!(engine.state(), SyncState::Finished);
    }

    #[test]
    fn test_zero_length_cue_is_fully_revealed() {
        let mut engine = engine(vec![line(2.0, 2.0, "flash"), line(3.0, 4.0, "after")]);
        let current = engine.advance(2.0).current.unwrap();
        assert_relative_eq!(current.progress, 1.0);
        assert_eq!(current.split, Some(5));
        assert_eq!(current.unsung(), "");
    }

    #[test]
    fn test_split_bounds() {
        for progress in [-3.0, -0.01, 0.0, 0.2, 0.5, 0.99, 1.0, 1.7, f64::NAN] {
            for len in [0, 1, 7, 40] {
                let middle = highlight_split(progress, len);
                assert!(middle <= len, "progress {progress} len {len}");
            }
        }
        assert_eq!(highlight_split(2.0, 8), 8);
        assert_eq!(highlight_split(-1.0, 8), 0);
    }

    #[test]
    fn test_split_counts_characters() {
        let mut engine = engine(vec![line(0.0, 4.0, "さくら舞う")]);
        let current = engine.advance(1.6).current.unwrap();
        assert_eq!(current.split, Some(2));
        assert_eq!(current.sung(), "さく");
        assert_eq!(current.unsung(), "ら舞う");
    }

    #[test]
    fn test_empty_track_is_idle() {
        let mut engine = SyncEngine::new();
        assert_eq!(engine.state(), SyncState::Idle);
        assert!(engine.advance(1.0).is_idle());

        engine.load(LyricTrack::default());
        assert_eq!(engine.state(), SyncState::Idle);
    }

    #[test]
    fn test_reload_and_reset_rewind() {
        let mut engine = engine(vec![line(0.0, 1.0, "one")]);
        engine.advance(5.0);
        assert_eq!(engine.state(), SyncState::Finished);

        engine.reset();
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.state(), SyncState::Active);

        engine.load(vec![line(0.0, 1.0, "new"), line(1.0, 2.0, "song")].into());
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.advance(0.5).current.unwrap().text, "new");

        engine.clear();
        assert_eq!(engine.state(), SyncState::Idle);
    }
}
