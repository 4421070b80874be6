//! Player-bar controller model: `App`, `PlayerState` and `PlaybackState`.
//!
//! The controller is a small state machine over three shapes:
//! idle (no track ever loaded), loaded+paused and loaded+playing. All
//! transport and inline-row actions are transitions on it; the glyphs shown
//! in the UI are derived from the state rather than stored per row.

use std::time::Duration;

use crate::library::Track;

/// Glyph shown on idle/paused rows and on the transport button while paused.
pub const PLAY_GLYPH: &str = "▶";
/// Glyph shown on the playing row and on the transport button while playing.
pub const PAUSE_GLYPH: &str = "❚❚";

/// Coarse playback status, as published to MPRIS.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// The player-bar state proper. Owned exclusively by [`App`]; mutated only
/// through its transition methods.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerState {
    /// Index of the track whose media is loaded into the engine, or `None`
    /// when nothing has ever been loaded.
    pub current: Option<usize>,
    pub looping: bool,
    pub playing: bool,
}

/// The main application model: registry + player state + cursor.
pub struct App {
    pub tracks: Vec<Track>,
    /// Cursor position in the track list (independent of playback).
    pub selected: usize,
    pub state: PlayerState,
    /// The player bar stays hidden until the first track is loaded.
    pub bar_visible: bool,
    /// Displayed seek gauge value, always within `[0, 100]`.
    pub seek_percent: f64,
    pub current_dir: Option<String>,
}

impl App {
    /// Create a new `App` over the scanned `tracks`.
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            selected: 0,
            state: PlayerState::default(),
            bar_visible: false,
            seek_percent: 0.0,
            current_dir: None,
        }
    }

    /// Record the scanned directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    /// Return true if the registry contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    /// Load track `i` into the player bar without starting playback:
    /// sets the current index, reveals the bar, resets the seek gauge and
    /// (by derivation) every inline glyph. Out-of-range `i` is a silent no-op.
    pub fn load_track(&mut self, i: usize) {
        if i >= self.tracks.len() {
            return;
        }
        self.state.current = Some(i);
        self.state.playing = false;
        self.bar_visible = true;
        self.seek_percent = 0.0;
    }

    /// Load track `i` and mark it playing. Used by the inline row action and
    /// by next/prev, which always start playback after loading.
    pub fn play_now(&mut self, i: usize) {
        self.load_track(i);
        if self.state.current == Some(i) {
            self.state.playing = true;
        }
    }

    /// Flip between loaded+paused and loaded+playing. No-op while idle.
    pub fn toggle_play(&mut self) {
        if self.state.current.is_some() {
            self.state.playing = !self.state.playing;
        }
    }

    /// Index the transport "next" button would land on. Wraps past the end;
    /// from idle it lands on 0. Assumes a non-empty registry.
    pub fn next_index(&self) -> usize {
        match self.state.current {
            Some(i) => (i + 1) % self.tracks.len(),
            None => 0,
        }
    }

    /// Index the transport "prev" button would land on. Wraps below zero;
    /// from idle it lands on the last track. Assumes a non-empty registry.
    pub fn prev_index(&self) -> usize {
        match self.state.current {
            Some(i) if i > 0 => i - 1,
            _ => self.tracks.len() - 1,
        }
    }

    /// Advance to the next track and start playing it.
    pub fn next_track(&mut self) {
        let next = self.next_index();
        self.play_now(next);
    }

    /// Go back to the previous track and start playing it.
    pub fn prev_track(&mut self) {
        let prev = self.prev_index();
        self.play_now(prev);
    }

    /// Flip the loop flag. The engine's native single-track repeat follows
    /// the returned value.
    pub fn toggle_loop(&mut self) -> bool {
        self.state.looping = !self.state.looping;
        self.state.looping
    }

    /// End-of-track notification from the engine. With looping off this
    /// auto-advances exactly once and returns true; with looping on the
    /// engine repeats natively and this is never reached with `true`.
    pub fn on_track_ended(&mut self) -> bool {
        if self.state.looping {
            return false;
        }
        self.next_track();
        true
    }

    /// Progress tick: move the seek gauge to `elapsed / duration × 100`.
    /// Skipped entirely while the duration is unknown or zero.
    pub fn set_progress(&mut self, elapsed: Duration, duration: Option<Duration>) {
        let Some(total) = duration else {
            return;
        };
        if total.is_zero() {
            return;
        }
        let percent = elapsed.as_secs_f64() / total.as_secs_f64() * 100.0;
        self.seek_percent = percent.clamp(0.0, 100.0);
    }

    /// User-driven seek input: move the gauge by `delta` percent, clamped.
    pub fn nudge_seek(&mut self, delta: f64) {
        self.seek_percent = (self.seek_percent + delta).clamp(0.0, 100.0);
    }

    /// Fractional position the engine should seek to for the current gauge
    /// value.
    pub fn seek_target_fraction(&self) -> f64 {
        self.seek_percent / 100.0
    }

    /// Glyph for the inline play button of row `i`. At most one row ever
    /// shows the pause glyph, and only while that row is playing.
    pub fn inline_glyph(&self, i: usize) -> &'static str {
        if self.state.playing && self.state.current == Some(i) {
            PAUSE_GLYPH
        } else {
            PLAY_GLYPH
        }
    }

    /// Glyph for the shared transport play/pause button.
    pub fn transport_glyph(&self) -> &'static str {
        if self.state.playing {
            PAUSE_GLYPH
        } else {
            PLAY_GLYPH
        }
    }

    /// The currently loaded track, when any.
    pub fn current_track(&self) -> Option<&Track> {
        self.state.current.and_then(|i| self.tracks.get(i))
    }

    /// Coarse status for MPRIS: idle maps to `Stopped`.
    pub fn playback_status(&self) -> PlaybackState {
        match (self.state.current, self.state.playing) {
            (None, _) => PlaybackState::Stopped,
            (Some(_), true) => PlaybackState::Playing,
            (Some(_), false) => PlaybackState::Paused,
        }
    }

    /// Set the cursor position, clamping into range.
    pub fn set_selected(&mut self, idx: usize) {
        if self.tracks.is_empty() {
            self.selected = 0;
        } else {
            self.selected = idx.min(self.tracks.len() - 1);
        }
    }

    /// Move the cursor down one row, stopping at the bottom.
    pub fn next(&mut self) {
        if self.selected + 1 < self.tracks.len() {
            self.selected += 1;
        }
    }

    /// Move the cursor up one row, stopping at the top.
    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}
