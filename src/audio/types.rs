//! Audio-related small types and handles.
//!
//! This module defines the command and event enums exchanged with the audio
//! thread, plus the shared playback-info handle read by the UI.

use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
pub enum AudioCmd {
    /// Load the track at the given index into a fresh, paused sink.
    /// Never starts playback; that takes an explicit `Play`.
    Load(usize),
    /// Start or resume playback of the loaded track.
    Play,
    /// Pause playback.
    Pause,
    /// Seek to the given fraction of the track (`0.0..=1.0`).
    /// No-op while the track duration is unknown.
    SeekToFraction(f64),
    /// Enable/disable native single-track repeat.
    SetLooping(bool),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Notifications emitted by the audio thread.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The loaded track played to its end while looping was off.
    /// Fired exactly once per natural end; never fired while looping.
    TrackEnded,
}

#[derive(Debug, Clone)]
/// Runtime playback information shared with the UI.
pub struct PlaybackInfo {
    /// Index of the track loaded into the engine (if any).
    pub index: Option<usize>,
    /// Elapsed playback time for the current track.
    pub elapsed: Duration,
    /// Whether playback is currently active.
    pub playing: bool,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            index: None,
            elapsed: Duration::ZERO,
            playing: false,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
