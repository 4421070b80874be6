use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use crate::library::Track;

use super::transfer::download_to;

/// Transient per-track download state. Self-resetting; never persisted.
#[derive(Debug, Default)]
struct Session {
    disabled: bool,
    /// 0 while idle, 100 while the affordance is showing. Nothing in between.
    progress_percent: u8,
    started_at: Option<Instant>,
}

/// One session per track row, plus the shared destination and reset delay.
pub struct DownloadManager {
    sessions: Vec<Session>,
    reset_after: Duration,
    dest: PathBuf,
}

impl DownloadManager {
    pub fn new(track_count: usize, reset_after: Duration, dest: PathBuf) -> Self {
        Self {
            sessions: (0..track_count).map(|_| Session::default()).collect(),
            reset_after,
            dest,
        }
    }

    /// Trigger the download for `track` (row `index`) at time `now`.
    ///
    /// Returns false without side effects while the row is already
    /// in-progress (the disabled-state guard) or when `index` is out of
    /// range. Otherwise marks the session disabled with a full progress
    /// indicator and starts the file copy on a worker thread; the copy's
    /// outcome is ignored.
    pub fn trigger(&mut self, track: &Track, index: usize, now: Instant) -> bool {
        let Some(session) = self.sessions.get_mut(index) else {
            return false;
        };
        if session.disabled {
            return false;
        }

        session.disabled = true;
        session.progress_percent = 100;
        session.started_at = Some(now);

        let src = track.path.clone();
        let dest = self.dest.clone();
        thread::spawn(move || {
            let _ = download_to(&src, &dest);
        });

        true
    }

    /// Reset every session whose delay has expired as of `now`. Each trigger
    /// resets exactly once; the reset cannot be cancelled or hurried.
    pub fn tick(&mut self, now: Instant) {
        for session in &mut self.sessions {
            if let Some(started) = session.started_at {
                if now.duration_since(started) >= self.reset_after {
                    session.disabled = false;
                    session.progress_percent = 0;
                    session.started_at = None;
                }
            }
        }
    }

    pub fn is_disabled(&self, index: usize) -> bool {
        self.sessions.get(index).map(|s| s.disabled).unwrap_or(false)
    }

    pub fn progress_percent(&self, index: usize) -> u8 {
        self.sessions
            .get(index)
            .map(|s| s.progress_percent)
            .unwrap_or(0)
    }
}
