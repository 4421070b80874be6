//! Per-track download sessions.
//!
//! Each track row has an independent download action: triggering it disables
//! the row's control, fills its progress indicator and copies the audio file
//! into the downloads directory on a worker thread. The indicator is a
//! fixed-delay affordance (it resets after `reset_ms`), not a measurement of
//! the actual transfer. Download state is fully independent of playback.

mod session;
mod transfer;

pub use session::DownloadManager;
pub use transfer::{download_to, suggested_filename};

#[cfg(test)]
mod tests;
