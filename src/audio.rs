//! Playback engine: a command-driven wrapper over the shared rodio output.
//!
//! The engine runs on its own thread and owns the single playback resource
//! (one `Sink` at a time). Loading never starts playback by itself; play and
//! pause are explicit commands, and end-of-track is reported back through an
//! event channel so the controller can decide what happens next.

mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::*;

#[cfg(test)]
mod tests;
