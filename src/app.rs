//! Application module: the player-bar controller.
//!
//! `App` in `app::model` owns the track registry, the explicit
//! [`PlayerState`](model::PlayerState) and the cursor; every playback-facing
//! state transition goes through its methods.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
