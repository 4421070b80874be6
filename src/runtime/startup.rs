use crate::app::App;
use crate::audio::{AudioCmd, AudioPlayer};
use crate::config;

/// Seed the controller and the audio thread with the configured playback
/// defaults. The loop flag is the only one; everything else starts idle.
pub fn apply_playback_defaults(
    app: &mut App,
    audio_player: &AudioPlayer,
    settings: &config::Settings,
) {
    app.state.looping = settings.playback.looping;
    let _ = audio_player.send(AudioCmd::SetLooping(app.state.looping));
}
