use std::path::PathBuf;
use std::time::Duration;

/// One entry in the track registry. Immutable after the initial scan;
/// the index of a track is its position in the registry `Vec`.
#[derive(Clone)]
pub struct Track {
    /// Path to the audio file; also the source for the download action.
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Display number shown next to the title ("03", "12", ...).
    pub number: String,
    pub duration: Option<Duration>,
    /// Sidecar artwork image, when one was found next to the audio file.
    pub artwork: Option<PathBuf>,
}

impl Track {
    /// Short label for the artwork slot in the player bar.
    pub fn artwork_label(&self) -> Option<&str> {
        self.artwork
            .as_deref()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
    }
}
