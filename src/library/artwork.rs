use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];
const COVER_STEMS: [&str; 2] = ["cover", "folder"];

/// Locate a sidecar artwork image for `audio_path`.
///
/// Preference order: an image with the same stem as the audio file, then a
/// `cover.*` or `folder.*` image in the same directory. Returns `None` when
/// nothing is found; tracks without artwork are accepted as-is.
pub fn find_artwork(audio_path: &Path) -> Option<PathBuf> {
    let dir = audio_path.parent()?;

    if let Some(stem) = audio_path.file_stem().and_then(|s| s.to_str()) {
        if let Some(found) = image_with_stem(dir, stem) {
            return Some(found);
        }
    }

    for stem in COVER_STEMS {
        if let Some(found) = image_with_stem(dir, stem) {
            return Some(found);
        }
    }

    None
}

fn image_with_stem(dir: &Path, stem: &str) -> Option<PathBuf> {
    for ext in IMAGE_EXTENSIONS {
        let candidate = dir.join(format!("{stem}.{ext}"));
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}
