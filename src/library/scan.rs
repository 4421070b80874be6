use std::path::Path;
use std::time::Duration;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::ItemKey;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::artwork::find_artwork;
use super::model::Track;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Build the track registry from `dir`.
///
/// Ordering is canonical for the session: tracks sort by (number tag,
/// filename), and each track's position in the returned `Vec` is its index.
/// Tracks without a number tag get their ordinal position as the display
/// number. Unreadable entries are skipped silently; unreadable tags fall
/// back to the file stem.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut found: Vec<(Option<u32>, Track)> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            let default_title = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("UNKNOWN")
                .to_string();

            let mut title = default_title;
            let mut artist: Option<String> = None;
            let mut album: Option<String> = None;
            let mut number: Option<u32> = None;
            let mut duration: Option<Duration> = None;

            if let Ok(tagged) = lofty::read_from_path(path) {
                duration = Some(tagged.properties().duration());

                if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                    if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
                        if !v.trim().is_empty() {
                            title = v.to_string();
                        }
                    }
                    if let Some(v) = tag.get_string(&ItemKey::TrackArtist) {
                        let v = v.trim();
                        if !v.is_empty() {
                            artist = Some(v.to_string());
                        }
                    }
                    if let Some(v) = tag.get_string(&ItemKey::AlbumTitle) {
                        let v = v.trim();
                        if !v.is_empty() {
                            album = Some(v.to_string());
                        }
                    }
                    if let Some(v) = tag.get_string(&ItemKey::TrackNumber) {
                        // "7" and "7/12" both occur in the wild.
                        number = v.split('/').next().and_then(|n| n.trim().parse().ok());
                    }
                }
            }

            let artwork = find_artwork(path);

            found.push((
                number,
                Track {
                    path: path.to_path_buf(),
                    title,
                    artist,
                    album,
                    number: String::new(),
                    duration,
                    artwork,
                },
            ));
        }
    }

    found.sort_by(|a, b| {
        let key_a = (a.0.unwrap_or(u32::MAX), a.1.path.clone());
        let key_b = (b.0.unwrap_or(u32::MAX), b.1.path.clone());
        key_a.cmp(&key_b)
    });

    found
        .into_iter()
        .enumerate()
        .map(|(pos, (number, mut track))| {
            track.number = format!("{:02}", number.unwrap_or(pos as u32 + 1));
            track
        })
        .collect()
}
