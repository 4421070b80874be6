use super::*;
use crate::library::Track;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::tempdir;

fn track_at(path: &Path) -> Track {
    Track {
        path: path.to_path_buf(),
        title: "Song".into(),
        artist: None,
        album: None,
        number: "01".into(),
        duration: None,
        artwork: None,
    }
}

#[test]
fn suggested_filename_is_final_path_segment() {
    assert_eq!(
        suggested_filename(Path::new("/music/a/07 - Song.mp3")),
        Some("07 - Song.mp3".to_string())
    );
    assert_eq!(suggested_filename(Path::new("/")), None);
}

#[test]
fn download_to_copies_under_the_source_name() {
    let src_dir = tempdir().unwrap();
    let dest_dir = tempdir().unwrap();
    let src = src_dir.path().join("song.mp3");
    fs::write(&src, b"audio bytes").unwrap();

    let dest = download_to(&src, dest_dir.path()).unwrap();
    assert_eq!(dest, dest_dir.path().join("song.mp3"));
    assert_eq!(fs::read(dest).unwrap(), b"audio bytes");
}

#[test]
fn download_to_creates_missing_destination_dir() {
    let src_dir = tempdir().unwrap();
    let dest_root = tempdir().unwrap();
    let src = src_dir.path().join("song.mp3");
    fs::write(&src, b"x").unwrap();

    let nested = dest_root.path().join("a").join("b");
    let dest = download_to(&src, &nested).unwrap();
    assert!(dest.starts_with(&nested));
}

#[test]
fn trigger_while_disabled_is_a_guarded_no_op() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("song.mp3");
    fs::write(&src, b"x").unwrap();
    let track = track_at(&src);

    let mut dm = DownloadManager::new(2, Duration::from_millis(3000), dir.path().join("dl"));
    let start = Instant::now();

    assert!(dm.trigger(&track, 0, start));
    assert!(dm.is_disabled(0));
    assert_eq!(dm.progress_percent(0), 100);

    // Second trigger within the window: no observable effect.
    assert!(!dm.trigger(&track, 0, start + Duration::from_millis(100)));
    assert!(dm.is_disabled(0));
    assert_eq!(dm.progress_percent(0), 100);

    // Other rows remain independently triggerable.
    assert!(!dm.is_disabled(1));
    assert!(dm.trigger(&track, 1, start));
}

#[test]
fn session_resets_after_the_fixed_delay_exactly_once() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("song.mp3");
    fs::write(&src, b"x").unwrap();
    let track = track_at(&src);

    let mut dm = DownloadManager::new(1, Duration::from_millis(3000), dir.path().join("dl"));
    let start = Instant::now();
    assert!(dm.trigger(&track, 0, start));

    dm.tick(start + Duration::from_millis(2999));
    assert!(dm.is_disabled(0));
    assert_eq!(dm.progress_percent(0), 100);

    dm.tick(start + Duration::from_millis(3000));
    assert!(!dm.is_disabled(0));
    assert_eq!(dm.progress_percent(0), 0);

    // Further ticks change nothing until the next trigger.
    dm.tick(start + Duration::from_millis(10_000));
    assert!(!dm.is_disabled(0));

    assert!(dm.trigger(&track, 0, start + Duration::from_millis(10_000)));
    assert!(dm.is_disabled(0));
}

#[test]
fn trigger_out_of_range_is_rejected() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("song.mp3");
    fs::write(&src, b"x").unwrap();
    let track = track_at(&src);

    let mut dm = DownloadManager::new(1, Duration::from_millis(100), dir.path().join("dl"));
    assert!(!dm.trigger(&track, 5, Instant::now()));
}
