use super::*;
use crate::library::Track;
use std::time::Duration;

fn t(title: &str) -> Track {
    Track {
        path: std::path::PathBuf::new(),
        title: title.into(),
        artist: None,
        album: None,
        number: "00".into(),
        duration: None,
        artwork: None,
    }
}

fn app_with(n: usize) -> App {
    App::new((0..n).map(|i| t(&format!("Track {i}"))).collect())
}

#[test]
fn load_track_reveals_bar_without_playing() {
    let mut app = app_with(3);
    assert!(!app.bar_visible);

    app.load_track(1);
    assert_eq!(app.state.current, Some(1));
    assert!(!app.state.playing);
    assert!(app.bar_visible);
}

#[test]
fn load_track_out_of_range_is_a_no_op() {
    let mut app = app_with(2);
    app.load_track(5);
    assert_eq!(app.state.current, None);
    assert!(!app.bar_visible);
}

#[test]
fn next_and_prev_wrap_around() {
    let mut app = app_with(5);

    app.load_track(4);
    app.next_track();
    assert_eq!(app.state.current, Some(0));
    assert!(app.state.playing);

    app.load_track(0);
    app.prev_track();
    assert_eq!(app.state.current, Some(4));
    assert!(app.state.playing);
}

#[test]
fn next_and_prev_from_idle_land_on_edges() {
    let app = app_with(3);
    assert_eq!(app.next_index(), 0);
    assert_eq!(app.prev_index(), 2);
}

#[test]
fn full_next_cycle_visits_every_index() {
    let mut app = app_with(5);
    app.load_track(0);
    let mut seen = vec![0];
    for _ in 0..5 {
        app.next_track();
        seen.push(app.state.current.unwrap());
    }
    assert_eq!(seen, vec![0, 1, 2, 3, 4, 0]);
}

#[test]
fn toggle_play_pairs_restore_play_glyphs() {
    let mut app = app_with(3);
    app.load_track(1);

    app.toggle_play();
    assert_eq!(app.transport_glyph(), PAUSE_GLYPH);
    assert_eq!(app.inline_glyph(1), PAUSE_GLYPH);

    app.toggle_play();
    assert_eq!(app.transport_glyph(), PLAY_GLYPH);
    for i in 0..3 {
        assert_eq!(app.inline_glyph(i), PLAY_GLYPH);
    }
}

#[test]
fn toggle_play_while_idle_is_a_no_op() {
    let mut app = app_with(3);
    app.toggle_play();
    assert!(!app.state.playing);
    assert_eq!(app.playback_status(), PlaybackState::Stopped);
}

#[test]
fn at_most_one_inline_pause_glyph_and_it_matches_current() {
    let mut app = app_with(4);
    app.play_now(2);

    let paused_rows: Vec<usize> = (0..4).filter(|&i| app.inline_glyph(i) == PAUSE_GLYPH).collect();
    assert_eq!(paused_rows, vec![2]);

    app.toggle_play();
    assert!((0..4).all(|i| app.inline_glyph(i) == PLAY_GLYPH));
}

#[test]
fn loading_a_new_track_resets_glyphs_and_gauge() {
    let mut app = app_with(3);
    app.play_now(0);
    app.set_progress(Duration::from_secs(30), Some(Duration::from_secs(60)));
    assert!(app.seek_percent > 0.0);

    app.load_track(2);
    assert!(!app.state.playing);
    assert_eq!(app.seek_percent, 0.0);
    assert!((0..3).all(|i| app.inline_glyph(i) == PLAY_GLYPH));
}

#[test]
fn toggle_loop_flips_flag() {
    let mut app = app_with(1);
    assert!(!app.state.looping);
    assert!(app.toggle_loop());
    assert!(app.state.looping);
    assert!(!app.toggle_loop());
    assert!(!app.state.looping);
}

#[test]
fn track_ended_advances_once_only_when_not_looping() {
    let mut app = app_with(3);
    app.play_now(2);

    assert!(app.on_track_ended());
    assert_eq!(app.state.current, Some(0));
    assert!(app.state.playing);

    app.state.looping = true;
    assert!(!app.on_track_ended());
    assert_eq!(app.state.current, Some(0));
}

#[test]
fn progress_skips_unknown_duration_and_stays_in_range() {
    let mut app = app_with(1);
    app.load_track(0);

    app.set_progress(Duration::from_secs(10), None);
    assert_eq!(app.seek_percent, 0.0);

    app.set_progress(Duration::from_secs(30), Some(Duration::from_secs(120)));
    assert_eq!(app.seek_percent, 25.0);

    // Elapsed can overshoot the tagged duration by a tick; the gauge clamps.
    app.set_progress(Duration::from_secs(200), Some(Duration::from_secs(120)));
    assert_eq!(app.seek_percent, 100.0);
}

#[test]
fn seek_gauge_round_trips_to_fraction() {
    let mut app = app_with(1);
    app.load_track(0);

    app.nudge_seek(40.0);
    assert_eq!(app.seek_percent, 40.0);
    assert!((app.seek_target_fraction() - 0.4).abs() < 1e-9);

    app.nudge_seek(1000.0);
    assert_eq!(app.seek_percent, 100.0);
    app.nudge_seek(-1000.0);
    assert_eq!(app.seek_percent, 0.0);
}

#[test]
fn cursor_movement_stays_in_range() {
    let mut app = app_with(2);
    app.prev();
    assert_eq!(app.selected, 0);
    app.next();
    app.next();
    assert_eq!(app.selected, 1);
    app.set_selected(99);
    assert_eq!(app.selected, 1);
}
