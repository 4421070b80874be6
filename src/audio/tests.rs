use super::sink::seek_position;
use std::time::Duration;

#[test]
fn seek_position_scales_known_durations() {
    let total = Some(Duration::from_secs(200));
    assert_eq!(seek_position(total, 0.0), Some(Duration::ZERO));
    assert_eq!(seek_position(total, 0.25), Some(Duration::from_secs(50)));
    assert_eq!(seek_position(total, 1.0), Some(Duration::from_secs(200)));
}

#[test]
fn seek_position_clamps_out_of_range_fractions() {
    let total = Some(Duration::from_secs(100));
    assert_eq!(seek_position(total, -0.5), Some(Duration::ZERO));
    assert_eq!(seek_position(total, 2.0), Some(Duration::from_secs(100)));
}

#[test]
fn seek_position_is_none_without_duration() {
    assert_eq!(seek_position(None, 0.5), None);
}
