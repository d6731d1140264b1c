//! Care score derivation from the uploaded photo count

use pretty_assertions::assert_eq;
use test_log::test;

use har_ghar_munga::progress::{care_score, care_score_clamped, PHOTO_TARGET};

#[test]
fn test_score_scales_against_the_photo_target() {
    assert_eq!(PHOTO_TARGET, 8);
    assert_eq!(care_score(0), 0);
    assert_eq!(care_score(4), 50);
    assert_eq!(care_score(8), 100);
}

#[test]
fn test_raw_score_exceeds_hundred_past_the_target() {
    assert_eq!(care_score(10), 125);
    assert_eq!(care_score(16), 200);
}

#[test]
fn test_display_score_is_clamped() {
    assert_eq!(care_score_clamped(10), 100);
    assert_eq!(care_score_clamped(4), 50);
}

#[test]
fn test_rounding_is_half_up() {
    assert_eq!(care_score(1), 13); // 12.5 rounds away from zero
    assert_eq!(care_score(3), 38); // 37.5 rounds away from zero
}
