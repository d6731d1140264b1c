/// Photo count at which the care score reaches 100%
pub const PHOTO_TARGET: u32 = 8;

/// Raw care score: `round(total_images / PHOTO_TARGET * 100)`.
///
/// Deliberately not clamped; more uploads than the target produce values
/// above 100 (e.g. 10 photos -> 125).
pub fn care_score(total_images: u32) -> u32 {
    (total_images as f64 / PHOTO_TARGET as f64 * 100.0).round() as u32
}

/// Care score capped at 100, for progress-bar display.
pub fn care_score_clamped(total_images: u32) -> u32 {
    care_score(total_images).min(100)
}
