//! Positional jitter for new posts.
//!
//! Each coordinate is shifted by an independent offset drawn uniformly from
//! `[-magnitude, +magnitude]` degrees so the published position does not
//! reveal where the post was made.

use around_core::models::GeoPosition;
use rand::Rng;

/// Shift a single coordinate by a uniform offset in `[-magnitude, +magnitude]`
pub fn jitter_coordinate<R: Rng>(value: f64, magnitude: f64, rng: &mut R) -> f64 {
    if magnitude <= 0.0 {
        return value;
    }
    value + rng.gen_range(-magnitude..=magnitude)
}

/// Jitter latitude and longitude independently
///
/// The result is clamped to the valid coordinate ranges, which keeps each
/// coordinate within `magnitude` of the original.
pub fn apply_jitter<R: Rng>(
    position: GeoPosition,
    magnitude: f64,
    rng: &mut R,
) -> GeoPosition {
    let latitude = jitter_coordinate(position.latitude, magnitude, rng).clamp(-90.0, 90.0);
    let longitude = jitter_coordinate(position.longitude, magnitude, rng).clamp(-180.0, 180.0);

    tracing::debug!(magnitude, "Applied positional jitter");

    GeoPosition { latitude, longitude }
}
