use around_core::models::{GeoPosition, Viewport};
use geo::{Distance, Haversine, Point};

/// Great-circle distance between two positions in meters
pub fn distance_meters(from: GeoPosition, to: GeoPosition) -> f64 {
    let p1 = Point::new(from.longitude, from.latitude);
    let p2 = Point::new(to.longitude, to.latitude);
    Haversine.distance(p1, p2)
}

/// Search radius in kilometers for a viewport
///
/// Measures from the center to the point on the east edge at the center's
/// latitude, i.e. half the visible east-west span. Returns `None` while
/// either bound is unavailable.
pub fn radius_km(center: Option<GeoPosition>, north_east: Option<GeoPosition>) -> Option<f64> {
    let center = center?;
    let north_east = north_east?;

    let east_edge = GeoPosition { latitude: center.latitude, longitude: north_east.longitude };
    Some(0.001 * distance_meters(center, east_edge))
}

/// Search radius in kilometers for a fully initialized viewport
pub fn viewport_radius_km(viewport: &Viewport) -> f64 {
    // Both bounds are present, so this never falls back
    radius_km(Some(viewport.center), Some(viewport.north_east)).unwrap_or(0.0)
}
