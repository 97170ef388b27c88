//! Geographic position types shared across all around crates.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AroundError, Result};

/// A WGS 84 position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPosition {
    /// Create a validated position
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let position = Self { latitude, longitude };
        if position.is_valid() {
            Ok(position)
        } else {
            Err(AroundError::InvalidPosition { latitude, longitude })
        }
    }

    /// Both coordinates finite and inside their ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// The visible map region, described by its center and north-east corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: GeoPosition,
    pub north_east: GeoPosition,
}

impl Viewport {
    pub fn new(center: GeoPosition, north_east: GeoPosition) -> Self {
        Self { center, north_east }
    }
}

/// Options controlling a one-shot geolocation fix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoOptions {
    /// Ask the platform for its most accurate source
    pub enable_high_accuracy: bool,

    /// Give up on a fix after this long
    pub timeout: Duration,

    /// Accept a cached fix no older than this
    pub maximum_age: Duration,
}

impl Default for GeoOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: false,
            timeout: Duration::from_millis(27_000),
            maximum_age: Duration::from_millis(3_600_000),
        }
    }
}
