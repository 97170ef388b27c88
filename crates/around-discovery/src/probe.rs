//! Geolocation probes that need no platform service.

use async_trait::async_trait;
use around_core::error::{AroundError, Result};
use around_core::models::{GeoOptions, GeoPosition};
use around_core::ports::GeolocationProbe;

/// Probe answering with a fixed position, e.g. one given on the command line
///
/// With no position configured it behaves like a platform without
/// geolocation support.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    position: Option<GeoPosition>,
}

impl StaticProbe {
    pub fn new(position: Option<GeoPosition>) -> Self {
        Self { position }
    }

    pub fn at(position: GeoPosition) -> Self {
        Self::new(Some(position))
    }
}

#[async_trait]
impl GeolocationProbe for StaticProbe {
    async fn acquire(&self, _options: &GeoOptions) -> Result<GeoPosition> {
        self.position.ok_or(AroundError::GeolocationUnsupported)
    }
}

/// Probe for platforms without geolocation
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedProbe;

#[async_trait]
impl GeolocationProbe for UnsupportedProbe {
    async fn acquire(&self, _options: &GeoOptions) -> Result<GeoPosition> {
        Err(AroundError::GeolocationUnsupported)
    }
}
