use around_core::models::{GeoPosition, Viewport};
use around_core::ports::MapViewport;

/// Map viewport with explicitly supplied bounds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StaticViewport {
    pub center: Option<GeoPosition>,
    pub north_east: Option<GeoPosition>,
}

impl StaticViewport {
    pub fn new(center: Option<GeoPosition>, north_east: Option<GeoPosition>) -> Self {
        Self { center, north_east }
    }
}

impl From<Viewport> for StaticViewport {
    fn from(viewport: Viewport) -> Self {
        Self::new(Some(viewport.center), Some(viewport.north_east))
    }
}

impl MapViewport for StaticViewport {
    fn center(&self) -> Option<GeoPosition> {
        self.center
    }

    fn north_east(&self) -> Option<GeoPosition> {
        self.north_east
    }
}
