//! Port trait definitions
//!
//! These traits define the platform and backend capabilities the coordinators
//! depend on. Adapters live in `around-store`, `around-http`, and
//! `around-discovery`.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AuthCredential, Endpoint, GeoOptions, GeoPosition, NewPostDraft, Post, Topic};

/// Port for the last known device position
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Last persisted position, `None` if no location is known yet
    async fn load_position(&self) -> Result<Option<GeoPosition>>;

    /// Overwrite the persisted position
    async fn save_position(&self, position: GeoPosition) -> Result<()>;
}

/// Port for one-shot device geolocation
#[async_trait]
pub trait GeolocationProbe: Send + Sync {
    /// Acquire the current position
    ///
    /// Fails with `GeolocationUnsupported` when the platform has no
    /// geolocation capability and `GeolocationFailed` on denial, timeout or
    /// unavailability.
    async fn acquire(&self, options: &GeoOptions) -> Result<GeoPosition>;
}

/// Port for the nearby-content backend
#[async_trait]
pub trait NearbyQuery: Send + Sync {
    /// Query posts within `radius_km` of `position`
    ///
    /// An empty or null response body yields an empty Vec.
    async fn query_nearby(
        &self,
        endpoint: Endpoint,
        position: GeoPosition,
        radius_km: f64,
        topic: Topic,
        credential: &AuthCredential,
    ) -> Result<Vec<Post>>;
}

/// Port for publishing new posts
#[async_trait]
pub trait PostPublisher: Send + Sync {
    /// Publish a prepared draft as-is
    async fn publish(&self, draft: &NewPostDraft, credential: &AuthCredential) -> Result<()>;
}

/// Port for the map display component
pub trait MapViewport: Send + Sync {
    /// Current map center, `None` until the map is initialized
    fn center(&self) -> Option<GeoPosition>;

    /// North-east corner of the visible bounds
    fn north_east(&self) -> Option<GeoPosition>;
}

/// Port for transient user-facing notifications
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);

    fn error(&self, message: &str);
}
