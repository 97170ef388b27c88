//! Discovery session coordination.
//!
//! `DiscoveryCoordinator` owns the session's `DiscoveryState`. Every refresh
//! takes a ticket from a generation counter; a response is applied only while
//! its ticket is the latest, so a slow earlier request can never overwrite a
//! newer result. Superseded requests are not cancelled, only ignored.

use around_core::config::DEFAULT_RADIUS_KM;
use around_core::error::AroundError;
use around_core::models::{
    AuthCredential, DiscoveryState, DiscoveryStatus, GeoOptions, GeoPosition, Topic,
};
use around_core::ports::{GeolocationProbe, LocationStore, MapViewport, NearbyQuery};
use around_geo::radius_km;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Message shown when the probe could not produce a fix
pub const LOCATION_FAILED: &str = "Failed to get user location";

/// Coordinates location, viewport and topic changes into nearby queries
pub struct DiscoveryCoordinator {
    store: Arc<dyn LocationStore>,
    probe: Arc<dyn GeolocationProbe>,
    query: Arc<dyn NearbyQuery>,
    credential: AuthCredential,
    options: GeoOptions,
    default_radius_km: f64,
    state: RwLock<DiscoveryState>,
    generation: AtomicU64,
}

impl DiscoveryCoordinator {
    /// Create a coordinator in the `Idle` state with the `Around` topic
    pub fn new(
        store: Arc<dyn LocationStore>,
        probe: Arc<dyn GeolocationProbe>,
        query: Arc<dyn NearbyQuery>,
        credential: AuthCredential,
    ) -> Self {
        Self {
            store,
            probe,
            query,
            credential,
            options: GeoOptions::default(),
            default_radius_km: DEFAULT_RADIUS_KM,
            state: RwLock::new(DiscoveryState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Initial topic, before any query runs
    pub fn with_topic(self, topic: Topic) -> Self {
        self.write_state().topic = topic;
        self
    }

    pub fn with_geo_options(mut self, options: GeoOptions) -> Self {
        self.options = options;
        self
    }

    /// Radius used when a refresh supplies none
    pub fn with_default_radius(mut self, radius_km: f64) -> Self {
        self.default_radius_km = radius_km;
        self
    }

    /// Snapshot of the current state
    pub fn state(&self) -> DiscoveryState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn topic(&self) -> Topic {
        self.state.read().unwrap_or_else(PoisonError::into_inner).topic
    }

    /// Start the session: acquire a fix, persist it, then query around it
    pub async fn start(&self) -> DiscoveryState {
        tracing::info!("Starting discovery session");
        self.locate().await
    }

    /// Re-run geolocation after a failure
    pub async fn retry_location(&self) -> DiscoveryState {
        tracing::info!("Retrying geolocation");
        self.locate().await
    }

    /// Query nearby posts
    ///
    /// Without a position the last persisted location is used; without a
    /// usable radius the default radius applies. On failure the previous
    /// posts stay in place.
    pub async fn refresh(
        &self,
        position: Option<GeoPosition>,
        radius_km: Option<f64>,
    ) -> DiscoveryState {
        let ticket = self.next_ticket();
        let topic = self.topic();
        self.apply(ticket, |state| state.status = DiscoveryStatus::LoadingPosts);

        let position = match position {
            Some(position) => position,
            None => match self.store.load_position().await {
                Ok(Some(position)) => position,
                Ok(None) => {
                    self.fail(ticket, AroundError::LocationUnknown.to_string());
                    return self.state();
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read persisted location");
                    self.fail(ticket, e.to_string());
                    return self.state();
                }
            },
        };

        let radius = radius_km
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(self.default_radius_km);
        let endpoint = topic.endpoint();

        tracing::debug!(
            ticket,
            latitude = position.latitude,
            longitude = position.longitude,
            radius_km = radius,
            topic = %topic,
            "Refreshing nearby posts"
        );

        let outcome =
            self.query.query_nearby(endpoint, position, radius, topic, &self.credential).await;

        let applied = match outcome {
            Ok(posts) => {
                let count = posts.len();
                let applied = self.apply(ticket, |state| {
                    state.status = DiscoveryStatus::Ready;
                    state.error_message = None;
                    state.posts = posts;
                });
                if applied {
                    tracing::info!(count, topic = %topic, "Nearby posts loaded");
                }
                applied
            }
            Err(e) => {
                tracing::warn!(error = %e, "Nearby query failed");
                self.fail(ticket, query_error_message(e))
            }
        };

        if !applied {
            tracing::debug!(ticket, "Discarded superseded query result");
        }

        self.state()
    }

    /// Switch topic and re-query around the persisted location
    pub async fn set_topic(&self, topic: Topic) -> DiscoveryState {
        self.write_state().topic = topic;
        tracing::info!(topic = %topic, "Topic changed");
        self.refresh(None, None).await
    }

    /// Re-query for the visible map region after a pan or zoom
    ///
    /// Uses the viewport center and its radius, never the persisted
    /// location. Does nothing while the map has no center.
    pub async fn on_viewport_changed(&self, viewport: &dyn MapViewport) -> DiscoveryState {
        let Some(center) = viewport.center() else {
            tracing::debug!("Viewport not initialized; skipping refresh");
            return self.state();
        };

        let radius = radius_km(Some(center), viewport.north_east());
        self.refresh(Some(center), radius).await
    }

    async fn locate(&self) -> DiscoveryState {
        let ticket = self.next_ticket();
        self.apply(ticket, |state| {
            state.status = DiscoveryStatus::LoadingLocation;
            state.error_message = None;
        });

        let position = match self.probe.acquire(&self.options).await {
            Ok(position) => position,
            Err(e) => {
                tracing::warn!(error = %e, "Geolocation failed");
                self.fail(ticket, location_error_message(e));
                return self.state();
            }
        };

        if let Err(e) = self.store.save_position(position).await {
            tracing::error!(error = %e, "Failed to persist location");
            self.fail(ticket, e.to_string());
            return self.state();
        }

        self.refresh(None, None).await
    }

    fn next_ticket(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Mutate the state if `ticket` is still the latest; returns whether it was
    fn apply(&self, ticket: u64, update: impl FnOnce(&mut DiscoveryState)) -> bool {
        let mut state = self.write_state();
        if self.generation.load(Ordering::SeqCst) != ticket {
            return false;
        }
        update(&mut state);
        true
    }

    fn fail(&self, ticket: u64, message: String) -> bool {
        self.apply(ticket, |state| {
            state.status = DiscoveryStatus::Error;
            state.error_message = Some(message);
        })
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, DiscoveryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Backend error bodies are shown verbatim
fn query_error_message(err: AroundError) -> String {
    match err {
        AroundError::Query { body, .. } => body,
        other => other.to_string(),
    }
}

fn location_error_message(err: AroundError) -> String {
    match err {
        AroundError::GeolocationUnsupported => err.to_string(),
        AroundError::GeolocationFailed { .. } => LOCATION_FAILED.to_string(),
        other => other.to_string(),
    }
}
