//! New post submission.

use around_core::config::DEFAULT_JITTER_DEGREES;
use around_core::error::{AroundError, Result};
use around_core::models::{AuthCredential, ImageUpload, NewPostDraft};
use around_core::ports::{LocationStore, Notifier, PostPublisher};
use around_geo::apply_jitter;
use std::sync::Arc;

use crate::coordinator::DiscoveryCoordinator;

const POST_CREATED: &str = "Create a post successfully";
const POST_FAILED: &str = "Failed to create a post";

/// Prepares and publishes geo-tagged posts
///
/// The published coordinates are randomly displaced so the exact device
/// position never leaves the client.
pub struct PostIngestCoordinator {
    store: Arc<dyn LocationStore>,
    publisher: Arc<dyn PostPublisher>,
    notifier: Arc<dyn Notifier>,
    jitter_degrees: f64,
    discovery: Option<Arc<DiscoveryCoordinator>>,
}

impl PostIngestCoordinator {
    pub fn new(
        store: Arc<dyn LocationStore>,
        publisher: Arc<dyn PostPublisher>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self { store, publisher, notifier, jitter_degrees: DEFAULT_JITTER_DEGREES, discovery: None }
    }

    pub fn with_jitter(mut self, degrees: f64) -> Self {
        self.jitter_degrees = degrees;
        self
    }

    /// Discovery session to refresh after each successful post
    pub fn with_discovery(mut self, discovery: Arc<DiscoveryCoordinator>) -> Self {
        self.discovery = Some(discovery);
        self
    }

    /// Build a draft at the persisted location
    pub async fn prepare(
        &self,
        message: impl Into<String>,
        image: ImageUpload,
    ) -> Result<NewPostDraft> {
        let position = self.store.load_position().await?.ok_or(AroundError::LocationUnknown)?;
        Ok(NewPostDraft::new(position, message, image))
    }

    /// Jitter, publish and report a draft
    ///
    /// On success the attached discovery session is refreshed around the
    /// persisted location. On failure no discovery state changes.
    pub async fn submit(&self, draft: NewPostDraft, credential: &AuthCredential) -> Result<()> {
        let mut draft = draft;
        draft.position =
            apply_jitter(draft.position, self.jitter_degrees, &mut rand::thread_rng());

        tracing::debug!(
            latitude = draft.position.latitude,
            longitude = draft.position.longitude,
            "Submitting post"
        );

        if let Err(e) = self.publisher.publish(&draft, credential).await {
            tracing::warn!(error = %e, "Post submission failed");
            self.notifier.error(POST_FAILED);
            return Err(match e {
                AroundError::Ingest { .. } => e,
                other => AroundError::Ingest { reason: other.to_string() },
            });
        }

        tracing::info!(file = %draft.image.file_name, "Post created");
        self.notifier.success(POST_CREATED);

        if let Some(discovery) = &self.discovery {
            discovery.refresh(None, None).await;
        }

        Ok(())
    }
}
