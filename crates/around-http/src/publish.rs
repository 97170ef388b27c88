use async_trait::async_trait;
use around_core::error::{AroundError, Result};
use around_core::models::{AuthCredential, NewPostDraft};
use around_core::ports::PostPublisher;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};

use crate::join_url;

/// Publishes new posts as multipart uploads to `{api_root}/post`
pub struct HttpPostPublisher {
    api_root: String,
    auth_prefix: String,
    client: reqwest::Client,
}

impl HttpPostPublisher {
    pub fn new(api_root: impl Into<String>, auth_prefix: impl Into<String>) -> Self {
        Self::with_client(api_root, auth_prefix, reqwest::Client::new())
    }

    pub fn with_client(
        api_root: impl Into<String>,
        auth_prefix: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self { api_root: api_root.into(), auth_prefix: auth_prefix.into(), client }
    }

    fn form(draft: &NewPostDraft) -> Form {
        let image =
            Part::bytes(draft.image.bytes.clone()).file_name(draft.image.file_name.clone());

        Form::new()
            .text("lat", draft.position.latitude.to_string())
            .text("lon", draft.position.longitude.to_string())
            .text("message", draft.message.clone())
            .part("image", image)
    }
}

#[async_trait]
impl PostPublisher for HttpPostPublisher {
    async fn publish(&self, draft: &NewPostDraft, credential: &AuthCredential) -> Result<()> {
        let url = join_url(&self.api_root, "post")?;
        tracing::debug!(
            url = %url,
            image_bytes = draft.image.bytes.len(),
            "Publishing post"
        );

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, credential.authorization_header(&self.auth_prefix))
            .multipart(Self::form(draft))
            .send()
            .await
            .map_err(|e| AroundError::Ingest {
                reason: format!("Failed to reach {}: {}", self.api_root, e),
            })?;

        let status = response.status();
        // The body is opaque text; it only matters for diagnostics
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(AroundError::Ingest {
                reason: format!("Backend responded {}: {}", status.as_u16(), body.trim()),
            });
        }

        Ok(())
    }
}
