use async_trait::async_trait;
use around_core::error::{AroundError, Result};
use around_core::models::{AuthCredential, Endpoint, GeoPosition, Post, Topic};
use around_core::ports::NearbyQuery;
use reqwest::header::AUTHORIZATION;
use reqwest::Url;

use crate::join_url;

/// Nearby-content client for the `search` and `cluster` endpoints
pub struct HttpQueryClient {
    /// Base URL of the backend (e.g., "http://localhost:8080")
    api_root: String,

    /// Scheme placed before the token in the Authorization header
    auth_prefix: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpQueryClient {
    /// Create a new query client
    pub fn new(api_root: impl Into<String>, auth_prefix: impl Into<String>) -> Self {
        Self::with_client(api_root, auth_prefix, reqwest::Client::new())
    }

    /// Create a query client sharing an existing connection pool
    pub fn with_client(
        api_root: impl Into<String>,
        auth_prefix: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self { api_root: api_root.into(), auth_prefix: auth_prefix.into(), client }
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Build `{api_root}/{endpoint}?lat=..&lon=..&range=..&term=..`
    pub fn query_url(
        &self,
        endpoint: Endpoint,
        position: GeoPosition,
        radius_km: f64,
        topic: Topic,
    ) -> Result<Url> {
        let mut url = join_url(&self.api_root, endpoint.path())?;
        url.query_pairs_mut()
            .append_pair("lat", &position.latitude.to_string())
            .append_pair("lon", &position.longitude.to_string())
            .append_pair("range", &radius_km.to_string())
            .append_pair("term", topic.as_str());
        Ok(url)
    }
}

#[async_trait]
impl NearbyQuery for HttpQueryClient {
    async fn query_nearby(
        &self,
        endpoint: Endpoint,
        position: GeoPosition,
        radius_km: f64,
        topic: Topic,
        credential: &AuthCredential,
    ) -> Result<Vec<Post>> {
        let url = self.query_url(endpoint, position, radius_km, topic)?;
        tracing::debug!(url = %url, "Querying nearby posts");

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, credential.authorization_header(&self.auth_prefix))
            .send()
            .await
            .map_err(|e| AroundError::Transport {
                reason: format!("Failed to reach {}: {}", self.api_root, e),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| AroundError::Transport {
            reason: format!("Failed to read response body: {}", e),
        })?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Nearby query rejected");
            return Err(AroundError::Query { status: status.as_u16(), body });
        }

        let posts = parse_posts(&body)?;
        tracing::debug!(count = posts.len(), endpoint = endpoint.path(), "Nearby query succeeded");
        Ok(posts)
    }
}

/// Decode a successful response body
///
/// An empty body or JSON `null` is an empty result, never an error.
pub fn parse_posts(body: &str) -> Result<Vec<Post>> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let posts: Option<Vec<Post>> = serde_json::from_str(body)?;
    Ok(posts.unwrap_or_default())
}
