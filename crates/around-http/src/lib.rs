//! Around HTTP - Backend and platform adapters over HTTP
//!
//! Adapters for the nearby-content backend (`NearbyQuery`, `PostPublisher`)
//! and an IP-based `GeolocationProbe`, all built on `reqwest`.

pub mod probe;
pub mod publish;
pub mod query;

pub use probe::IpGeolocationProbe;
pub use publish::HttpPostPublisher;
pub use query::{parse_posts, HttpQueryClient};

use around_core::error::{AroundError, Result};
use reqwest::Url;

/// Join an API root and a path segment
pub(crate) fn join_url(api_root: &str, path: &str) -> Result<Url> {
    let raw = format!("{}/{}", api_root.trim_end_matches('/'), path);
    Url::parse(&raw).map_err(|e| AroundError::ConfigInvalid {
        key: "api_root".to_string(),
        reason: format!("Invalid URL '{}': {}", raw, e),
    })
}
