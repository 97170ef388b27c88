//! IP-based geolocation.
//!
//! Resolves the device position from an IP-geolocation service answering
//! `{"lat": .., "lon": ..}` (ip-api.com compatible). A fix younger than the
//! requested `maximum_age` is served from memory.

use async_trait::async_trait;
use around_core::error::{AroundError, Result};
use around_core::models::{GeoOptions, GeoPosition};
use around_core::ports::GeolocationProbe;
use serde::Deserialize;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

/// Geolocation probe backed by an IP-geolocation HTTP service
pub struct IpGeolocationProbe {
    url: String,
    client: reqwest::Client,
    last_fix: Mutex<Option<(Instant, GeoPosition)>>,
}

impl IpGeolocationProbe {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), client: reqwest::Client::new(), last_fix: Mutex::new(None) }
    }

    fn cached(&self, options: &GeoOptions) -> Option<GeoPosition> {
        let last_fix = self.last_fix.lock().unwrap_or_else(PoisonError::into_inner);
        match *last_fix {
            Some((at, position)) if at.elapsed() < options.maximum_age => Some(position),
            _ => None,
        }
    }

    fn remember(&self, position: GeoPosition) {
        let mut last_fix = self.last_fix.lock().unwrap_or_else(PoisonError::into_inner);
        *last_fix = Some((Instant::now(), position));
    }

    async fn lookup(&self, options: &GeoOptions) -> Result<GeoPosition> {
        let response = self
            .client
            .get(&self.url)
            .timeout(options.timeout)
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() {
                    format!("Timed out after {} ms", options.timeout.as_millis())
                } else {
                    format!("Failed to reach {}: {}", self.url, e)
                };
                AroundError::GeolocationFailed { reason }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AroundError::GeolocationFailed {
                reason: format!("Geolocation service responded {}", status.as_u16()),
            });
        }

        let fix: IpFix = response.json().await.map_err(|e| AroundError::GeolocationFailed {
            reason: format!("Failed to parse geolocation response: {}", e),
        })?;

        if fix.status.as_deref() == Some("fail") {
            return Err(AroundError::GeolocationFailed {
                reason: fix.message.unwrap_or_else(|| "Position unavailable".to_string()),
            });
        }

        match (fix.lat, fix.lon) {
            (Some(lat), Some(lon)) => {
                GeoPosition::new(lat, lon).map_err(|e| AroundError::GeolocationFailed {
                    reason: e.to_string(),
                })
            }
            _ => Err(AroundError::GeolocationFailed {
                reason: "Geolocation response has no coordinates".to_string(),
            }),
        }
    }
}

#[async_trait]
impl GeolocationProbe for IpGeolocationProbe {
    async fn acquire(&self, options: &GeoOptions) -> Result<GeoPosition> {
        if let Some(position) = self.cached(options) {
            tracing::debug!("Reusing cached geolocation fix");
            return Ok(position);
        }

        if options.enable_high_accuracy {
            tracing::debug!("High accuracy requested; IP geolocation has a single accuracy level");
        }

        let position = self.lookup(options).await?;
        self.remember(position);

        tracing::info!(
            latitude = position.latitude,
            longitude = position.longitude,
            "Acquired geolocation fix"
        );
        Ok(position)
    }
}

/// Response from the IP-geolocation service
#[derive(Debug, Deserialize)]
struct IpFix {
    status: Option<String>,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}
