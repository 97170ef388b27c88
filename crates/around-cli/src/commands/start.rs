//! Start command implementation

use super::render_discovery;
use crate::cli::StartArgs;
use crate::context::AppContext;
use crate::errors;
use crate::output::OutputWriter;
use crate::progress::DiscoveryProgress;
use anyhow::Result;
use around_core::error::AroundError;
use around_core::models::{DiscoveryState, DiscoveryStatus};
use around_discovery::coordinator::LOCATION_FAILED;

pub async fn execute(args: StartArgs, context: &AppContext, output: &OutputWriter) -> Result<()> {
    let probe = context.probe(args.at);
    let coordinator = context.discovery(probe, args.topic).await?;

    let progress = DiscoveryProgress::watch(coordinator.clone(), !output.is_json());
    let mut state = coordinator.start().await;

    let mut attempts = 0;
    while location_failure(&state).is_some() && attempts < args.retries {
        attempts += 1;
        tracing::debug!(attempt = attempts, "Geolocation retry");
        state = coordinator.retry_location().await;
    }
    progress.finish();

    if let Some(message) = location_failure(&state) {
        return Err(errors::geolocation_failed(message).into());
    }

    if attempts > 0 {
        output.warning(format!("Located after {} retries", attempts));
    }

    render_discovery(&state, output, args.geojson)
}

/// Error message of a state that failed while locating the device
fn location_failure(state: &DiscoveryState) -> Option<&str> {
    if state.status != DiscoveryStatus::Error {
        return None;
    }

    let message = state.error_message.as_deref()?;
    let unsupported = AroundError::GeolocationUnsupported.to_string();
    (message == LOCATION_FAILED || message == unsupported).then_some(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(message: &str) -> DiscoveryState {
        DiscoveryState {
            status: DiscoveryStatus::Error,
            error_message: Some(message.to_string()),
            ..DiscoveryState::default()
        }
    }

    #[test]
    fn test_location_failures_are_recognized() {
        assert!(location_failure(&failed("Failed to get user location")).is_some());
        assert!(location_failure(&failed("Your browser does not support geolocation!")).is_some());
    }

    #[test]
    fn test_query_failures_are_not_location_failures() {
        assert!(location_failure(&failed("Invalid token")).is_none());
        assert!(location_failure(&DiscoveryState::default()).is_none());
    }
}
