//! Nearby command implementation

use super::render_discovery;
use crate::cli::NearbyArgs;
use crate::context::AppContext;
use crate::output::OutputWriter;
use crate::progress::DiscoveryProgress;
use anyhow::Result;
use around_discovery::UnsupportedProbe;
use std::sync::Arc;

pub async fn execute(args: NearbyArgs, context: &AppContext, output: &OutputWriter) -> Result<()> {
    let coordinator = context.discovery(Arc::new(UnsupportedProbe), args.topic).await?;

    let progress = DiscoveryProgress::watch(coordinator.clone(), !output.is_json());
    let state = coordinator.refresh(args.at, args.radius).await;
    progress.finish();

    render_discovery(&state, output, args.geojson)
}
