//! Topic command implementation

use super::render_discovery;
use crate::cli::TopicArgs;
use crate::context::AppContext;
use crate::output::OutputWriter;
use crate::progress::DiscoveryProgress;
use anyhow::Result;
use around_core::models::Topic;
use around_discovery::UnsupportedProbe;
use std::sync::Arc;

pub async fn execute(args: TopicArgs, context: &AppContext, output: &OutputWriter) -> Result<()> {
    let coordinator = context.discovery(Arc::new(UnsupportedProbe), Topic::default()).await?;

    let progress = DiscoveryProgress::watch(coordinator.clone(), !output.is_json());
    let state = coordinator.set_topic(args.topic).await;
    progress.finish();

    render_discovery(&state, output, args.geojson)
}
