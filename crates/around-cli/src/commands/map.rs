//! Map command implementation

use super::render_discovery;
use crate::cli::MapArgs;
use crate::context::AppContext;
use crate::output::OutputWriter;
use crate::progress::DiscoveryProgress;
use anyhow::Result;
use around_core::ports::MapViewport;
use around_discovery::{StaticViewport, UnsupportedProbe};
use around_geo::radius_km;
use std::sync::Arc;

pub async fn execute(args: MapArgs, context: &AppContext, output: &OutputWriter) -> Result<()> {
    let viewport = StaticViewport::new(args.center, args.north_east);

    let Some(center) = viewport.center() else {
        output.info("Map not initialized; nothing to refresh");
        return Ok(());
    };

    if !output.is_json() && !args.geojson {
        output.section("Viewport");
        output.kv("Center", format!("{:.5}, {:.5}", center.latitude, center.longitude));
        match radius_km(Some(center), viewport.north_east()) {
            Some(radius) => output.kv("Radius", format!("{:.3} km", radius)),
            None => output.kv(
                "Radius",
                format!("{} km (default)", context.config.default_radius_km.value),
            ),
        }
    }

    let coordinator = context.discovery(Arc::new(UnsupportedProbe), args.topic).await?;

    let progress = DiscoveryProgress::watch(coordinator.clone(), !output.is_json());
    let state = coordinator.on_viewport_changed(&viewport).await;
    progress.finish();

    render_discovery(&state, output, args.geojson)
}
