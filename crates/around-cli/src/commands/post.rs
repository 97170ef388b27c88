//! Post command implementation

use super::render_discovery;
use crate::cli::PostArgs;
use crate::context::AppContext;
use crate::errors;
use crate::output::{ConsoleNotifier, OutputWriter};
use anyhow::{Context, Result};
use around_core::models::{ImageUpload, Topic};
use around_discovery::{PostIngestCoordinator, UnsupportedProbe};
use dialoguer::Input;
use std::path::Path;
use std::sync::Arc;

pub async fn execute(args: PostArgs, context: &AppContext, output: &OutputWriter) -> Result<()> {
    let image = read_image(&args.image).await?;

    let message = match args.message {
        Some(message) => message,
        None => Input::<String>::new()
            .with_prompt("Message")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read the post message")?,
    };

    let credential = context.credential().await?;
    let discovery = context.discovery(Arc::new(UnsupportedProbe), Topic::default()).await?;

    let ingest = PostIngestCoordinator::new(
        context.store.clone(),
        context.publisher(),
        Arc::new(ConsoleNotifier::new(*output)),
    )
    .with_jitter(context.config.jitter_degrees.value)
    .with_discovery(discovery.clone());

    let draft = ingest.prepare(message, image).await?;
    ingest.submit(draft, &credential).await?;

    // The notifier already reported the outcome in JSON mode
    if output.is_json() {
        return Ok(());
    }

    render_discovery(&discovery.state(), output, false)
}

async fn read_image(path: &Path) -> Result<ImageUpload> {
    if !path.is_file() {
        return Err(errors::image_not_found(&path.display().to_string()).into());
    }

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    Ok(ImageUpload::new(file_name, bytes))
}
