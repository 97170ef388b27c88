//! Command implementations

mod config;
mod map;
mod nearby;
mod post;
mod start;
mod token;
mod topic;

use crate::cli::{Cli, Commands};
use crate::context::AppContext;
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::{posts_to_feature_collection, DiscoveryOutput, PostRow};
use anyhow::Result;
use around_core::models::{DiscoveryState, DiscoveryStatus};

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.global.json);
    let context = AppContext::load(&cli.global)?;

    match cli.command {
        Commands::Start(args) => start::execute(args, &context, &output).await,
        Commands::Nearby(args) => nearby::execute(args, &context, &output).await,
        Commands::Map(args) => map::execute(args, &context, &output).await,
        Commands::Topic(args) => topic::execute(args, &context, &output).await,
        Commands::Post(args) => post::execute(args, &context, &output).await,
        Commands::Token(args) => token::execute(args, &context, &output).await,
        Commands::Config => config::execute(&context, &output),
    }
}

/// Print a discovery state; fails when the state is an error
fn render_discovery(state: &DiscoveryState, output: &OutputWriter, geojson: bool) -> Result<()> {
    if geojson {
        output.data(&posts_to_feature_collection(&state.posts))?;
    } else if output.is_json() {
        if state.status == DiscoveryStatus::Error {
            output.data(&serde_json::json!({
                "status": "error",
                "data": DiscoveryOutput::from(state),
            }))?;
        } else {
            output.result(DiscoveryOutput::from(state))?;
        }
    } else {
        output.section(format!("Posts ({})", state.topic));
        output.kv("Images", state.image_posts().count());
        output.kv("Videos", state.video_posts().count());

        if state.posts.is_empty() {
            output.info("No posts found nearby");
        } else {
            output.table(state.posts.iter().map(PostRow::from).collect())?;
        }
    }

    if state.status == DiscoveryStatus::Error {
        let message = state.error_message.as_deref().unwrap_or("Unknown error");
        return Err(discovery_error(message).into());
    }

    Ok(())
}

fn discovery_error(message: &str) -> errors::CliError {
    if message == around_core::error::AroundError::LocationUnknown.to_string() {
        errors::location_unknown()
    } else {
        errors::discovery_failed(message)
    }
}
