//! Token command implementation

use crate::cli::TokenArgs;
use crate::context::AppContext;
use crate::output::OutputWriter;
use crate::output_types::TokenOutput;
use anyhow::Result;
use around_core::models::AuthCredential;
use around_store::TOKEN_KEY;

pub async fn execute(args: TokenArgs, context: &AppContext, output: &OutputWriter) -> Result<()> {
    let state_file = context.state_path().display().to_string();

    if args.clear {
        context.store.remove(TOKEN_KEY).await?;
        tracing::info!("Cleared stored token");
    } else if let Some(token) = args.value {
        context.store.save_credential(&AuthCredential::new(token)).await?;
        tracing::info!("Stored token");
    }

    let stored = context.store.load_credential().await?.is_some();

    if output.is_json() {
        output.result(TokenOutput { stored, state_file })?;
    } else if stored {
        output.success(format!("Token stored in {}", state_file));
    } else {
        output.info(format!("No token stored in {}", state_file));
    }

    Ok(())
}
