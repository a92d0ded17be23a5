//! `files` command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;

/// Query the registry and print the model files for one format.
pub async fn execute(ctx: &CliContext, format: &str) -> Result<()> {
    ctx.core().select_format(format)?;
    let artifacts = ctx.core().refresh_artifacts().await?;

    if artifacts.is_empty() {
        println!("No model files published for {format}.");
        return Ok(());
    }
    for artifact in artifacts {
        println!("{}", artifact.file_name);
    }
    Ok(())
}
