//! CLI entry point.
//!
//! Parses arguments, initializes tracing, composes the core via
//! [`ggchat_cli::bootstrap`], and dispatches to the handlers.

use anyhow::Result;
use clap::Parser;
use ggchat_cli::{Cli, CliOverrides, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = bootstrap(CliOverrides {
        models_dir: cli.models_dir,
        llama_server: cli.llama_server,
    })?;

    match cli.command {
        Commands::Formats => handlers::formats::execute(&ctx),
        Commands::Files { format } => handlers::files::execute(&ctx, &format).await?,
        Commands::Pull { format, file } => handlers::pull::execute(&ctx, &format, &file).await?,
        Commands::Chat { format, file } => handlers::chat::execute(&ctx, &format, &file).await?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
