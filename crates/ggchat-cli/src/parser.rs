//! Top-level argument parser with global options.

use clap::Parser;
use std::path::PathBuf;

use crate::commands::Commands;

/// Command-line interface for chatting with local GGUF models.
#[derive(Parser)]
#[command(name = "ggchat")]
#[command(about = "Download and chat with local GGUF models", version)]
pub struct Cli {
    /// Override the models directory for this invocation
    #[arg(long = "models-dir", global = true)]
    pub models_dir: Option<PathBuf>,

    /// Path to the llama-server binary
    #[arg(
        long = "llama-server",
        global = true,
        env = "GGCHAT_LLAMA_SERVER",
        default_value = "llama-server"
    )]
    pub llama_server: PathBuf,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_args_parse() {
        let cli = Cli::parse_from([
            "ggchat",
            "--verbose",
            "--models-dir",
            "/tmp/models",
            "formats",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.models_dir, Some(PathBuf::from("/tmp/models")));
        assert!(matches!(cli.command, Commands::Formats));
    }

    #[test]
    fn pull_takes_format_and_file() {
        let cli = Cli::parse_from([
            "ggchat",
            "pull",
            "Llama-3.2-1B-Instruct",
            "Llama-3.2-1B-Instruct-Q2_K.gguf",
        ]);
        match cli.command {
            Commands::Pull { format, file } => {
                assert_eq!(format, "Llama-3.2-1B-Instruct");
                assert_eq!(file, "Llama-3.2-1B-Instruct-Q2_K.gguf");
            }
            _ => panic!("expected pull"),
        }
    }
}
