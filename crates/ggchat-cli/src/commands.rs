//! Subcommand definitions.

use clap::Subcommand;

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// List the supported model formats
    Formats,

    /// List the downloadable model files for a format
    Files {
        /// Format label, as shown by `ggchat formats`
        format: String,
    },

    /// Download one model file for a format
    Pull {
        /// Format label, as shown by `ggchat formats`
        format: String,
        /// File name, as shown by `ggchat files`
        file: String,
    },

    /// Chat interactively with a downloaded model file
    Chat {
        /// Format label, as shown by `ggchat formats`
        format: String,
        /// File name of a previously pulled model
        file: String,
    },
}
