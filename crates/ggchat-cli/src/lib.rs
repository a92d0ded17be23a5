//! Command-line adapter for ggchat.
//!
//! Thin presentation layer over [`ggchat_core::ChatCore`]: the parser and
//! handlers live here, all wiring happens in [`bootstrap`].
#![deny(unused_crate_dependencies)]

// Used by the binary entry point only.
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod handlers;
pub mod parser;

pub use bootstrap::{CliContext, CliOverrides, bootstrap};
pub use commands::Commands;
pub use parser::Cli;
