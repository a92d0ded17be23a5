#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod url;

// ============================================================================
// Public API
// ============================================================================

pub use client::{DefaultRegistryClient, HfRegistryClient};
pub use config::HfClientConfig;
