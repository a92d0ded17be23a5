//! Inference engine adapter backed by a `llama-server` child process.
//!
//! Implements the core engine port: `construct` spawns `llama-server`
//! against the model file and waits for its health endpoint, the returned
//! context serves completions over the OpenAI-compatible HTTP API, and
//! dropping the context kills the child. The engine itself stays opaque
//! to the core.
#![deny(unused_crate_dependencies)]

mod api;
mod args;
mod engine;

pub use engine::LlamaServerEngine;
