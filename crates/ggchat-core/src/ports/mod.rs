//! Port traits: the seams between the core and its adapters.

mod engine;
mod registry;
mod transfer;

pub use engine::{CompletionRequest, EngineConfig, EngineContext, EngineError, InferenceEngine};
pub use registry::RegistryClient;
pub use transfer::{ArtifactFetcher, ProgressObserver};
