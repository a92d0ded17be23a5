//! Inference engine port.
//!
//! The engine is an opaque capability: it accepts a model file path and a
//! configuration and returns a context handle supporting one completion
//! operation. Releasing a context happens through `Drop`.

use crate::domain::Message;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Fixed engine policy values. Not user-tunable in this core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Context window size in tokens
    pub context_length: u32,
    /// Lock model memory to avoid paging
    pub use_mlock: bool,
    /// Number of layers offloaded to the accelerator
    pub gpu_layers: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            context_length: 2048,
            use_mlock: true,
            gpu_layers: 1,
        }
    }
}

/// One completion request over the full ordered history.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// The literal prompt context, system seed first
    pub messages: Vec<Message>,
    /// Generation ceiling in tokens
    pub max_tokens: u32,
    /// Literal strings whose appearance ends generation
    pub stop_markers: Vec<String>,
}

/// Errors from the engine boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Context construction failed.
    #[error("{0}")]
    Load(String),

    /// The completion call faulted.
    #[error("{0}")]
    Completion(String),
}

/// Port trait for constructing inference contexts.
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Construct a context for the model file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Load`] with the engine's diagnostic message.
    async fn construct(
        &self,
        path: &Path,
        config: &EngineConfig,
    ) -> Result<Box<dyn EngineContext>, EngineError>;
}

/// A live inference context. Dropping the handle releases the engine's
/// native resources.
#[async_trait]
pub trait EngineContext: Send + Sync {
    /// Run one completion over the request's history.
    ///
    /// An empty returned string means the engine produced no text; the
    /// caller decides how to surface that.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Completion`] on timeout or internal fault.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, EngineError>;
}
