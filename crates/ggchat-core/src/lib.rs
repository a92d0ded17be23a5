#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod busy;
pub mod domain;
pub mod error;
pub mod paths;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    ArtifactDescriptor, Conversation, DownloadState, DownloadTask, FormatCatalog, Message,
    MessageRole, ModelFormat, DEFAULT_SYSTEM_PROMPT, MODEL_FILE_EXTENSION,
};
pub use error::{ChatError, ChatResult};
pub use ports::{
    ArtifactFetcher, CompletionRequest, EngineConfig, EngineContext, EngineError, InferenceEngine,
    ProgressObserver, RegistryClient,
};
pub use services::{
    ChatCore, ConversationSession, CoreSnapshot, GenerationPolicy, LifecycleState, ModelLifecycle,
};
