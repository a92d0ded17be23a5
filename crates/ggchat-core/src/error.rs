//! The core error taxonomy.
//!
//! Every fallible operation in this crate (and in the adapter crates, once
//! mapped at the port boundary) settles into one of these variants. None of
//! them are fatal: each leaves the affected component in a well-defined idle
//! state so the caller can retry the specific action.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for core operations.
pub type ChatResult<T> = Result<T, ChatError>;

/// Errors surfaced by ggchat core operations.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The requested format label is not in the catalog. Non-retriable.
    #[error("Unknown model format: '{label}'")]
    UnknownFormat {
        /// The label that was looked up
        label: String,
    },

    /// The model registry could not be reached. Retriable by re-invocation.
    #[error("Model registry unreachable: {message}")]
    RegistryUnreachable {
        /// Transport-level failure description
        message: String,
    },

    /// The registry response is missing the expected file listing.
    /// Likely an API contract change; non-retriable without intervention.
    #[error("Malformed registry response: {message}")]
    MalformedResponse {
        /// What was missing or invalid
        message: String,
    },

    /// The artifact transfer was interrupted or refused. The partially
    /// written destination file is left in place and must not be treated
    /// as a usable model.
    #[error("Artifact transfer failed: {message}")]
    TransferFailed {
        /// Network or status failure description
        message: String,
    },

    /// A local filesystem write failed (out of space, permissions, ...).
    #[error("Local storage failure: {message}")]
    StorageFailure {
        /// I/O failure description
        message: String,
    },

    /// The model file does not exist at the given path. No engine call
    /// was attempted.
    #[error("Model file does not exist: {path}")]
    ModelFileMissing {
        /// The path that was checked
        path: PathBuf,
    },

    /// The inference engine failed to construct a context from the model.
    #[error("Engine failed to load model: {message}")]
    EngineLoadFailed {
        /// The engine's diagnostic message
        message: String,
    },

    /// A completion was requested while no model context is loaded.
    #[error("No model is loaded")]
    ModelNotLoaded,

    /// The user input was blank after trimming.
    #[error("Message input is empty")]
    EmptyInput,

    /// The engine returned an empty or missing completion. The dangling
    /// User message remains in history; a retry extends history further.
    #[error("No response from the model")]
    NoCompletion,

    /// The engine call itself faulted (timeout, internal error).
    #[error("Engine completion failed: {message}")]
    EngineCompletionFailed {
        /// The engine's diagnostic message
        message: String,
    },

    /// Another invocation of the same operation is still in flight.
    /// Advisory; self-clears once that operation settles.
    #[error("Operation already in flight: {operation}")]
    Busy {
        /// Name of the guarded operation
        operation: &'static str,
    },
}

impl ChatError {
    /// Whether re-invoking the failed operation without any other change
    /// can reasonably be expected to succeed.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(
            self,
            Self::RegistryUnreachable { .. }
                | Self::TransferFailed { .. }
                | Self::NoCompletion
                | Self::EngineCompletionFailed { .. }
                | Self::Busy { .. }
        )
    }
}
