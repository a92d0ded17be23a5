//! Domain types: pure data, no I/O.

mod catalog;
mod chat;
mod download;

pub use catalog::{
    default_stop_markers, ArtifactDescriptor, FormatCatalog, ModelFormat, MODEL_FILE_EXTENSION,
};
pub use chat::{Conversation, Message, MessageRole, DEFAULT_SYSTEM_PROMPT};
pub use download::{DownloadState, DownloadTask};
