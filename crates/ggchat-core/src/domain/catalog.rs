//! Model format catalog.
//!
//! Maps human-facing format labels to HuggingFace repository identifiers.
//! Entries are defined at process start and never mutated; `resolve` is a
//! pure lookup with no side effects.

use crate::error::ChatError;
use serde::{Deserialize, Serialize};

/// File extension the registry listing is filtered to.
pub const MODEL_FILE_EXTENSION: &str = ".gguf";

/// Stop markers covering the common chat template families.
///
/// The engine halts generation at the first occurrence of any of these.
/// This is a minimum default set; individual formats may override it.
#[must_use]
pub fn default_stop_markers() -> Vec<String> {
    [
        "</s>",
        "<|end|>",
        "user:",
        "assistant:",
        "<|im_end|>",
        "<|eot_id|>",
        "<|end▁of▁sentence|>",
        "<｜end▁of▁sentence｜>",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

/// An immutable catalog entry keyed by its label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFormat {
    /// Human-facing format label (unique within the catalog)
    pub label: String,
    /// Repository identifier understood by the registry (e.g. `org/repo`)
    pub repository_id: String,
    /// Stop markers installed for this format's model family
    pub stop_markers: Vec<String>,
}

impl ModelFormat {
    /// Create an entry with the default stop-marker set.
    pub fn new(label: impl Into<String>, repository_id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            repository_id: repository_id.into(),
            stop_markers: default_stop_markers(),
        }
    }

    /// Replace the stop-marker set for this format.
    #[must_use]
    pub fn with_stop_markers(mut self, markers: Vec<String>) -> Self {
        self.stop_markers = markers;
        self
    }
}

/// A single downloadable artifact reported by the registry.
///
/// Produced per listing request and replaced wholesale on the next one;
/// `file_name` always carries the recognized model-file extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDescriptor {
    /// Display label (currently the file name itself)
    pub label: String,
    /// File name within the repository
    pub file_name: String,
}

impl ArtifactDescriptor {
    /// Create a descriptor labelled by its file name.
    pub fn from_file_name(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        Self {
            label: file_name.clone(),
            file_name,
        }
    }
}

/// Static mapping from format label to repository identifier.
#[derive(Debug, Clone)]
pub struct FormatCatalog {
    entries: Vec<ModelFormat>,
}

impl FormatCatalog {
    /// Build a catalog from explicit entries, preserving definition order.
    #[must_use]
    pub fn new(entries: Vec<ModelFormat>) -> Self {
        Self { entries }
    }

    /// Resolve a label to its catalog entry.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::UnknownFormat`] when the label is absent.
    /// Callers must treat this as non-retriable.
    pub fn resolve(&self, label: &str) -> Result<&ModelFormat, ChatError> {
        self.entries
            .iter()
            .find(|format| format.label == label)
            .ok_or_else(|| ChatError::UnknownFormat {
                label: label.to_string(),
            })
    }

    /// All entries in definition order.
    #[must_use]
    pub fn formats(&self) -> &[ModelFormat] {
        &self.entries
    }

    /// All labels in definition order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|format| format.label.as_str())
    }
}

impl Default for FormatCatalog {
    /// The built-in catalog of instruct-tuned GGUF conversions.
    fn default() -> Self {
        Self::new(vec![
            ModelFormat::new("Llama-3.2-1B-Instruct", "medmekk/Llama-3.2-1B-Instruct.GGUF"),
            ModelFormat::new(
                "DeepSeek-R1-Distill-Qwen-1.5B",
                "medmekk/DeepSeek-R1-Distill-Qwen-1.5B.GGUF",
            ),
            ModelFormat::new("Qwen2-0.5B-Instruct", "medmekk/Qwen2.5-0.5B-Instruct.GGUF"),
            ModelFormat::new("SmolLM2-1.7B-Instruct", "medmekk/SmolLM2-1.7B-Instruct.GGUF"),
        ])
    }
}
