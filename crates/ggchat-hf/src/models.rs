//! Wire types for the `HuggingFace` model metadata endpoint.
//!
//! Only the subset of the response this crate consumes is modelled; the
//! rest of the payload is ignored during deserialization.

use ggchat_core::MODEL_FILE_EXTENSION;
use serde::Deserialize;

/// Response of `GET /api/models/<repo>`, reduced to the file listing.
#[derive(Debug, Deserialize)]
pub struct RepoMetadata {
    /// Files in the repository. Absent when the API contract changed.
    pub siblings: Option<Vec<RepoSibling>>,
}

/// One file entry in the repository listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoSibling {
    /// File name relative to the repository root
    pub rfilename: String,
}

impl RepoSibling {
    /// Whether this entry is a downloadable model file.
    #[must_use]
    pub fn is_model_file(&self) -> bool {
        self.rfilename.ends_with(MODEL_FILE_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_the_expected_shape() {
        let metadata: RepoMetadata = serde_json::from_value(json!({
            "id": "org/repo",
            "downloads": 1234,
            "siblings": [
                {"rfilename": "README.md"},
                {"rfilename": "model-Q2_K.gguf"}
            ]
        }))
        .unwrap();

        let siblings = metadata.siblings.unwrap();
        assert_eq!(siblings.len(), 2);
        assert!(!siblings[0].is_model_file());
        assert!(siblings[1].is_model_file());
    }

    #[test]
    fn missing_siblings_deserializes_to_none() {
        let metadata: RepoMetadata = serde_json::from_value(json!({"id": "org/repo"})).unwrap();
        assert!(metadata.siblings.is_none());
    }
}
