//! Model registry port.

use crate::domain::ArtifactDescriptor;
use crate::error::ChatError;
use async_trait::async_trait;

/// Port trait for querying the remote model registry.
///
/// The implementation lives in `ggchat-hf`. Implementations never cache:
/// every invocation re-queries the registry, and callers are responsible
/// for invalidating a previously displayed listing.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// List the downloadable model artifacts of a repository.
    ///
    /// Returns an empty vector (not an error) when the repository has no
    /// matching files.
    ///
    /// # Errors
    ///
    /// - [`ChatError::RegistryUnreachable`] on transport failure (retriable)
    /// - [`ChatError::MalformedResponse`] when the response is missing the
    ///   expected file listing
    async fn list_artifacts(
        &self,
        repository_id: &str,
    ) -> Result<Vec<ArtifactDescriptor>, ChatError>;

    /// Build the direct-download URL for one artifact of a repository.
    fn artifact_url(&self, repository_id: &str, file_name: &str) -> String;
}
