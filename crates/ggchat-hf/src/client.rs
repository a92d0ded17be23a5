//! Registry client implementation over a pluggable HTTP backend.

use crate::config::HfClientConfig;
use crate::error::{HfError, HfResult};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::RepoMetadata;
use crate::url::{build_artifact_url, build_repo_metadata_url};
use async_trait::async_trait;
use ggchat_core::{ArtifactDescriptor, ChatError, RegistryClient};

/// `HuggingFace` registry client, generic over the HTTP backend.
pub struct HfRegistryClient<B: HttpBackend> {
    config: HfClientConfig,
    backend: B,
}

/// The production client type.
pub type DefaultRegistryClient = HfRegistryClient<ReqwestBackend>;

impl DefaultRegistryClient {
    /// Create a client with the retrying reqwest backend.
    #[must_use]
    pub fn new(config: HfClientConfig) -> Self {
        let backend = ReqwestBackend::new(&config);
        Self { config, backend }
    }
}

impl<B: HttpBackend> HfRegistryClient<B> {
    /// Create a client with an explicit backend (used by tests).
    pub const fn with_backend(config: HfClientConfig, backend: B) -> Self {
        Self { config, backend }
    }

    async fn fetch_listing(&self, repository_id: &str) -> HfResult<Vec<ArtifactDescriptor>> {
        let url = build_repo_metadata_url(&self.config, repository_id);
        let metadata: RepoMetadata = self.backend.get_json(&url).await?;

        let siblings = metadata.siblings.ok_or_else(|| HfError::InvalidResponse {
            message: format!("missing 'siblings' field for repository '{repository_id}'"),
        })?;

        Ok(siblings
            .into_iter()
            .filter(|sibling| sibling.is_model_file())
            .map(|sibling| ArtifactDescriptor::from_file_name(sibling.rfilename))
            .collect())
    }
}

#[async_trait]
impl<B: HttpBackend> RegistryClient for HfRegistryClient<B> {
    async fn list_artifacts(
        &self,
        repository_id: &str,
    ) -> Result<Vec<ArtifactDescriptor>, ChatError> {
        self.fetch_listing(repository_id).await.map_err(Into::into)
    }

    fn artifact_url(&self, repository_id: &str, file_name: &str) -> String {
        build_artifact_url(&self.config, repository_id, file_name).to_string()
    }
}
