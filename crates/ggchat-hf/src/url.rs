//! URL construction helpers for the `HuggingFace` Hub.
//!
//! Pure functions so URL shapes are testable without a network.

use crate::config::HfClientConfig;
use url::Url;

/// Build the metadata URL for a repository: `<base>/api/models/<repo>`.
pub fn build_repo_metadata_url(config: &HfClientConfig, repository_id: &str) -> Url {
    let mut url = config.base_url.clone();
    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{base_path}/api/models/{repository_id}"));
    url
}

/// Build the direct-download URL for one artifact:
/// `<base>/<repo>/resolve/main/<file>`.
pub fn build_artifact_url(config: &HfClientConfig, repository_id: &str, file_name: &str) -> Url {
    let mut url = config.base_url.clone();
    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!(
        "{base_path}/{repository_id}/resolve/main/{file_name}"
    ));
    url
}
