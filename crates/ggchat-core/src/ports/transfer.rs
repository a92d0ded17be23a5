//! Artifact transfer port.

use crate::error::ChatError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Callback invoked with fractional download progress.
///
/// Values are in `[0, 1]` and monotonically non-decreasing for a given
/// fetch; on success the final delivered value is exactly `1.0`.
pub type ProgressObserver = Arc<dyn Fn(f32) + Send + Sync>;

/// Port trait for streaming a remote artifact to local storage.
///
/// The implementation lives in `ggchat-download`. Each fetch is
/// independent; in-flight exclusivity is the caller's responsibility.
#[async_trait]
pub trait ArtifactFetcher: Send + Sync {
    /// Stream `source_url` to `<storage root>/<artifact_name>`,
    /// overwriting any pre-existing file at that path.
    ///
    /// Returns the destination path on success.
    ///
    /// # Errors
    ///
    /// - [`ChatError::TransferFailed`] on network interruption or a
    ///   non-success status; the partial destination file is left in place
    /// - [`ChatError::StorageFailure`] on local write failure, with the
    ///   same partial-file caveat
    async fn fetch(
        &self,
        artifact_name: &str,
        source_url: &str,
        observer: ProgressObserver,
    ) -> Result<PathBuf, ChatError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Verify the trait is object-safe
    fn _assert_object_safe(_: Arc<dyn ArtifactFetcher>) {}
}
