//! HTTP artifact fetcher.

use crate::progress::ProgressTracker;
use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use ggchat_core::{ArtifactFetcher, ChatError, ProgressObserver};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Streams artifacts from a remote URL into a fixed local storage root.
///
/// Stateless across calls: each fetch is independent, and in-flight
/// exclusivity is enforced by the caller.
pub struct HttpArtifactFetcher {
    client: reqwest::Client,
    root: PathBuf,
    progress_interval: Duration,
}

impl HttpArtifactFetcher {
    /// Create a fetcher writing into `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            client: reqwest::Client::new(),
            root,
            progress_interval: ProgressTracker::DEFAULT_INTERVAL,
        }
    }

    /// Override the progress emission interval.
    #[must_use]
    pub const fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Destination path an artifact would be written to.
    #[must_use]
    pub fn destination_for(&self, artifact_name: &str) -> PathBuf {
        self.root.join(artifact_name)
    }
}

#[async_trait]
impl ArtifactFetcher for HttpArtifactFetcher {
    async fn fetch(
        &self,
        artifact_name: &str,
        source_url: &str,
        observer: ProgressObserver,
    ) -> Result<PathBuf, ChatError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|err| ChatError::StorageFailure {
                message: format!(
                    "failed to create storage root {}: {err}",
                    self.root.display()
                ),
            })?;

        info!(artifact = artifact_name, url = source_url, "fetching artifact");

        let response = self
            .client
            .get(source_url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| ChatError::TransferFailed {
                message: err.to_string(),
            })?;

        let total = response.content_length();
        debug!(artifact = artifact_name, total_bytes = total, "transfer started");

        let destination = self.destination_for(artifact_name);
        let stream = response.bytes_stream();
        let result = write_stream(
            &destination,
            total,
            stream,
            &observer,
            self.progress_interval,
        )
        .await;

        match &result {
            Ok(written) => {
                info!(
                    artifact = artifact_name,
                    bytes = written,
                    path = %destination.display(),
                    "transfer completed"
                );
            }
            Err(err) => {
                // Partial file is intentionally left in place; a later
                // fetch of the same artifact overwrites it.
                warn!(artifact = artifact_name, error = %err, "transfer failed");
            }
        }

        result.map(|_| destination)
    }
}

/// Write a chunk stream to `destination`, reporting throttled progress.
///
/// Generic over the stream so tests can drive it with synthetic chunks.
/// Returns the number of bytes written.
async fn write_stream<S, C, E>(
    destination: &Path,
    total: Option<u64>,
    mut stream: S,
    observer: &ProgressObserver,
    progress_interval: Duration,
) -> Result<u64, ChatError>
where
    S: Stream<Item = Result<C, E>> + Unpin,
    C: AsRef<[u8]>,
    E: std::fmt::Display,
{
    // Truncates any pre-existing file: overwrite is the collision policy.
    let mut file = File::create(destination)
        .await
        .map_err(|err| ChatError::StorageFailure {
            message: format!("failed to create {}: {err}", destination.display()),
        })?;

    let mut tracker = ProgressTracker::new(total).with_interval(progress_interval);

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|err| ChatError::TransferFailed {
            message: err.to_string(),
        })?;
        let bytes = chunk.as_ref();
        file.write_all(bytes)
            .await
            .map_err(|err| ChatError::StorageFailure {
                message: format!("failed to write {}: {err}", destination.display()),
            })?;
        if let Some(fraction) = tracker.advance(bytes.len() as u64) {
            observer(fraction);
        }
    }

    file.flush().await.map_err(|err| ChatError::StorageFailure {
        message: format!("failed to flush {}: {err}", destination.display()),
    })?;

    observer(tracker.finish());
    Ok(tracker.received())
}
