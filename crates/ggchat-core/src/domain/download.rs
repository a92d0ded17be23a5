//! Download task tracking.
//!
//! A transient record of the one download the user currently cares about.
//! Starting a new task supersedes the prior task's observability; the
//! prior transfer is not force-cancelled.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Lifecycle state of a download task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadState {
    Pending,
    InFlight,
    Completed,
    Failed,
}

/// The currently tracked artifact download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadTask {
    /// File name of the artifact being fetched
    pub artifact_name: String,
    /// Remote URL the bytes come from
    pub source_url: String,
    /// Local path the bytes are written to
    pub destination_path: PathBuf,
    /// Fractional progress in `[0, 1]`, monotonically non-decreasing
    pub progress: f32,
    /// Current state
    pub state: DownloadState,
}

impl DownloadTask {
    /// Create a pending task at zero progress.
    pub fn pending(
        artifact_name: impl Into<String>,
        source_url: impl Into<String>,
        destination_path: PathBuf,
    ) -> Self {
        Self {
            artifact_name: artifact_name.into(),
            source_url: source_url.into(),
            destination_path,
            progress: 0.0,
            state: DownloadState::Pending,
        }
    }

    /// Mark the transfer as started.
    pub const fn start(&mut self) {
        self.state = DownloadState::InFlight;
    }

    /// Record a progress observation. Regressions are ignored so the
    /// exposed fraction stays non-decreasing.
    pub fn observe_progress(&mut self, fraction: f32) {
        if fraction > self.progress {
            self.progress = fraction.min(1.0);
        }
    }

    /// Mark the transfer as completed, pinning progress at `1.0`.
    pub const fn complete(&mut self) {
        self.progress = 1.0;
        self.state = DownloadState::Completed;
    }

    /// Mark the transfer as failed. Progress keeps its last value; the
    /// partial destination file is left in place.
    pub const fn fail(&mut self) {
        self.state = DownloadState::Failed;
    }
}
