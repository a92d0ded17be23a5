//! Streaming artifact fetcher for ggchat.
//!
//! Implements the core `ArtifactFetcher` port: one GET per fetch, body
//! streamed to `<root>/<artifact_name>`, fractional progress reported
//! through the caller's observer. No resume, no checksum verification;
//! a pre-existing file at the destination is overwritten and a partial
//! file is left in place on failure.
#![deny(unused_crate_dependencies)]

mod fetcher;
mod progress;

pub use fetcher::HttpArtifactFetcher;
pub use progress::ProgressTracker;
