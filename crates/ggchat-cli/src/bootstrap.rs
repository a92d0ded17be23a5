//! CLI bootstrap, the composition root.
//!
//! This is the only place where concrete adapters are instantiated and
//! wired into the core facade. Handlers receive the composed context and
//! delegate all work to it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use ggchat_core::paths::ensure_models_dir;
use ggchat_core::{ChatCore, FormatCatalog};
use ggchat_download::HttpArtifactFetcher;
use ggchat_hf::{DefaultRegistryClient, HfClientConfig};
use ggchat_llama::LlamaServerEngine;
use tracing::debug;

/// Settings taken from the command line before composition.
pub struct CliOverrides {
    /// Models directory override; falls back to the platform default.
    pub models_dir: Option<PathBuf>,
    /// Path to the `llama-server` binary.
    pub llama_server: PathBuf,
}

/// Fully composed application context for command handlers.
pub struct CliContext {
    core: ChatCore,
}

impl CliContext {
    /// The core facade.
    #[must_use]
    pub const fn core(&self) -> &ChatCore {
        &self.core
    }
}

/// Compose the core with the production adapters.
pub fn bootstrap(overrides: CliOverrides) -> Result<CliContext> {
    let models_dir = match overrides.models_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating models directory {}", dir.display()))?;
            dir
        }
        None => ensure_models_dir()?,
    };
    debug!(models_dir = %models_dir.display(), "composing core");

    let registry = Arc::new(DefaultRegistryClient::new(HfClientConfig::default()));
    let fetcher = Arc::new(HttpArtifactFetcher::new(models_dir.clone()));
    let engine = Arc::new(LlamaServerEngine::new(overrides.llama_server));

    Ok(CliContext {
        core: ChatCore::new(
            FormatCatalog::default(),
            registry,
            fetcher,
            engine,
            models_dir,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_creates_the_models_dir() {
        let dir = tempfile::tempdir().unwrap();
        let models_dir = dir.path().join("models");

        let ctx = bootstrap(CliOverrides {
            models_dir: Some(models_dir.clone()),
            llama_server: PathBuf::from("llama-server"),
        })
        .unwrap();

        assert!(models_dir.is_dir());
        assert_eq!(ctx.core().models_dir(), models_dir);
    }
}
