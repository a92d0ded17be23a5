//! `ChatCore` - the facade a presentation layer drives.
//!
//! Composes the catalog, the registry and transfer ports, the model
//! lifecycle, and the conversation session. The presentation layer
//! triggers operations here and renders the read-only snapshots; it never
//! mutates core state directly.

use crate::busy::OpGuard;
use crate::domain::{
    ArtifactDescriptor, Conversation, DownloadTask, FormatCatalog, Message, ModelFormat,
};
use crate::error::ChatError;
use crate::ports::{
    ArtifactFetcher, EngineConfig, InferenceEngine, ProgressObserver, RegistryClient,
};
use crate::services::{ConversationSession, LifecycleState, ModelLifecycle};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Read-only snapshot of everything the presentation layer renders.
#[derive(Debug, Clone, Serialize)]
pub struct CoreSnapshot {
    /// Currently selected format label, if any
    pub selected_format: Option<String>,
    /// Artifact listing for the selected format
    pub artifacts: Vec<ArtifactDescriptor>,
    /// The download the user currently cares about
    pub download: Option<DownloadTask>,
    /// Whether a fetch is in flight
    pub download_in_flight: bool,
    /// Model lifecycle state
    pub lifecycle: LifecycleState,
    /// Ordered conversation history
    pub history: Vec<Message>,
    /// Whether a completion turn is in flight
    pub turn_in_flight: bool,
}

struct ViewState {
    selected: Option<ModelFormat>,
    artifacts: Vec<ArtifactDescriptor>,
    download: Option<DownloadTask>,
}

/// The core application facade.
pub struct ChatCore {
    catalog: FormatCatalog,
    registry: Arc<dyn RegistryClient>,
    fetcher: Arc<dyn ArtifactFetcher>,
    lifecycle: Arc<ModelLifecycle>,
    session: ConversationSession,
    engine_config: EngineConfig,
    models_dir: PathBuf,
    view: Arc<Mutex<ViewState>>,
    listing: OpGuard,
    fetching: OpGuard,
}

impl ChatCore {
    /// Wire the facade together at the composition root.
    pub fn new(
        catalog: FormatCatalog,
        registry: Arc<dyn RegistryClient>,
        fetcher: Arc<dyn ArtifactFetcher>,
        engine: Arc<dyn InferenceEngine>,
        models_dir: PathBuf,
    ) -> Self {
        let history = Arc::new(Mutex::new(Conversation::new()));
        let lifecycle = Arc::new(ModelLifecycle::new(engine, Arc::clone(&history)));
        let session = ConversationSession::new(Arc::clone(&lifecycle), history);

        Self {
            catalog,
            registry,
            fetcher,
            lifecycle,
            session,
            engine_config: EngineConfig::default(),
            models_dir,
            view: Arc::new(Mutex::new(ViewState {
                selected: None,
                artifacts: Vec::new(),
                download: None,
            })),
            listing: OpGuard::new("artifact listing"),
            fetching: OpGuard::new("artifact fetch"),
        }
    }

    /// The format catalog.
    #[must_use]
    pub const fn catalog(&self) -> &FormatCatalog {
        &self.catalog
    }

    /// Local storage root for model files.
    #[must_use]
    pub fn models_dir(&self) -> &std::path::Path {
        &self.models_dir
    }

    /// Select a format by label.
    ///
    /// Clears the previous artifact listing and installs the format's
    /// stop markers on the session.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::UnknownFormat`] for labels absent from the
    /// catalog; the registry is never consulted in that case.
    pub fn select_format(&self, label: &str) -> Result<(), ChatError> {
        let format = self.catalog.resolve(label)?.clone();
        self.session.set_stop_markers(format.stop_markers.clone());

        let mut view = self.lock_view();
        view.artifacts.clear();
        view.selected = Some(format);
        Ok(())
    }

    /// Re-query the registry for the selected format's artifacts.
    ///
    /// The previous listing is invalidated before the request completes.
    ///
    /// # Errors
    ///
    /// [`ChatError::Busy`] while a listing is outstanding, plus the
    /// registry port errors.
    pub async fn refresh_artifacts(&self) -> Result<Vec<ArtifactDescriptor>, ChatError> {
        let _permit = self.listing.try_begin()?;
        let repository_id = {
            let mut view = self.lock_view();
            view.artifacts.clear();
            view.selected
                .as_ref()
                .map(|format| format.repository_id.clone())
                .ok_or(ChatError::UnknownFormat {
                    label: String::new(),
                })?
        };

        let artifacts = self.registry.list_artifacts(&repository_id).await?;
        self.lock_view().artifacts = artifacts.clone();
        Ok(artifacts)
    }

    /// Download one artifact of the selected format.
    ///
    /// Progress is forwarded to `observer` and mirrored into the tracked
    /// [`DownloadTask`] for snapshot consumers.
    ///
    /// # Errors
    ///
    /// [`ChatError::Busy`] while a fetch is outstanding, plus the
    /// transfer port errors. The partial file is left in place on failure.
    pub async fn download_artifact(
        &self,
        file_name: &str,
        observer: ProgressObserver,
    ) -> Result<PathBuf, ChatError> {
        let _permit = self.fetching.try_begin()?;
        let repository_id = {
            let view = self.lock_view();
            view.selected
                .as_ref()
                .map(|format| format.repository_id.clone())
                .ok_or(ChatError::UnknownFormat {
                    label: String::new(),
                })?
        };

        let source_url = self.registry.artifact_url(&repository_id, file_name);
        let destination = self.models_dir.join(file_name);

        {
            let mut task = DownloadTask::pending(file_name, source_url.clone(), destination);
            task.start();
            self.lock_view().download = Some(task);
        }
        info!(artifact = file_name, "download started");

        let view = Arc::clone(&self.view);
        let outer = Arc::clone(&observer);
        let tracked: ProgressObserver = Arc::new(move |fraction: f32| {
            if let Ok(mut view) = view.lock() {
                if let Some(task) = view.download.as_mut() {
                    task.observe_progress(fraction);
                }
            }
            outer(fraction);
        });

        match self.fetcher.fetch(file_name, &source_url, tracked).await {
            Ok(path) => {
                if let Some(task) = self.lock_view().download.as_mut() {
                    task.complete();
                }
                info!(artifact = file_name, path = %path.display(), "download completed");
                Ok(path)
            }
            Err(err) => {
                if let Some(task) = self.lock_view().download.as_mut() {
                    task.fail();
                }
                warn!(artifact = file_name, error = %err, "download failed");
                Err(err)
            }
        }
    }

    /// Load a previously downloaded artifact into the engine.
    ///
    /// # Errors
    ///
    /// The lifecycle errors: [`ChatError::Busy`],
    /// [`ChatError::ModelFileMissing`], [`ChatError::EngineLoadFailed`].
    pub async fn load_artifact(&self, file_name: &str) -> Result<(), ChatError> {
        let path = self.models_dir.join(file_name);
        self.lifecycle.load(&path, &self.engine_config).await
    }

    /// Submit one user turn.
    ///
    /// # Errors
    ///
    /// The session errors; see [`ConversationSession::submit_turn`].
    pub async fn submit_turn(&self, user_text: &str) -> Result<String, ChatError> {
        self.session.submit_turn(user_text).await
    }

    /// Release the loaded model, if any.
    pub async fn unload(&self) {
        self.lifecycle.unload().await;
    }

    /// Snapshot of the full presentation surface.
    #[must_use]
    pub fn snapshot(&self) -> CoreSnapshot {
        let view = self.lock_view();
        CoreSnapshot {
            selected_format: view.selected.as_ref().map(|format| format.label.clone()),
            artifacts: view.artifacts.clone(),
            download: view.download.clone(),
            download_in_flight: self.fetching.is_busy(),
            lifecycle: self.lifecycle.state(),
            history: self.session.history(),
            turn_in_flight: self.session.is_turn_in_flight(),
        }
    }

    fn lock_view(&self) -> std::sync::MutexGuard<'_, ViewState> {
        self.view.lock().expect("view state lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageRole;
    use crate::ports::{CompletionRequest, EngineContext, EngineError};
    use crate::services::lifecycle::tests::ScriptedEngine;
    use async_trait::async_trait;
    use std::path::Path;

    struct FakeRegistry {
        files: Vec<&'static str>,
        fail_unreachable: bool,
    }

    #[async_trait]
    impl RegistryClient for FakeRegistry {
        async fn list_artifacts(
            &self,
            _repository_id: &str,
        ) -> Result<Vec<ArtifactDescriptor>, ChatError> {
            if self.fail_unreachable {
                return Err(ChatError::RegistryUnreachable {
                    message: "connection refused".to_string(),
                });
            }
            Ok(self
                .files
                .iter()
                .map(|name| ArtifactDescriptor::from_file_name(*name))
                .collect())
        }

        fn artifact_url(&self, repository_id: &str, file_name: &str) -> String {
            format!("https://huggingface.co/{repository_id}/resolve/main/{file_name}")
        }
    }

    /// Writes a marker file and replays a canned progress sequence.
    struct FakeFetcher {
        root: PathBuf,
        progress: Vec<f32>,
        fail: bool,
    }

    #[async_trait]
    impl ArtifactFetcher for FakeFetcher {
        async fn fetch(
            &self,
            artifact_name: &str,
            _source_url: &str,
            observer: ProgressObserver,
        ) -> Result<PathBuf, ChatError> {
            for fraction in &self.progress {
                observer(*fraction);
            }
            if self.fail {
                return Err(ChatError::TransferFailed {
                    message: "connection reset".to_string(),
                });
            }
            let path = self.root.join(artifact_name);
            std::fs::write(&path, b"GGUF").unwrap();
            observer(1.0);
            Ok(path)
        }
    }

    fn core_with(
        dir: &tempfile::TempDir,
        registry: FakeRegistry,
        fetcher_fail: bool,
        engine: Arc<ScriptedEngine>,
    ) -> ChatCore {
        let root = dir.path().to_path_buf();
        ChatCore::new(
            FormatCatalog::default(),
            Arc::new(registry),
            Arc::new(FakeFetcher {
                root: root.clone(),
                progress: vec![0.25, 0.5, 0.75],
                fail: fetcher_fail,
            }),
            engine,
            root,
        )
    }

    fn noop_observer() -> ProgressObserver {
        Arc::new(|_| {})
    }

    #[tokio::test]
    async fn full_flow_from_format_to_turn() {
        let dir = tempfile::tempdir().unwrap();
        let registry = FakeRegistry {
            files: vec!["Llama-3.2-1B-Instruct-Q2_K.gguf"],
            fail_unreachable: false,
        };
        let engine = ScriptedEngine::new();
        engine.push_response(Ok("Hello!".to_string()));
        let core = core_with(&dir, registry, false, engine);

        core.select_format("Llama-3.2-1B-Instruct").unwrap();
        let snapshot = core.snapshot();
        assert_eq!(
            snapshot.selected_format.as_deref(),
            Some("Llama-3.2-1B-Instruct")
        );

        let artifacts = core.refresh_artifacts().await.unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].file_name, "Llama-3.2-1B-Instruct-Q2_K.gguf");

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let path = core
            .download_artifact(
                "Llama-3.2-1B-Instruct-Q2_K.gguf",
                Arc::new(move |fraction| sink.lock().unwrap().push(fraction)),
            )
            .await
            .unwrap();
        assert!(path.ends_with("Llama-3.2-1B-Instruct-Q2_K.gguf"));

        let fractions = seen.lock().unwrap().clone();
        assert!(fractions.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!((fractions.last().unwrap() - 1.0).abs() < f32::EPSILON);

        core.load_artifact("Llama-3.2-1B-Instruct-Q2_K.gguf")
            .await
            .unwrap();
        let snapshot = core.snapshot();
        assert_eq!(snapshot.lifecycle, LifecycleState::Loaded);
        assert_eq!(snapshot.history.len(), 1);

        let reply = core.submit_turn("hello").await.unwrap();
        assert_eq!(reply, "Hello!");

        let history = core.snapshot().history;
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].role, MessageRole::User);
        assert_eq!(history[2].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn unknown_format_never_reaches_the_registry() {
        let dir = tempfile::tempdir().unwrap();
        let registry = FakeRegistry {
            files: vec![],
            fail_unreachable: true, // would fail if consulted
        };
        let core = core_with(&dir, registry, false, ScriptedEngine::new());

        let err = core.select_format("Nonexistent-Format").unwrap_err();
        assert!(matches!(err, ChatError::UnknownFormat { .. }));
        assert!(core.snapshot().selected_format.is_none());
    }

    #[tokio::test]
    async fn refresh_without_selection_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let registry = FakeRegistry {
            files: vec![],
            fail_unreachable: false,
        };
        let core = core_with(&dir, registry, false, ScriptedEngine::new());

        let err = core.refresh_artifacts().await.unwrap_err();
        assert!(matches!(err, ChatError::UnknownFormat { .. }));
    }

    #[tokio::test]
    async fn selecting_a_format_invalidates_the_listing() {
        let dir = tempfile::tempdir().unwrap();
        let registry = FakeRegistry {
            files: vec!["a.gguf"],
            fail_unreachable: false,
        };
        let core = core_with(&dir, registry, false, ScriptedEngine::new());

        core.select_format("Llama-3.2-1B-Instruct").unwrap();
        core.refresh_artifacts().await.unwrap();
        assert_eq!(core.snapshot().artifacts.len(), 1);

        core.select_format("Qwen2-0.5B-Instruct").unwrap();
        assert!(core.snapshot().artifacts.is_empty());
    }

    #[tokio::test]
    async fn failed_download_is_tracked_as_failed() {
        let dir = tempfile::tempdir().unwrap();
        let registry = FakeRegistry {
            files: vec![],
            fail_unreachable: false,
        };
        let core = core_with(&dir, registry, true, ScriptedEngine::new());
        core.select_format("Llama-3.2-1B-Instruct").unwrap();

        let err = core
            .download_artifact("broken.gguf", noop_observer())
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::TransferFailed { .. }));

        let download = core.snapshot().download.unwrap();
        assert_eq!(download.state, crate::domain::DownloadState::Failed);
        assert!(download.progress < 1.0);
    }

    #[tokio::test]
    async fn concurrent_turns_reject_the_second_with_busy() {
        struct GatedEngine {
            gate: Arc<tokio::sync::Notify>,
        }

        struct GatedContext {
            gate: Arc<tokio::sync::Notify>,
        }

        #[async_trait]
        impl InferenceEngine for GatedEngine {
            async fn construct(
                &self,
                _path: &Path,
                _config: &EngineConfig,
            ) -> Result<Box<dyn EngineContext>, EngineError> {
                Ok(Box::new(GatedContext {
                    gate: Arc::clone(&self.gate),
                }))
            }
        }

        #[async_trait]
        impl EngineContext for GatedContext {
            async fn complete(&self, _request: &CompletionRequest) -> Result<String, EngineError> {
                self.gate.notified().await;
                Ok("done".to_string())
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("model.gguf");
        std::fs::write(&model, b"GGUF").unwrap();

        let gate = Arc::new(tokio::sync::Notify::new());
        let core = Arc::new(ChatCore::new(
            FormatCatalog::default(),
            Arc::new(FakeRegistry {
                files: vec![],
                fail_unreachable: false,
            }),
            Arc::new(FakeFetcher {
                root: dir.path().to_path_buf(),
                progress: vec![],
                fail: false,
            }),
            Arc::new(GatedEngine {
                gate: Arc::clone(&gate),
            }),
            dir.path().to_path_buf(),
        ));

        core.load_artifact("model.gguf").await.unwrap();

        let first = {
            let core = Arc::clone(&core);
            tokio::spawn(async move { core.submit_turn("first").await })
        };

        // Wait until the first turn is visibly in flight.
        while !core.snapshot().turn_in_flight {
            tokio::task::yield_now().await;
        }

        let second = core.submit_turn("second").await;
        assert!(matches!(second, Err(ChatError::Busy { .. })));

        gate.notify_one();
        let reply = first.await.unwrap().unwrap();
        assert_eq!(reply, "done");

        // Only one user/assistant pair was appended.
        let history = core.snapshot().history;
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].content, "first");
        assert_eq!(history[2].content, "done");
    }
}
