//! Model lifecycle state machine.
//!
//! Owns the single live engine context. `Unloaded → Loading → Loaded`,
//! with `Loading → Unloaded` on failure; a reload always transits through
//! release, so at most one context exists and native resource usage is
//! bounded to one model's footprint at a time.

use crate::busy::OpGuard;
use crate::domain::Conversation;
use crate::error::ChatError;
use crate::ports::{CompletionRequest, EngineConfig, EngineContext, EngineError, InferenceEngine};
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Snapshot of the lifecycle state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Unloaded,
    Loading,
    Loaded,
}

const STATE_UNLOADED: u8 = 0;
const STATE_LOADING: u8 = 1;
const STATE_LOADED: u8 = 2;

/// Exclusive owner of the inference context.
pub struct ModelLifecycle {
    engine: Arc<dyn InferenceEngine>,
    context: tokio::sync::Mutex<Option<Box<dyn EngineContext>>>,
    state: AtomicU8,
    history: Arc<Mutex<Conversation>>,
    loading: OpGuard,
}

impl ModelLifecycle {
    /// Create an unloaded lifecycle sharing `history` with the session.
    ///
    /// History reset is a side effect intentionally coupled to `load`, so
    /// the conversation can never reference a model that is no longer
    /// active.
    pub fn new(engine: Arc<dyn InferenceEngine>, history: Arc<Mutex<Conversation>>) -> Self {
        Self {
            engine,
            context: tokio::sync::Mutex::new(None),
            state: AtomicU8::new(STATE_UNLOADED),
            history,
            loading: OpGuard::new("model load"),
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        match self.state.load(Ordering::Acquire) {
            STATE_LOADING => LifecycleState::Loading,
            STATE_LOADED => LifecycleState::Loaded,
            _ => LifecycleState::Unloaded,
        }
    }

    /// Whether a context is currently held.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.state() == LifecycleState::Loaded
    }

    /// Load the model file at `path` into a fresh context.
    ///
    /// Releases any previously held context before constructing the new
    /// one and resets the shared conversation history as part of the same
    /// transition.
    ///
    /// # Errors
    ///
    /// - [`ChatError::Busy`] while another load is outstanding
    /// - [`ChatError::ModelFileMissing`] when `path` does not exist; no
    ///   engine call is attempted and the current context is untouched
    /// - [`ChatError::EngineLoadFailed`] when construction fails; the
    ///   lifecycle ends Unloaded and history stays reset
    pub async fn load(&self, path: &Path, config: &EngineConfig) -> Result<(), ChatError> {
        let _permit = self.loading.try_begin()?;

        let exists = tokio::fs::try_exists(path).await.unwrap_or(false);
        if !exists {
            return Err(ChatError::ModelFileMissing {
                path: path.to_path_buf(),
            });
        }

        info!(model = %path.display(), "loading model");
        self.state.store(STATE_LOADING, Ordering::Release);

        let mut slot = self.context.lock().await;

        // Release-then-construct: the old context must be gone before the
        // engine sees the new model.
        if let Some(previous) = slot.take() {
            drop(previous);
        }
        self.reset_history();

        match self.engine.construct(path, config).await {
            Ok(context) => {
                *slot = Some(context);
                self.state.store(STATE_LOADED, Ordering::Release);
                info!(model = %path.display(), "model loaded");
                Ok(())
            }
            Err(err) => {
                self.state.store(STATE_UNLOADED, Ordering::Release);
                warn!(model = %path.display(), error = %err, "model load failed");
                Err(ChatError::EngineLoadFailed {
                    message: err.to_string(),
                })
            }
        }
    }

    /// Release the held context. No-op when Unloaded.
    pub async fn unload(&self) {
        let mut slot = self.context.lock().await;
        if slot.take().is_some() {
            info!("model unloaded");
        }
        self.state.store(STATE_UNLOADED, Ordering::Release);
    }

    /// Borrow the context for the duration of one completion call.
    pub(crate) async fn complete(&self, request: &CompletionRequest) -> Result<String, ChatError> {
        let slot = self.context.lock().await;
        let context = slot.as_ref().ok_or(ChatError::ModelNotLoaded)?;
        context.complete(request).await.map_err(|err| match err {
            EngineError::Load(message) | EngineError::Completion(message) => {
                ChatError::EngineCompletionFailed { message }
            }
        })
    }

    fn reset_history(&self) {
        self.history
            .lock()
            .expect("conversation history lock poisoned")
            .reset();
    }
}
