//! Conversation session: one completion request per user turn.

use crate::busy::OpGuard;
use crate::domain::{default_stop_markers, Conversation, Message};
use crate::error::ChatError;
use crate::ports::CompletionRequest;
use crate::services::ModelLifecycle;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Fixed generation ceiling plus the configured stop markers.
#[derive(Debug, Clone)]
pub struct GenerationPolicy {
    /// Hard limit on generated tokens per turn
    pub max_tokens: u32,
    /// Literal strings the engine halts on
    pub stop_markers: Vec<String>,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            max_tokens: 10_000,
            stop_markers: default_stop_markers(),
        }
    }
}

/// Owns the ordered message history and drives completions.
pub struct ConversationSession {
    lifecycle: Arc<ModelLifecycle>,
    history: Arc<Mutex<Conversation>>,
    policy: Mutex<GenerationPolicy>,
    turn: OpGuard,
}

impl ConversationSession {
    /// Create a session over the lifecycle's shared history.
    pub fn new(lifecycle: Arc<ModelLifecycle>, history: Arc<Mutex<Conversation>>) -> Self {
        Self {
            lifecycle,
            history,
            policy: Mutex::new(GenerationPolicy::default()),
            turn: OpGuard::new("completion"),
        }
    }

    /// Install the stop markers of the selected model family.
    pub fn set_stop_markers(&self, markers: Vec<String>) {
        self.policy.lock().expect("policy lock poisoned").stop_markers = markers;
    }

    /// Submit one user turn and return the assistant's reply.
    ///
    /// The trimmed user text is appended to history before the engine is
    /// invoked; a failed turn does not remove it, so a retry simply
    /// extends history further.
    ///
    /// # Errors
    ///
    /// In precondition order: [`ChatError::ModelNotLoaded`],
    /// [`ChatError::Busy`], [`ChatError::EmptyInput`]; then
    /// [`ChatError::EngineCompletionFailed`] for engine faults and
    /// [`ChatError::NoCompletion`] for an empty or missing result.
    pub async fn submit_turn(&self, user_text: &str) -> Result<String, ChatError> {
        if !self.lifecycle.is_loaded() {
            return Err(ChatError::ModelNotLoaded);
        }
        let _permit = self.turn.try_begin()?;

        let user_text = user_text.trim();
        if user_text.is_empty() {
            return Err(ChatError::EmptyInput);
        }

        let request = {
            let mut history = self.history.lock().expect("history lock poisoned");
            history.push_user(user_text);
            let policy = self.policy.lock().expect("policy lock poisoned");
            CompletionRequest {
                messages: history.messages().to_vec(),
                max_tokens: policy.max_tokens,
                stop_markers: policy.stop_markers.clone(),
            }
        };

        debug!(messages = request.messages.len(), "submitting turn");
        let reply = self.lifecycle.complete(&request).await?;

        // Stop-marker truncation is the engine's job; only surrounding
        // whitespace is stripped here.
        let reply = reply.trim();
        if reply.is_empty() {
            return Err(ChatError::NoCompletion);
        }

        self.history
            .lock()
            .expect("history lock poisoned")
            .push_assistant(reply);
        Ok(reply.to_string())
    }

    /// Read-only copy of the ordered history.
    #[must_use]
    pub fn history(&self) -> Vec<Message> {
        self.history
            .lock()
            .expect("history lock poisoned")
            .messages()
            .to_vec()
    }

    /// Whether a turn is currently in flight.
    #[must_use]
    pub fn is_turn_in_flight(&self) -> bool {
        self.turn.is_busy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageRole;
    use crate::ports::EngineConfig;
    use crate::services::lifecycle::tests::{model_file, ScriptedEngine};

    fn session_with_engine(engine: Arc<ScriptedEngine>) -> (ConversationSession, Arc<ModelLifecycle>) {
        let history = Arc::new(Mutex::new(Conversation::new()));
        let lifecycle = Arc::new(ModelLifecycle::new(engine, Arc::clone(&history)));
        let session = ConversationSession::new(Arc::clone(&lifecycle), history);
        (session, lifecycle)
    }

    #[tokio::test]
    async fn turn_without_loaded_model_fails_fast() {
        let (session, _lifecycle) = session_with_engine(ScriptedEngine::new());

        let err = session.submit_turn("hello").await.unwrap_err();
        assert!(matches!(err, ChatError::ModelNotLoaded));
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn blank_input_leaves_history_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let engine = ScriptedEngine::new();
        let (session, lifecycle) = session_with_engine(engine);
        lifecycle
            .load(&model_file(&dir), &EngineConfig::default())
            .await
            .unwrap();

        let err = session.submit_turn("   \t ").await.unwrap_err();
        assert!(matches!(err, ChatError::EmptyInput));
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn successful_turn_appends_user_then_assistant() {
        let dir = tempfile::tempdir().unwrap();
        let engine = ScriptedEngine::new();
        engine.push_response(Ok("  Hi there!  ".to_string()));
        let (session, lifecycle) = session_with_engine(engine);
        lifecycle
            .load(&model_file(&dir), &EngineConfig::default())
            .await
            .unwrap();

        let reply = session.submit_turn("  hello  ").await.unwrap();
        assert_eq!(reply, "Hi there!");

        let history = session.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].role, MessageRole::User);
        assert_eq!(history[1].content, "hello");
        assert_eq!(history[2].role, MessageRole::Assistant);
        assert_eq!(history[2].content, "Hi there!");
    }

    #[tokio::test]
    async fn empty_completion_keeps_dangling_user_message() {
        let dir = tempfile::tempdir().unwrap();
        let engine = ScriptedEngine::new();
        engine.push_response(Ok("   ".to_string()));
        let (session, lifecycle) = session_with_engine(engine);
        lifecycle
            .load(&model_file(&dir), &EngineConfig::default())
            .await
            .unwrap();

        let err = session.submit_turn("hello").await.unwrap_err();
        assert!(matches!(err, ChatError::NoCompletion));

        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].role, MessageRole::User);
    }

    #[tokio::test]
    async fn engine_fault_surfaces_as_completion_failed() {
        let dir = tempfile::tempdir().unwrap();
        let engine = ScriptedEngine::new();
        engine.push_response(Err("backend crashed".to_string()));
        let (session, lifecycle) = session_with_engine(engine);
        lifecycle
            .load(&model_file(&dir), &EngineConfig::default())
            .await
            .unwrap();

        let err = session.submit_turn("hello").await.unwrap_err();
        assert!(
            matches!(err, ChatError::EngineCompletionFailed { ref message } if message.contains("backend crashed"))
        );
        assert_eq!(session.history().len(), 2);
    }

    #[tokio::test]
    async fn retried_turn_extends_history_including_unanswered_text() {
        let dir = tempfile::tempdir().unwrap();
        let engine = ScriptedEngine::new();
        engine.push_response(Ok(String::new()));
        engine.push_response(Ok("finally".to_string()));
        let (session, lifecycle) = session_with_engine(engine);
        lifecycle
            .load(&model_file(&dir), &EngineConfig::default())
            .await
            .unwrap();

        assert!(session.submit_turn("first").await.is_err());
        let reply = session.submit_turn("second").await.unwrap();
        assert_eq!(reply, "finally");

        // system + dangling user + user + assistant
        let history = session.history();
        assert_eq!(history.len(), 4);
        assert_eq!(history[1].content, "first");
        assert_eq!(history[2].content, "second");
    }

    #[tokio::test]
    async fn stop_markers_flow_into_the_request() {
        let session_policy = GenerationPolicy::default();
        assert_eq!(session_policy.max_tokens, 10_000);
        assert!(session_policy.stop_markers.iter().any(|m| m == "</s>"));

        let (session, _lifecycle) = session_with_engine(ScriptedEngine::new());
        session.set_stop_markers(vec!["<eos>".to_string()]);
        assert!(!session.is_turn_in_flight());
    }
}
