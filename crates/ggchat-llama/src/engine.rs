//! `llama-server` process lifecycle and completion calls.

use crate::api::{ChatCompletionBody, ChatCompletionResponse};
use crate::args::build_server_args;
use async_trait::async_trait;
use ggchat_core::{CompletionRequest, EngineConfig, EngineContext, EngineError, InferenceEngine};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

/// Engine that runs one `llama-server` instance per constructed context.
pub struct LlamaServerEngine {
    binary: PathBuf,
    host: String,
    startup_timeout: Duration,
    poll_interval: Duration,
    http: reqwest::Client,
}

impl LlamaServerEngine {
    /// Create an engine around the given `llama-server` binary.
    #[must_use]
    pub fn new(binary: PathBuf) -> Self {
        Self {
            binary,
            host: "127.0.0.1".to_string(),
            startup_timeout: Duration::from_secs(120),
            poll_interval: Duration::from_millis(250),
            // No request timeout: generation length is bounded by the
            // core's token ceiling, not by wall clock.
            http: reqwest::Client::new(),
        }
    }

    /// Override how long to wait for the server to become healthy.
    #[must_use]
    pub const fn with_startup_timeout(mut self, timeout: Duration) -> Self {
        self.startup_timeout = timeout;
        self
    }

    /// Ask the OS for a free port on the loopback interface.
    fn reserve_port(&self) -> Result<u16, EngineError> {
        let listener = std::net::TcpListener::bind((self.host.as_str(), 0))
            .map_err(|err| EngineError::Load(format!("no free port available: {err}")))?;
        let port = listener
            .local_addr()
            .map_err(|err| EngineError::Load(format!("no free port available: {err}")))?
            .port();
        drop(listener);
        Ok(port)
    }

    /// Poll the health endpoint until the model is loaded or the deadline
    /// passes. An early child exit fails immediately.
    async fn wait_healthy(&self, base_url: &str, child: &mut Child) -> Result<(), EngineError> {
        let health_url = format!("{base_url}/health");
        let deadline = tokio::time::Instant::now() + self.startup_timeout;

        loop {
            if let Ok(Some(status)) = child.try_wait() {
                return Err(EngineError::Load(format!(
                    "llama-server exited during startup: {status}"
                )));
            }

            match self.http.get(&health_url).send().await {
                Ok(response) if response.status().is_success() => return Ok(()),
                Ok(response) => {
                    debug!(status = %response.status(), "llama-server not ready yet");
                }
                Err(err) => {
                    debug!(error = %err, "llama-server not reachable yet");
                }
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(EngineError::Load(format!(
                    "llama-server health check timed out after {:?}",
                    self.startup_timeout
                )));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl InferenceEngine for LlamaServerEngine {
    async fn construct(
        &self,
        path: &Path,
        config: &EngineConfig,
    ) -> Result<Box<dyn EngineContext>, EngineError> {
        let port = self.reserve_port()?;
        let args = build_server_args(path, config, &self.host, port);

        info!(binary = %self.binary.display(), port, "starting llama-server");
        let mut child = Command::new(&self.binary)
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| {
                EngineError::Load(format!(
                    "failed to spawn {}: {err}",
                    self.binary.display()
                ))
            })?;

        let base_url = format!("http://{}:{port}", self.host);
        if let Err(err) = self.wait_healthy(&base_url, &mut child).await {
            let _ = child.start_kill();
            return Err(err);
        }

        info!(port, "llama-server ready");
        Ok(Box::new(LlamaServerContext {
            child,
            base_url,
            http: self.http.clone(),
        }))
    }
}

/// One live server instance. Dropping it kills the child process.
struct LlamaServerContext {
    child: Child,
    base_url: String,
    http: reqwest::Client,
}

#[async_trait]
impl EngineContext for LlamaServerContext {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, EngineError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = ChatCompletionBody::from_request(request);

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| EngineError::Completion(err.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|err| EngineError::Completion(err.to_string()))?;
        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)
            .map_err(|err| EngineError::Completion(format!("invalid completion payload: {err}")))?;

        Ok(parsed.into_text())
    }
}

impl Drop for LlamaServerContext {
    fn drop(&mut self) {
        if let Err(err) = self.child.start_kill() {
            warn!(error = %err, "failed to kill llama-server on release");
        }
    }
}
