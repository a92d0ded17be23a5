//! Wire types for the OpenAI-compatible chat completion endpoint.

use ggchat_core::CompletionRequest;
use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/chat/completions`.
#[derive(Debug, Serialize)]
pub struct ChatCompletionBody<'a> {
    pub messages: Vec<WireMessage<'a>>,
    pub max_tokens: u32,
    pub stop: &'a [String],
    pub stream: bool,
}

/// One message as the server expects it.
#[derive(Debug, Serialize)]
pub struct WireMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> ChatCompletionBody<'a> {
    /// Map a core completion request onto the wire shape.
    #[must_use]
    pub fn from_request(request: &'a CompletionRequest) -> Self {
        Self {
            messages: request
                .messages
                .iter()
                .map(|message| WireMessage {
                    role: message.role.as_str(),
                    content: &message.content,
                })
                .collect(),
            max_tokens: request.max_tokens,
            stop: &request.stop_markers,
            stream: false,
        }
    }
}

/// Response body, reduced to the generated text.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// The first choice's text, or an empty string when the server
    /// produced none. The session layer decides how to surface that.
    #[must_use]
    pub fn into_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default()
    }
}
