//! Chat-completions HTTP backend.
//!
//! # Responsibility
//! - Serialize `CompletionRequest` into the chat-completions wire format.
//! - Map transport and HTTP status failures into `BackendError`.
//!
//! # Invariants
//! - The bearer token is only ever written into the `Authorization` header.
//! - Only the first choice's message content is returned.

use super::backend::{BackendError, CompletionBackend, CompletionRequest};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// `reqwest` client for an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiBackend {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiBackend {
    /// Creates a backend for `base_url` (scheme + host, optional path prefix).
    ///
    /// # Errors
    /// Returns `BackendError::Setup` when the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| BackendError::Setup(err.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}{CHAT_COMPLETIONS_PATH}", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError> {
        let body = ChatRequest {
            model: &request.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &text));
        }

        let decoded: ChatResponse = response
            .json()
            .await
            .map_err(|err| BackendError::Decode(err.to_string()))?;

        decoded
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(BackendError::EmptyResponse)
    }
}

fn map_transport_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        BackendError::Timeout
    } else {
        BackendError::Network(err.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &str) -> BackendError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Auth {
            status: status.as_u16(),
        },
        StatusCode::TOO_MANY_REQUESTS => BackendError::RateLimited,
        other => BackendError::Http {
            status: other.as_u16(),
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        },
    }
}
