//! Text-generation backend seam.
//!
//! The service talks to the hosted model only through `CompletionBackend`, so
//! tests and alternative providers can stand in for the HTTP client.

use async_trait::async_trait;
use thiserror::Error;

/// One chat-completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Failures talking to the hosted model. Never surfaced to end users; the
/// service degrades to local analysis instead.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request timed out")]
    Timeout,
    #[error("network failure: {0}")]
    Network(String),
    #[error("authentication rejected (HTTP {status})")]
    Auth { status: u16 },
    #[error("rate limited by provider")]
    RateLimited,
    #[error("provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("provider returned no message content")]
    EmptyResponse,
    #[error("could not decode provider response: {0}")]
    Decode(String),
    #[error("backend setup failed: {0}")]
    Setup(String),
}

impl BackendError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Network(_) => "network",
            Self::Auth { .. } => "auth",
            Self::RateLimited => "rate_limited",
            Self::Http { .. } => "http",
            Self::EmptyResponse => "empty_response",
            Self::Decode(_) => "decode",
            Self::Setup(_) => "setup",
        }
    }
}

/// Sends one completion request and returns the first choice's text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Short provider name for diagnostics.
    fn name(&self) -> &str;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError>;
}
