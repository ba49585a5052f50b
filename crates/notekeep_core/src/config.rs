//! Analysis service configuration.
//!
//! # Responsibility
//! - Resolve the hosted-model credential and request settings.
//! - Decide whether the analysis service runs in real or demo mode.
//!
//! # Invariants
//! - A blank key or the placeholder sentinel is treated exactly like an
//!   absent key.
//! - The API key is never logged or included in `Debug` output.

use serde::Deserialize;
use std::fmt::{Debug, Formatter};
use std::time::Duration;
use thiserror::Error;

/// Placeholder shipped in sample env files; forces demo mode.
pub const API_KEY_PLACEHOLDER: &str = "your_openai_api_key_here";

/// Runtime env var checked first for the credential.
pub const ENV_API_KEY: &str = "NOTEKEEP_OPENAI_API_KEY";
/// Conventional env var checked second.
pub const ENV_API_KEY_FALLBACK: &str = "OPENAI_API_KEY";
pub const ENV_BASE_URL: &str = "NOTEKEEP_OPENAI_BASE_URL";
pub const ENV_MODEL: &str = "NOTEKEEP_OPENAI_MODEL";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 1500;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_LANGUAGE: &str = "Dutch";

/// Configuration parse errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid analysis config JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid analysis config: {0}")]
    Invalid(String),
}

/// Settings for the note-analysis service.
#[derive(Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub request_timeout_secs: u64,
    /// Language the model is asked to answer in.
    pub language: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl Debug for AnalysisConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("language", &self.language)
            .finish()
    }
}

impl AnalysisConfig {
    /// Builds config from process environment, then build-time environment.
    ///
    /// Lookup order for the key: `NOTEKEEP_OPENAI_API_KEY`, `OPENAI_API_KEY`,
    /// then `OPENAI_API_KEY` captured at compile time.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok(), option_env!("OPENAI_API_KEY"))
    }

    /// Parses config from a JSON object; missing fields take defaults.
    ///
    /// # Errors
    /// - Returns `InvalidJson` when the text is not a JSON object of the
    ///   expected shape.
    /// - Returns `Invalid` when numeric settings are out of range.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        let config: Self = if trimmed.is_empty() {
            Self::default()
        } else {
            serde_json::from_str(trimmed)?
        };
        config.validate()?;
        Ok(config)
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        build_time_key: Option<&str>,
    ) -> Self {
        let api_key = lookup(ENV_API_KEY)
            .filter(|value| is_usable_key(value))
            .or_else(|| lookup(ENV_API_KEY_FALLBACK).filter(|value| is_usable_key(value)))
            .or_else(|| {
                build_time_key
                    .filter(|value| is_usable_key(value))
                    .map(str::to_string)
            });

        let mut config = Self {
            api_key,
            ..Self::default()
        };
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|value| !value.trim().is_empty()) {
            config.base_url = base_url.trim().to_string();
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|value| !value.trim().is_empty()) {
            config.model = model.trim().to_string();
        }
        config
    }

    /// Returns the credential only when it can actually authenticate.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|value| is_usable_key(value))
    }

    /// Whether real (non-demo) analysis is configured.
    pub fn has_credential(&self) -> bool {
        self.usable_api_key().is_some()
    }

    /// Per-request timeout; `0` disables the timeout.
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid(format!(
                "temperature must be within 0.0..=2.0, got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::Invalid("max_tokens must be > 0".to_string()));
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url cannot be empty".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model cannot be empty".to_string()));
        }
        Ok(())
    }
}

fn is_usable_key(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed != API_KEY_PLACEHOLDER
}
