//! Note-analysis use-case service.
//!
//! # Responsibility
//! - Validate input, pick real or demo analysis, and race the hosted call
//!   against the caller's cancellation token.
//! - Collapse every backend and parse failure into a tagged degraded outcome.
//!
//! # Invariants
//! - Blank bodies are rejected before any backend call.
//! - A cancelled call never yields an outcome, even if the backend finished.
//! - Log events carry lengths and codes only, never note text or the key.

use super::backend::{CompletionBackend, CompletionRequest};
use super::demo::demo_analysis;
use super::openai::OpenAiBackend;
use super::outcome::{AnalysisOutcome, AnalysisRejected, DegradedReason};
use super::parse::{malformed_result, parse_model_reply};
use super::prompt::{build_prompt, system_instruction};
use crate::clock::Clock;
use crate::config::AnalysisConfig;
use log::{info, warn};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Stateless analysis service; concurrent calls are independent.
pub struct AnalysisService {
    config: AnalysisConfig,
    backend: Option<Arc<dyn CompletionBackend>>,
    clock: Arc<dyn Clock>,
}

impl AnalysisService {
    /// Creates a service with an explicit backend (or none, for demo mode).
    pub fn new(
        config: AnalysisConfig,
        backend: Option<Arc<dyn CompletionBackend>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            backend,
            clock,
        }
    }

    /// Creates a service, building the HTTP backend only when the config
    /// carries a usable credential.
    ///
    /// A backend that fails to build leaves the service in demo mode.
    pub fn from_config(config: AnalysisConfig, clock: Arc<dyn Clock>) -> Self {
        let backend = match config.usable_api_key() {
            Some(key) => {
                match OpenAiBackend::new(&config.base_url, key, config.request_timeout()) {
                    Ok(backend) => Some(Arc::new(backend) as Arc<dyn CompletionBackend>),
                    Err(err) => {
                        warn!(
                            "event=analysis_backend_init module=analysis status=error error_code={} error={}",
                            err.code(),
                            err
                        );
                        None
                    }
                }
            }
            None => {
                warn!(
                    "event=analysis_backend_init module=analysis status=skipped reason=no_credential"
                );
                None
            }
        };
        Self::new(config, backend, clock)
    }

    /// Whether calls reach the hosted model; `false` means demo mode.
    pub fn is_available(&self) -> bool {
        self.backend.is_some() && self.config.has_credential()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyzes one note.
    ///
    /// # Errors
    /// - `EmptyBody` when `body` is blank; no backend call is made.
    /// - `Cancelled` when `cancel` fires before the outcome is ready.
    ///
    /// Every other failure is reported inside `AnalysisOutcome::Degraded`.
    pub async fn analyze(
        &self,
        title: &str,
        body: &str,
        cancel: &CancellationToken,
    ) -> Result<AnalysisOutcome, AnalysisRejected> {
        if body.trim().is_empty() {
            info!("event=analysis_rejected module=analysis status=rejected reason=empty_body");
            return Err(AnalysisRejected::EmptyBody);
        }
        if cancel.is_cancelled() {
            return Err(AnalysisRejected::Cancelled);
        }

        let backend = match (&self.backend, self.is_available()) {
            (Some(backend), true) => Arc::clone(backend),
            _ => {
                let outcome = AnalysisOutcome::Degraded {
                    result: demo_analysis(title, body, self.clock.now()),
                    reason: DegradedReason::NoCredential,
                };
                log_outcome(&outcome, None);
                return Ok(outcome);
            }
        };

        let request = CompletionRequest {
            model: self.config.model.clone(),
            system: system_instruction(&self.config.language),
            prompt: build_prompt(title, body, &self.config.language),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let started_at = Instant::now();
        info!(
            "event=analysis_start module=analysis status=start backend={} body_chars={}",
            backend.name(),
            body.chars().count()
        );

        let reply = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            reply = backend.complete(&request) => Some(reply),
        };

        let reply = match reply {
            Some(reply) if !cancel.is_cancelled() => reply,
            _ => {
                info!(
                    "event=analysis_cancelled module=analysis status=cancelled duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Err(AnalysisRejected::Cancelled);
            }
        };

        let outcome = match reply {
            Ok(text) => match parse_model_reply(&text) {
                Ok(result) => AnalysisOutcome::Analyzed { result },
                Err(message) => AnalysisOutcome::Degraded {
                    result: malformed_result(),
                    reason: DegradedReason::MalformedResponse(message),
                },
            },
            Err(err) => {
                warn!(
                    "event=analysis_backend_call module=analysis status=error error_code={} error={}",
                    err.code(),
                    err
                );
                AnalysisOutcome::Degraded {
                    result: demo_analysis(title, body, self.clock.now()),
                    reason: DegradedReason::ServiceFailure(err.to_string()),
                }
            }
        };

        log_outcome(&outcome, Some(started_at));
        Ok(outcome)
    }
}

fn log_outcome(outcome: &AnalysisOutcome, started_at: Option<Instant>) {
    let duration_ms = started_at
        .map(|started| started.elapsed().as_millis())
        .unwrap_or(0);
    let result = outcome.result();
    match outcome.reason() {
        None => info!(
            "event=analysis_done module=analysis status=ok mode={} tasks={} reminders={} events={} duration_ms={}",
            outcome.mode(),
            result.tasks.len(),
            result.reminders.len(),
            result.events.len(),
            duration_ms
        ),
        Some(reason) => warn!(
            "event=analysis_degraded module=analysis status=degraded mode={} reason={} tasks={} reminders={} events={} duration_ms={}",
            outcome.mode(),
            reason.code(),
            result.tasks.len(),
            result.reminders.len(),
            result.events.len(),
            duration_ms
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::AnalysisService;
    use crate::analysis::outcome::AnalysisRejected;
    use crate::clock::FixedClock;
    use crate::config::AnalysisConfig;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    fn demo_service() -> AnalysisService {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        AnalysisService::from_config(AnalysisConfig::default(), Arc::new(FixedClock::new(now)))
    }

    #[tokio::test]
    async fn whitespace_body_is_rejected() {
        let service = demo_service();
        let err = service
            .analyze("t", " \n\t ", &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err, AnalysisRejected::EmptyBody);
    }

    #[tokio::test]
    async fn pre_cancelled_token_short_circuits() {
        let service = demo_service();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = service.analyze("t", "meeting", &cancel).await.unwrap_err();
        assert_eq!(err, AnalysisRejected::Cancelled);
    }

    #[test]
    fn from_config_without_key_is_unavailable() {
        assert!(!demo_service().is_available());
    }
}
