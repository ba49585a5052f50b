//! Tagged analysis outcomes.

use super::types::AnalysisResult;
use serde::Serialize;
use thiserror::Error;

/// Why an analysis did not come from the hosted model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DegradedReason {
    /// No usable credential; local keyword analysis was used.
    NoCredential,
    /// The hosted call failed; local keyword analysis was used.
    ServiceFailure(String),
    /// The model replied with something unreadable; an empty result was used.
    MalformedResponse(String),
}

impl DegradedReason {
    /// Stable short code used in log events and FFI envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoCredential => "no_credential",
            Self::ServiceFailure(_) => "service_failure",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }
}

/// Result of one analysis call, tagged with how it was produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// Extraction produced by the hosted model.
    Analyzed { result: AnalysisResult },
    /// Fallback result; see `reason`.
    Degraded {
        result: AnalysisResult,
        reason: DegradedReason,
    },
}

impl AnalysisOutcome {
    pub fn result(&self) -> &AnalysisResult {
        match self {
            Self::Analyzed { result } | Self::Degraded { result, .. } => result,
        }
    }

    pub fn into_result(self) -> AnalysisResult {
        match self {
            Self::Analyzed { result } | Self::Degraded { result, .. } => result,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn reason(&self) -> Option<&DegradedReason> {
        match self {
            Self::Analyzed { .. } => None,
            Self::Degraded { reason, .. } => Some(reason),
        }
    }

    /// `ai`, `demo`, `fallback` or `malformed`.
    pub fn mode(&self) -> &'static str {
        match self.reason() {
            None => "ai",
            Some(DegradedReason::NoCredential) => "demo",
            Some(DegradedReason::ServiceFailure(_)) => "fallback",
            Some(DegradedReason::MalformedResponse(_)) => "malformed",
        }
    }
}

/// Reasons `analyze` returns no outcome at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisRejected {
    /// The note body is empty or whitespace-only.
    #[error("note body is empty")]
    EmptyBody,
    /// The caller cancelled before the outcome was ready.
    #[error("analysis cancelled")]
    Cancelled,
}
