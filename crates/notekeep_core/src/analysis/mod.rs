//! Note analysis: extracting tasks, reminders and events from note text.
//!
//! # Responsibility
//! - Turn `(title, body)` into an `AnalysisResult` via a hosted chat model.
//! - Fall back to local keyword matching when no credential is configured or
//!   the hosted call fails.
//! - Report how a result was produced through `AnalysisOutcome`.
//!
//! # Invariants
//! - Apart from blank input and caller cancellation, `analyze` always yields a
//!   well-formed result: arrays present, confidence within `[0, 1]`.
//! - Blank bodies are rejected before any backend call.
//! - Extracted item ids are unique within one result only.

pub mod backend;
pub mod demo;
pub mod openai;
pub mod outcome;
pub mod parse;
pub mod prompt;
pub mod service;
pub mod types;

pub use backend::{BackendError, CompletionBackend, CompletionRequest};
pub use demo::demo_analysis;
pub use openai::OpenAiBackend;
pub use outcome::{AnalysisOutcome, AnalysisRejected, DegradedReason};
pub use parse::{malformed_result, parse_model_reply, strip_code_fences};
pub use prompt::{build_prompt, system_instruction};
pub use service::AnalysisService;
pub use types::{
    AnalysisResult, ExtractedEvent, ExtractedReminder, ExtractedTask, Recurrence,
};
