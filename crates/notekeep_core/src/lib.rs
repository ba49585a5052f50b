//! Core domain logic for notekeep.
//! This crate is the single source of truth for records, note analysis and
//! the notification relay; UI shells only render what it returns.

pub mod analysis;
pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod notify;
pub mod service;
pub mod store;

pub use analysis::{
    AnalysisOutcome, AnalysisRejected, AnalysisResult, AnalysisService, BackendError,
    CompletionBackend, CompletionRequest, DegradedReason, OpenAiBackend,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AnalysisConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::event::{Event, NewEvent};
pub use model::note::{NewNote, Note, NotePatch};
pub use model::reminder::{NewReminder, Reminder};
pub use model::task::{NewTask, Priority, Task};
pub use model::ItemId;
pub use notify::{Toast, ToastKind, ToastPhase, ToastRelay};
pub use service::analysis_flow::ImportSummary;
pub use service::note_service::NoteServiceError;
pub use store::{AppState, AppStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
