//! Analyze-note screen flow.
//!
//! # Responsibility
//! - Reject blank notes with a toast before any analysis call.
//! - Turn extracted items into store records on request and confirm with a
//!   toast.

use crate::analysis::outcome::{AnalysisOutcome, AnalysisRejected};
use crate::analysis::service::AnalysisService;
use crate::analysis::types::AnalysisResult;
use crate::notify::{ToastKind, ToastRelay};
use crate::store::AppStore;
use chrono::{DateTime, Utc};
use log::info;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

pub const MSG_EMPTY_NOTE: &str = "The note is empty. Add some content first.";

/// Counts of one import action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub added: usize,
    /// Items that could not be turned into records (events without a date).
    pub skipped: usize,
}

/// Runs analysis for one note as the analyze button does.
///
/// Returns `None` when the body is blank (an error toast is shown and the
/// service is never called) or when `cancel` fires first.
pub async fn request_analysis(
    service: &AnalysisService,
    relay: &Mutex<ToastRelay>,
    title: &str,
    body: &str,
    cancel: &CancellationToken,
    now: DateTime<Utc>,
) -> Option<AnalysisOutcome> {
    if body.trim().is_empty() {
        show(relay, MSG_EMPTY_NOTE, ToastKind::Error, now);
        return None;
    }

    match service.analyze(title, body, cancel).await {
        Ok(outcome) => Some(outcome),
        Err(AnalysisRejected::EmptyBody) => {
            show(relay, MSG_EMPTY_NOTE, ToastKind::Error, now);
            None
        }
        Err(AnalysisRejected::Cancelled) => None,
    }
}

/// Adds every extracted task to the store.
pub fn import_tasks(
    store: &mut AppStore,
    relay: &mut ToastRelay,
    result: &AnalysisResult,
) -> ImportSummary {
    for task in &result.tasks {
        store.add_task(task.to_new_task());
    }
    let summary = ImportSummary {
        added: result.tasks.len(),
        skipped: 0,
    };
    confirm(store, relay, "tasks", summary);
    summary
}

/// Adds every extracted reminder to the store.
pub fn import_reminders(
    store: &mut AppStore,
    relay: &mut ToastRelay,
    result: &AnalysisResult,
) -> ImportSummary {
    for reminder in &result.reminders {
        store.add_reminder(reminder.to_new_reminder());
    }
    let summary = ImportSummary {
        added: result.reminders.len(),
        skipped: 0,
    };
    confirm(store, relay, "reminders", summary);
    summary
}

/// Adds every extracted event with a usable date to the store.
pub fn import_events(
    store: &mut AppStore,
    relay: &mut ToastRelay,
    result: &AnalysisResult,
) -> ImportSummary {
    let mut summary = ImportSummary::default();
    for event in &result.events {
        match event.to_new_event() {
            Some(new_event) => {
                store.add_event(new_event);
                summary.added += 1;
            }
            None => summary.skipped += 1,
        }
    }
    confirm(store, relay, "events", summary);
    summary
}

fn confirm(store: &AppStore, relay: &mut ToastRelay, noun: &str, summary: ImportSummary) {
    let now = store.clock().now();
    info!(
        "event=analysis_import module=service status=ok kind={noun} added={} skipped={}",
        summary.added, summary.skipped
    );
    if summary.added == 0 && summary.skipped == 0 {
        relay.show(format!("No {noun} to add"), ToastKind::Info, now);
    } else if summary.skipped == 0 {
        relay.show(format!("{} {noun} added!", summary.added), ToastKind::Success, now);
    } else {
        relay.show(
            format!(
                "{} {noun} added, {} skipped without a valid date",
                summary.added, summary.skipped
            ),
            ToastKind::Info,
            now,
        );
    }
}

fn show(relay: &Mutex<ToastRelay>, message: &str, kind: ToastKind, now: DateTime<Utc>) {
    let mut guard = relay.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.show(message, kind, now);
}
