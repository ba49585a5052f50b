//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Own one `AppSession` per app instance: store, toast relay, analysis
//!   service and in-flight analysis requests.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Identifiers cross the boundary as UUID strings, dates as `YYYY-MM-DD`.
//! - No mutex guard is held across an `.await`.

use chrono::NaiveDate;
use log::{info, warn};
use notekeep_core::analysis::{ExtractedEvent, ExtractedReminder, ExtractedTask};
use notekeep_core::service::analysis_flow::{
    import_events, import_reminders, import_tasks, request_analysis, ImportSummary,
};
use notekeep_core::service::note_service::{create_note, update_note};
use notekeep_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AnalysisConfig, AnalysisOutcome, AnalysisResult, AnalysisService, AppState, AppStore, Clock,
    Event, ItemId, NewEvent, NewReminder, NewTask, Note, NotePatch, Priority, Reminder,
    SystemClock, Task, Toast, ToastKind, ToastPhase, ToastRelay,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;

const DATE_FORMAT: &str = "%Y-%m-%d";
/// Finished analyses kept per session for the `analysis_import_*` calls.
const MAX_KEPT_RESULTS: usize = 8;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// App-lifetime state shared by every screen.
#[flutter_rust_bridge::frb(opaque)]
pub struct AppSession {
    store: Mutex<AppStore>,
    relay: Mutex<ToastRelay>,
    analysis: AnalysisService,
    clock: Arc<dyn Clock>,
    in_flight: Mutex<HashMap<String, InFlight>>,
    next_generation: AtomicU64,
    results: Mutex<RecentResults>,
}

impl AppSession {
    /// Opens a session seeded with sample records.
    ///
    /// `config_json` is an `AnalysisConfig` JSON object; blank input reads
    /// the process environment instead.
    ///
    /// # FFI contract
    /// - Sync call, no network access.
    /// - Returns an error message for malformed or out-of-range config.
    #[flutter_rust_bridge::frb(sync)]
    pub fn new(config_json: String) -> Result<AppSession, String> {
        let config = if config_json.trim().is_empty() {
            AnalysisConfig::from_env()
        } else {
            AnalysisConfig::from_json_str(&config_json).map_err(|err| err.to_string())?
        };
        Ok(Self::with_clock(config, Arc::new(SystemClock)))
    }

    fn with_clock(config: AnalysisConfig, clock: Arc<dyn Clock>) -> Self {
        let state = AppState::with_sample_data(clock.now());
        let analysis = AnalysisService::from_config(config, Arc::clone(&clock));
        info!(
            "event=session_open module=ffi status=ok analysis_available={}",
            analysis.is_available()
        );
        Self {
            store: Mutex::new(AppStore::with_state(state, Arc::clone(&clock))),
            relay: Mutex::new(ToastRelay::new()),
            analysis,
            clock,
            in_flight: Mutex::new(HashMap::new()),
            next_generation: AtomicU64::new(0),
            results: Mutex::new(RecentResults::default()),
        }
    }
}

struct InFlight {
    generation: u64,
    cancel: CancellationToken,
}

/// Finished analysis results kept for the import calls, oldest first.
///
/// Holds at most `MAX_KEPT_RESULTS` entries; inserting beyond that evicts
/// the oldest request.
#[derive(Default)]
struct RecentResults {
    entries: VecDeque<(String, AnalysisResult)>,
}

impl RecentResults {
    fn insert(&mut self, request_id: String, result: AnalysisResult) {
        self.remove(&request_id);
        self.entries.push_back((request_id, result));
        while self.entries.len() > MAX_KEPT_RESULTS {
            self.entries.pop_front();
        }
    }

    fn get(&self, request_id: &str) -> Option<&AnalysisResult> {
        self.entries
            .iter()
            .find(|(id, _)| id == request_id)
            .map(|(_, result)| result)
    }

    fn remove(&mut self, request_id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(id, _)| id != request_id);
        self.entries.len() != before
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected record ID, when there is one.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<ItemId>) -> Self {
        Self {
            ok: true,
            id: id.map(|id| id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    pub completed: bool,
    /// `low|medium|high`.
    pub priority: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderItem {
    pub id: String,
    pub title: String,
    pub time: String,
    pub description: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventItem {
    pub id: String,
    pub title: String,
    pub time: String,
    pub date: String,
    pub color: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub rich_content: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// Toast as the overlay should draw it right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastView {
    pub id: u64,
    pub message: String,
    /// `success|error|info`.
    pub kind: String,
    /// `entering|visible|leaving`.
    pub phase: String,
}

/// Task candidate in an analysis response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCandidate {
    pub id: String,
    pub title: String,
    pub description: String,
    /// `low|medium|high`.
    pub priority: String,
    /// As returned by the model; may not be a valid date.
    pub due_date: Option<String>,
    pub category: String,
}

/// Reminder candidate in an analysis response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderCandidate {
    pub id: String,
    pub title: String,
    pub description: String,
    pub reminder_date: String,
    pub reminder_time: Option<String>,
    /// `once|daily|weekly|monthly`.
    pub recurrence: String,
}

/// Calendar event candidate in an analysis response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCandidate {
    pub id: String,
    pub title: String,
    pub description: String,
    /// As returned by the model; events without a valid date are skipped on
    /// import.
    pub date: String,
    pub time: Option<String>,
    pub duration: Option<String>,
    pub location: Option<String>,
    pub attendees: Vec<String>,
}

/// Analysis response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResponse {
    /// `false` when the note was blank or the call was cancelled.
    pub ok: bool,
    pub cancelled: bool,
    /// `ai|demo|fallback|malformed`; empty when `ok` is false.
    pub mode: String,
    /// Degradation code, when not produced by the hosted model.
    pub reason: Option<String>,
    pub summary: String,
    pub confidence: f64,
    pub tasks: Vec<TaskCandidate>,
    pub reminders: Vec<ReminderCandidate>,
    pub events: Vec<EventCandidate>,
}

impl AnalysisResponse {
    fn empty(cancelled: bool) -> Self {
        Self {
            ok: false,
            cancelled,
            mode: String::new(),
            reason: None,
            summary: String::new(),
            confidence: 0.0,
            tasks: Vec::new(),
            reminders: Vec::new(),
            events: Vec::new(),
        }
    }

    fn from_outcome(outcome: &AnalysisOutcome) -> Self {
        let result = outcome.result();
        Self {
            ok: true,
            cancelled: false,
            mode: outcome.mode().to_string(),
            reason: outcome.reason().map(|reason| reason.code().to_string()),
            summary: result.summary.clone(),
            confidence: result.confidence,
            tasks: result.tasks.iter().map(task_candidate).collect(),
            reminders: result.reminders.iter().map(reminder_candidate).collect(),
            events: result.events.iter().map(event_candidate).collect(),
        }
    }
}

/// Import response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResponse {
    pub ok: bool,
    pub added: u32,
    pub skipped: u32,
    pub message: String,
}

/// Adds a task.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - `priority` is `low|medium|high`; `due_date` is `YYYY-MM-DD`.
/// - Never panics; invalid input returns `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(
    session: &AppSession,
    title: String,
    priority: String,
    description: Option<String>,
    due_date: Option<String>,
    category: Option<String>,
) -> ActionResponse {
    let title = title.trim();
    if title.is_empty() {
        return ActionResponse::failure("task_add failed: title is empty");
    }
    let Some(priority) = Priority::parse(&priority) else {
        return ActionResponse::failure(format!("task_add failed: unknown priority `{priority}`"));
    };
    let due_date = match parse_optional_date(due_date) {
        Ok(value) => value,
        Err(message) => return ActionResponse::failure(format!("task_add failed: {message}")),
    };

    let mut task = NewTask::new(title, priority);
    task.description = non_blank(description);
    task.due_date = due_date;
    task.category = non_blank(category);
    let id = lock(&session.store).add_task(task);
    ActionResponse::success("Task added.", Some(id))
}

/// Flips a task between open and completed.
///
/// Unknown IDs are a no-op and still report success.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(session: &AppSession, id: String) -> ActionResponse {
    match parse_id(&id) {
        Ok(id) => {
            lock(&session.store).toggle_task(id);
            ActionResponse::success("Task updated.", Some(id))
        }
        Err(message) => ActionResponse::failure(format!("task_toggle failed: {message}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(session: &AppSession, id: String) -> ActionResponse {
    match parse_id(&id) {
        Ok(id) => {
            lock(&session.store).delete_task(id);
            ActionResponse::success("Task deleted.", Some(id))
        }
        Err(message) => ActionResponse::failure(format!("task_delete failed: {message}")),
    }
}

/// Lists tasks in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_list(session: &AppSession) -> Vec<TaskItem> {
    lock(&session.store)
        .state()
        .tasks()
        .iter()
        .map(to_task_item)
        .collect()
}

/// Lists tasks that are not completed yet.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_open(session: &AppSession) -> Vec<TaskItem> {
    lock(&session.store)
        .state()
        .open_tasks()
        .map(to_task_item)
        .collect()
}

/// Adds a reminder; `time` is a free-form display label.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_add(
    session: &AppSession,
    title: String,
    time: String,
    description: Option<String>,
    date: Option<String>,
) -> ActionResponse {
    let title = title.trim();
    if title.is_empty() {
        return ActionResponse::failure("reminder_add failed: title is empty");
    }
    let date = match parse_optional_date(date) {
        Ok(value) => value,
        Err(message) => return ActionResponse::failure(format!("reminder_add failed: {message}")),
    };

    let mut reminder = NewReminder::new(title, time.trim());
    reminder.description = non_blank(description);
    reminder.date = date;
    let id = lock(&session.store).add_reminder(reminder);
    ActionResponse::success("Reminder added.", Some(id))
}

#[flutter_rust_bridge::frb(sync)]
pub fn reminder_delete(session: &AppSession, id: String) -> ActionResponse {
    match parse_id(&id) {
        Ok(id) => {
            lock(&session.store).delete_reminder(id);
            ActionResponse::success("Reminder deleted.", Some(id))
        }
        Err(message) => ActionResponse::failure(format!("reminder_delete failed: {message}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn reminders_list(session: &AppSession) -> Vec<ReminderItem> {
    lock(&session.store)
        .state()
        .reminders()
        .iter()
        .map(to_reminder_item)
        .collect()
}

/// Adds a calendar event on `date` (`YYYY-MM-DD`).
///
/// A missing `color` takes the default calendar color.
#[flutter_rust_bridge::frb(sync)]
pub fn event_add(
    session: &AppSession,
    title: String,
    time: String,
    date: String,
    color: Option<String>,
    description: Option<String>,
) -> ActionResponse {
    let title = title.trim();
    if title.is_empty() {
        return ActionResponse::failure("event_add failed: title is empty");
    }
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(message) => return ActionResponse::failure(format!("event_add failed: {message}")),
    };

    let mut event = NewEvent::new(title, time.trim(), date);
    if let Some(color) = non_blank(color) {
        event.color = color;
    }
    event.description = non_blank(description);
    let id = lock(&session.store).add_event(event);
    ActionResponse::success("Event added.", Some(id))
}

#[flutter_rust_bridge::frb(sync)]
pub fn event_delete(session: &AppSession, id: String) -> ActionResponse {
    match parse_id(&id) {
        Ok(id) => {
            lock(&session.store).delete_event(id);
            ActionResponse::success("Event deleted.", Some(id))
        }
        Err(message) => ActionResponse::failure(format!("event_delete failed: {message}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn events_list(session: &AppSession) -> Vec<EventItem> {
    lock(&session.store)
        .state()
        .events()
        .iter()
        .map(to_event_item)
        .collect()
}

/// Lists events on one calendar day (`YYYY-MM-DD`).
///
/// An unparseable date yields an empty list.
#[flutter_rust_bridge::frb(sync)]
pub fn events_on_date(session: &AppSession, date: String) -> Vec<EventItem> {
    let Ok(date) = parse_date(&date) else {
        warn!("event=events_on_date module=ffi status=rejected reason=invalid_date");
        return Vec::new();
    };
    lock(&session.store)
        .state()
        .events_on(date)
        .map(to_event_item)
        .collect()
}

/// Creates an empty note from the new-note dialog.
///
/// # FFI contract
/// - Blank titles fail and raise an error toast.
#[flutter_rust_bridge::frb(sync)]
pub fn note_add(session: &AppSession, title: String) -> ActionResponse {
    let mut store = lock(&session.store);
    let mut relay = lock(&session.relay);
    match create_note(&mut store, &mut relay, &title) {
        Ok(id) => ActionResponse::success("Note created.", Some(id)),
        Err(err) => ActionResponse::failure(format!("note_add failed: {err}")),
    }
}

/// Renames a note and/or saves rich editor HTML into it.
///
/// # FFI contract
/// - `None` fields are left unchanged.
/// - Success raises the "saved" toast; `updated_at` always moves forward.
#[flutter_rust_bridge::frb(sync)]
pub fn note_update(
    session: &AppSession,
    id: String,
    title: Option<String>,
    rich_content: Option<String>,
) -> ActionResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(format!("note_update failed: {message}")),
    };
    let mut patch = match rich_content {
        Some(html) => NotePatch::from_rich_content(html),
        None => NotePatch::default(),
    };
    if let Some(title) = title {
        patch = patch.title(title);
    }
    if patch.is_empty() {
        return ActionResponse::failure("note_update failed: nothing to update");
    }

    let mut store = lock(&session.store);
    let mut relay = lock(&session.relay);
    match update_note(&mut store, &mut relay, id, patch) {
        Ok(()) => ActionResponse::success("Note saved.", Some(id)),
        Err(err) => ActionResponse::failure(format!("note_update failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(session: &AppSession, id: String) -> ActionResponse {
    match parse_id(&id) {
        Ok(id) => {
            lock(&session.store).delete_note(id);
            ActionResponse::success("Note deleted.", Some(id))
        }
        Err(message) => ActionResponse::failure(format!("note_delete failed: {message}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn notes_list(session: &AppSession) -> Vec<NoteItem> {
    lock(&session.store)
        .state()
        .notes()
        .iter()
        .map(to_note_item)
        .collect()
}

/// Shows a toast, replacing the current one.
///
/// Unknown `kind` values fall back to `info`. Returns the toast ID.
#[flutter_rust_bridge::frb(sync)]
pub fn toast_show(session: &AppSession, message: String, kind: String) -> u64 {
    let kind = ToastKind::parse(&kind).unwrap_or_else(|| {
        warn!("event=toast_show module=ffi status=fallback reason=unknown_kind");
        ToastKind::Info
    });
    lock(&session.relay).show(message, kind, session.clock.now())
}

/// Toast to draw at this moment; expired toasts are dropped.
#[flutter_rust_bridge::frb(sync)]
pub fn toast_current(session: &AppSession) -> Option<ToastView> {
    let now = session.clock.now();
    let mut relay = lock(&session.relay);
    relay.tick(now);
    relay
        .visible(now)
        .map(|toast| to_toast_view(toast, relay.phase(now)))
}

/// Hides toast `id` if it is still current.
#[flutter_rust_bridge::frb(sync)]
pub fn toast_dismiss(session: &AppSession, id: u64) -> bool {
    lock(&session.relay).dismiss(id)
}

/// Whether analysis reaches the hosted model (`false` means demo mode).
#[flutter_rust_bridge::frb(sync)]
pub fn analysis_available(session: &AppSession) -> bool {
    session.analysis.is_available()
}

/// Analyzes one note under caller-chosen `request_id`.
///
/// # FFI contract
/// - Async call; may perform one network request.
/// - Reusing a `request_id` cancels the earlier request.
/// - Blank bodies return `ok=false` and raise an error toast.
/// - Cancelled requests return `cancelled=true`.
/// - A successful result is kept for the `analysis_import_*` calls until
///   `analysis_discard`, or until newer requests push it out.
pub async fn analysis_start(
    session: &AppSession,
    request_id: String,
    title: String,
    body: String,
) -> AnalysisResponse {
    let cancel = CancellationToken::new();
    let generation = session.next_generation.fetch_add(1, Ordering::Relaxed);
    let previous = lock(&session.in_flight).insert(
        request_id.clone(),
        InFlight {
            generation,
            cancel: cancel.clone(),
        },
    );
    if let Some(previous) = previous {
        previous.cancel.cancel();
    }

    let outcome = request_analysis(
        &session.analysis,
        &session.relay,
        &title,
        &body,
        &cancel,
        session.clock.now(),
    )
    .await;

    {
        let mut in_flight = lock(&session.in_flight);
        if in_flight
            .get(&request_id)
            .is_some_and(|entry| entry.generation == generation)
        {
            in_flight.remove(&request_id);
        }
    }

    match outcome {
        Some(outcome) => {
            let response = AnalysisResponse::from_outcome(&outcome);
            lock(&session.results).insert(request_id, outcome.into_result());
            response
        }
        None => AnalysisResponse::empty(cancel.is_cancelled()),
    }
}

/// Cancels the in-flight request `request_id`.
///
/// Returns whether a request was cancelled.
#[flutter_rust_bridge::frb(sync)]
pub fn analysis_cancel(session: &AppSession, request_id: String) -> bool {
    match lock(&session.in_flight).remove(&request_id) {
        Some(entry) => {
            entry.cancel.cancel();
            info!("event=analysis_cancel module=ffi status=ok");
            true
        }
        None => false,
    }
}

/// Drops the stored result of analysis `request_id`.
///
/// Call once the analysis screen closes. Returns whether a result was
/// stored.
#[flutter_rust_bridge::frb(sync)]
pub fn analysis_discard(session: &AppSession, request_id: String) -> bool {
    lock(&session.results).remove(&request_id)
}

/// Adds the tasks of analysis `request_id` to the store.
#[flutter_rust_bridge::frb(sync)]
pub fn analysis_import_tasks(session: &AppSession, request_id: String) -> ImportResponse {
    import_from(session, &request_id, import_tasks)
}

/// Adds the reminders of analysis `request_id` to the store.
#[flutter_rust_bridge::frb(sync)]
pub fn analysis_import_reminders(session: &AppSession, request_id: String) -> ImportResponse {
    import_from(session, &request_id, import_reminders)
}

/// Adds the dated events of analysis `request_id` to the store.
#[flutter_rust_bridge::frb(sync)]
pub fn analysis_import_events(session: &AppSession, request_id: String) -> ImportResponse {
    import_from(session, &request_id, import_events)
}

fn import_from(
    session: &AppSession,
    request_id: &str,
    import: fn(&mut AppStore, &mut ToastRelay, &AnalysisResult) -> ImportSummary,
) -> ImportResponse {
    let results = lock(&session.results);
    let Some(result) = results.get(request_id) else {
        return ImportResponse {
            ok: false,
            added: 0,
            skipped: 0,
            message: format!("no analysis result for request `{request_id}`"),
        };
    };

    let mut store = lock(&session.store);
    let mut relay = lock(&session.relay);
    let summary = import(&mut store, &mut relay, result);
    ImportResponse {
        ok: true,
        added: count(summary.added),
        skipped: count(summary.skipped),
        message: relay
            .current()
            .map(|toast| toast.message.clone())
            .unwrap_or_default(),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn count(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn parse_id(raw: &str) -> Result<ItemId, String> {
    ItemId::parse_str(raw.trim()).map_err(|_| format!("invalid id `{}`", raw.trim()))
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| format!("invalid date `{}`, expected YYYY-MM-DD", raw.trim()))
}

fn parse_optional_date(raw: Option<String>) -> Result<Option<NaiveDate>, String> {
    non_blank(raw).map(|value| parse_date(&value)).transpose()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id.to_string(),
        title: task.title.clone(),
        completed: task.completed,
        priority: task.priority.as_str().to_string(),
        description: task.description.clone(),
        due_date: task.due_date.map(format_date),
        category: task.category.clone(),
    }
}

fn to_reminder_item(reminder: &Reminder) -> ReminderItem {
    ReminderItem {
        id: reminder.id.to_string(),
        title: reminder.title.clone(),
        time: reminder.time.clone(),
        description: reminder.description.clone(),
        date: reminder.date.map(format_date),
    }
}

fn to_event_item(event: &Event) -> EventItem {
    EventItem {
        id: event.id.to_string(),
        title: event.title.clone(),
        time: event.time.clone(),
        date: format_date(event.date),
        color: event.color.clone(),
        description: event.description.clone(),
    }
}

fn to_note_item(note: &Note) -> NoteItem {
    NoteItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        content: note.content.clone(),
        rich_content: note.rich_content.clone(),
        created_at_ms: note.created_at.timestamp_millis(),
        updated_at_ms: note.updated_at.timestamp_millis(),
    }
}

fn to_toast_view(toast: &Toast, phase: ToastPhase) -> ToastView {
    let phase = match phase {
        ToastPhase::Entering => "entering",
        ToastPhase::Visible => "visible",
        ToastPhase::Leaving => "leaving",
        ToastPhase::Hidden => "hidden",
    };
    ToastView {
        id: toast.id,
        message: toast.message.clone(),
        kind: toast.kind.as_str().to_string(),
        phase: phase.to_string(),
    }
}

fn task_candidate(task: &ExtractedTask) -> TaskCandidate {
    TaskCandidate {
        id: task.id.clone(),
        title: task.title.clone(),
        description: task.description.clone(),
        priority: task.priority.as_str().to_string(),
        due_date: task.due_date.clone(),
        category: task.category.clone(),
    }
}

fn reminder_candidate(reminder: &ExtractedReminder) -> ReminderCandidate {
    ReminderCandidate {
        id: reminder.id.clone(),
        title: reminder.title.clone(),
        description: reminder.description.clone(),
        reminder_date: reminder.reminder_date.clone(),
        reminder_time: reminder.reminder_time.clone(),
        recurrence: reminder.recurrence.as_str().to_string(),
    }
}

fn event_candidate(event: &ExtractedEvent) -> EventCandidate {
    EventCandidate {
        id: event.id.clone(),
        title: event.title.clone(),
        description: event.description.clone(),
        date: event.date.clone(),
        time: event.time.clone(),
        duration: event.duration.clone(),
        location: event.location.clone(),
        attendees: event.attendees.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        analysis_available, analysis_cancel, analysis_discard, analysis_import_events,
        analysis_import_tasks, analysis_start, core_version, event_add, events_list,
        events_on_date, init_logging, note_add, note_update, notes_list, ping, task_add,
        task_toggle, tasks_list, tasks_open, toast_current, toast_dismiss, toast_show,
        AppSession, MAX_KEPT_RESULTS,
    };
    use chrono::{Duration, TimeZone, Utc};
    use notekeep_core::{AnalysisConfig, FixedClock};
    use std::sync::Arc;

    fn session_at_fixed_time() -> (AppSession, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap(),
        ));
        let session = AppSession::with_clock(AnalysisConfig::default(), clock.clone());
        (session, clock)
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn session_rejects_out_of_range_config() {
        let result = AppSession::new(r#"{"temperature": 9.0}"#.to_string());
        assert!(result.is_err());
    }

    #[test]
    fn session_without_key_runs_in_demo_mode() {
        let session = AppSession::new("{}".to_string()).unwrap();
        assert!(!analysis_available(&session));
        assert_eq!(tasks_list(&session).len(), 4);
    }

    #[test]
    fn task_add_and_toggle_roundtrip_through_envelopes() {
        let (session, _) = session_at_fixed_time();
        let added = task_add(
            &session,
            "  Belastingaangifte ".to_string(),
            "HIGH".to_string(),
            None,
            Some("2026-11-01".to_string()),
            Some(" ".to_string()),
        );
        assert!(added.ok, "{}", added.message);
        let id = added.id.unwrap();

        let toggled = task_toggle(&session, id.clone());
        assert!(toggled.ok);

        let task = tasks_list(&session)
            .into_iter()
            .find(|task| task.id == id)
            .unwrap();
        assert_eq!(task.title, "Belastingaangifte");
        assert_eq!(task.priority, "high");
        assert_eq!(task.due_date.as_deref(), Some("2026-11-01"));
        assert!(task.category.is_none());
        assert!(task.completed);
    }

    #[test]
    fn task_add_rejects_unknown_priority_and_bad_date() {
        let (session, _) = session_at_fixed_time();
        let bad_priority = task_add(&session, "t".into(), "urgent".into(), None, None, None);
        assert!(!bad_priority.ok);
        let bad_date = task_add(
            &session,
            "t".into(),
            "low".into(),
            None,
            Some("tomorrow".into()),
            None,
        );
        assert!(!bad_date.ok);
        assert!(bad_date.message.contains("YYYY-MM-DD"));
    }

    #[test]
    fn toggle_with_malformed_id_fails_without_panicking() {
        let (session, _) = session_at_fixed_time();
        let response = task_toggle(&session, "not-a-uuid".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid id"));
    }

    #[test]
    fn event_add_uses_default_color() {
        let (session, _) = session_at_fixed_time();
        let response = event_add(
            &session,
            "Tandarts".into(),
            "11:15".into(),
            "2026-10-20".into(),
            None,
            None,
        );
        assert!(response.ok, "{}", response.message);
        let event = events_list(&session)
            .into_iter()
            .find(|event| Some(&event.id) == response.id.as_ref())
            .unwrap();
        assert_eq!(event.color, "#10b981");
        assert_eq!(event.date, "2026-10-20");
    }

    #[test]
    fn events_on_date_lists_only_that_day() {
        let (session, _) = session_at_fixed_time();
        for date in ["2026-12-01", "2026-12-02"] {
            let response = event_add(
                &session,
                format!("Etentje {date}"),
                "19:00".into(),
                date.into(),
                None,
                None,
            );
            assert!(response.ok, "{}", response.message);
        }

        let events = events_on_date(&session, " 2026-12-01 ".into());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Etentje 2026-12-01");
        assert!(events_on_date(&session, "2026-12-03".into()).is_empty());
        assert!(events_on_date(&session, "next friday".into()).is_empty());
    }

    #[test]
    fn tasks_open_skips_completed_tasks() {
        let (session, _) = session_at_fixed_time();
        let id = task_add(&session, "Fiets maken".into(), "low".into(), None, None, None)
            .id
            .unwrap();
        assert!(tasks_open(&session).iter().any(|task| task.id == id));

        assert!(task_toggle(&session, id.clone()).ok);
        let open = tasks_open(&session);
        assert!(open.iter().all(|task| !task.completed));
        assert!(!open.iter().any(|task| task.id == id));
        assert!(open.len() < tasks_list(&session).len());
    }

    #[test]
    fn note_add_with_blank_title_raises_error_toast() {
        let (session, _) = session_at_fixed_time();
        let response = note_add(&session, "   ".to_string());
        assert!(!response.ok);
        let toast = toast_current(&session).unwrap();
        assert_eq!(toast.kind, "error");
        assert_eq!(toast.phase, "entering");
    }

    #[test]
    fn note_update_saves_rich_content_and_advances_timestamp() {
        let (session, clock) = session_at_fixed_time();
        let id = note_add(&session, "Ideeën".to_string()).id.unwrap();
        let before = notes_list(&session)
            .into_iter()
            .find(|note| note.id == id)
            .unwrap();

        clock.advance(Duration::seconds(10));
        let response = note_update(
            &session,
            id.clone(),
            None,
            Some("<p>Boek <b>lezen</b></p>".to_string()),
        );
        assert!(response.ok, "{}", response.message);

        let after = notes_list(&session)
            .into_iter()
            .find(|note| note.id == id)
            .unwrap();
        assert_eq!(after.content, "Boek lezen");
        assert!(after.updated_at_ms > before.updated_at_ms);
        assert!(!note_update(&session, id, None, None).ok);
    }

    #[test]
    fn toast_lifecycle_follows_clock() {
        let (session, clock) = session_at_fixed_time();
        let first = toast_show(&session, "Eerste".into(), "success".into());
        let second = toast_show(&session, "Tweede".into(), "bogus".into());

        let toast = toast_current(&session).unwrap();
        assert_eq!(toast.id, second);
        assert_eq!(toast.kind, "info");
        assert!(!toast_dismiss(&session, first));

        clock.advance(Duration::milliseconds(1_000));
        assert_eq!(toast_current(&session).unwrap().phase, "visible");

        clock.advance(Duration::milliseconds(2_000));
        assert!(toast_current(&session).is_none());
    }

    #[tokio::test]
    async fn demo_analysis_can_be_imported() {
        let (session, _) = session_at_fixed_time();
        let body =
            "Morgen vergadering, daarna moet ik de presentatie maken voor de deadline".to_string();
        let response = analysis_start(&session, "req-1".into(), "Werk".into(), body).await;

        assert!(response.ok);
        assert_eq!(response.mode, "demo");
        assert_eq!(response.reason.as_deref(), Some("no_credential"));
        assert_eq!(response.tasks.len(), 1);
        assert_eq!(response.tasks[0].priority, "high");
        assert_eq!(response.tasks[0].due_date.as_deref(), Some("2026-10-21"));
        assert_eq!(response.tasks[0].category, "work");

        assert_eq!(response.reminders.len(), 1);
        assert_eq!(response.reminders[0].reminder_date, "2026-10-19");
        assert_eq!(response.reminders[0].reminder_time.as_deref(), Some("09:00"));
        assert_eq!(response.reminders[0].recurrence, "once");

        assert_eq!(response.events.len(), 1);
        let event = &response.events[0];
        assert_eq!(event.date, "2026-10-19");
        assert_eq!(event.time.as_deref(), Some("14:00"));
        assert_eq!(event.duration.as_deref(), Some("1 hour"));
        assert!(event.location.is_none());
        assert!(event.attendees.is_empty());

        let tasks_before = tasks_list(&session).len();
        let imported = analysis_import_tasks(&session, "req-1".into());
        assert!(imported.ok);
        assert_eq!(imported.added, 1);
        assert_eq!(tasks_list(&session).len(), tasks_before + 1);

        let events = analysis_import_events(&session, "req-1".into());
        assert_eq!(events.added, 1);
        assert_eq!(events.message, "1 events added!");
    }

    #[tokio::test]
    async fn blank_body_is_reported_without_result() {
        let (session, _) = session_at_fixed_time();
        let response = analysis_start(&session, "req-2".into(), "Leeg".into(), "  ".into()).await;
        assert!(!response.ok);
        assert!(!response.cancelled);
        assert_eq!(toast_current(&session).unwrap().kind, "error");
        assert!(!analysis_import_tasks(&session, "req-2".into()).ok);
    }

    #[tokio::test]
    async fn discarded_result_can_no_longer_be_imported() {
        let (session, _) = session_at_fixed_time();
        let body = "Ik moet de presentatie maken".to_string();
        assert!(analysis_start(&session, "req-3".into(), "Werk".into(), body).await.ok);

        assert!(analysis_discard(&session, "req-3".into()));
        assert!(!analysis_discard(&session, "req-3".into()));
        assert!(!analysis_import_tasks(&session, "req-3".into()).ok);
    }

    #[tokio::test]
    async fn kept_results_are_capped_with_oldest_evicted() {
        let (session, _) = session_at_fixed_time();
        let total = MAX_KEPT_RESULTS + 4;
        for index in 0..total {
            let response = analysis_start(
                &session,
                format!("req-{index}"),
                "Werk".into(),
                "Ik moet de presentatie maken".into(),
            )
            .await;
            assert!(response.ok);
        }
        // Reusing an id replaces its entry rather than adding one.
        let last = format!("req-{}", total - 1);
        let body = "Ik moet de presentatie maken".to_string();
        assert!(analysis_start(&session, last.clone(), "Werk".into(), body).await.ok);

        assert_eq!(super::lock(&session.results).len(), MAX_KEPT_RESULTS);
        assert!(!analysis_import_tasks(&session, "req-0".into()).ok);
        let oldest_kept = format!("req-{}", total - MAX_KEPT_RESULTS);
        assert!(analysis_import_tasks(&session, oldest_kept).ok);
        assert!(analysis_import_tasks(&session, last).ok);
    }

    #[test]
    fn cancel_of_unknown_request_reports_false() {
        let (session, _) = session_at_fixed_time();
        assert!(!analysis_cancel(&session, "missing".into()));
    }
}
