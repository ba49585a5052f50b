//! Model reply parsing.
//!
//! # Responsibility
//! - Strip markdown code fences around the model's JSON.
//! - Map loosely shaped JSON into a well-formed `AnalysisResult`.
//!
//! # Invariants
//! - Output arrays are always present and confidence is within `[0, 1]`.
//! - Item ids are unique per category within one result.
//! - Only unparseable text or a bare `null` is an error; any other JSON
//!   value is repaired with defaults.

use super::types::{AnalysisResult, ExtractedEvent, ExtractedReminder, ExtractedTask, Recurrence};
use crate::model::task::Priority;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashSet;

static CODE_FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json)?\n?").expect("valid code fence regex"));

/// Confidence reported when the model omits one (or reports zero).
pub const DEFAULT_MODEL_CONFIDENCE: f64 = 0.7;
/// Confidence of the degraded result used for unreadable replies.
pub const MALFORMED_CONFIDENCE: f64 = 0.1;

const DEFAULT_SUMMARY: &str = "Analysis complete";
const MALFORMED_SUMMARY: &str = "Could not process the AI response";

/// Removes every "```json" / "```" marker (plus one trailing newline each).
pub fn strip_code_fences(raw: &str) -> String {
    CODE_FENCE_RE.replace_all(raw, "").trim().to_string()
}

/// Degraded result used when the model reply cannot be read.
pub fn malformed_result() -> AnalysisResult {
    AnalysisResult {
        tasks: Vec::new(),
        reminders: Vec::new(),
        events: Vec::new(),
        summary: MALFORMED_SUMMARY.to_string(),
        confidence: MALFORMED_CONFIDENCE,
    }
}

/// Parses the model's reply text into a normalized result.
///
/// # Errors
/// Returns a short diagnostic when the fence-stripped text is not JSON or is
/// `null`. The message never contains the reply text itself.
pub fn parse_model_reply(raw: &str) -> Result<AnalysisResult, String> {
    let cleaned = strip_code_fences(raw);
    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|err| format!("reply is not valid JSON: {err}"))?;
    let empty = Map::new();
    let object = match &value {
        Value::Object(object) => object,
        Value::Null => return Err("reply JSON is null".to_string()),
        // Arrays and scalars carry no fields; every field takes its default.
        _ => &empty,
    };

    let mut task_ids = IdAllocator::new("task");
    let tasks = items(object, "tasks")
        .filter_map(|item| {
            let title = text(item, "title")?;
            Some(ExtractedTask {
                id: task_ids.claim(text(item, "id")),
                title,
                description: text(item, "description").unwrap_or_default(),
                priority: text(item, "priority")
                    .and_then(|value| Priority::parse(&value))
                    .unwrap_or(Priority::Medium),
                due_date: text(item, "dueDate"),
                category: text(item, "category").unwrap_or_default(),
            })
        })
        .collect();

    let mut reminder_ids = IdAllocator::new("reminder");
    let reminders = items(object, "reminders")
        .filter_map(|item| {
            let title = text(item, "title")?;
            Some(ExtractedReminder {
                id: reminder_ids.claim(text(item, "id")),
                title,
                description: text(item, "description").unwrap_or_default(),
                reminder_date: text(item, "reminderDate").unwrap_or_default(),
                reminder_time: text(item, "reminderTime"),
                recurrence: text(item, "type")
                    .and_then(|value| Recurrence::parse(&value))
                    .unwrap_or_default(),
            })
        })
        .collect();

    let mut event_ids = IdAllocator::new("event");
    let events = items(object, "events")
        .filter_map(|item| {
            let title = text(item, "title")?;
            Some(ExtractedEvent {
                id: event_ids.claim(text(item, "id")),
                title,
                description: text(item, "description").unwrap_or_default(),
                date: text(item, "date").unwrap_or_default(),
                time: text(item, "time"),
                duration: text(item, "duration"),
                location: text(item, "location"),
                attendees: string_list(item, "attendees"),
            })
        })
        .collect();

    Ok(AnalysisResult {
        tasks,
        reminders,
        events,
        summary: text(object, "summary").unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
        confidence: normalize_confidence(object.get("confidence")),
    })
}

fn normalize_confidence(value: Option<&Value>) -> f64 {
    let raw = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(confidence) if confidence.is_finite() && confidence != 0.0 => {
            confidence.clamp(0.0, 1.0)
        }
        _ => DEFAULT_MODEL_CONFIDENCE,
    }
}

fn items<'a>(
    object: &'a Map<String, Value>,
    key: &str,
) -> impl Iterator<Item = &'a Map<String, Value>> {
    object
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

/// Reads a scalar field as trimmed text; `null`, `"null"` and blanks are `None`.
fn text(object: &Map<String, Value>, key: &str) -> Option<String> {
    let value = match object.get(key)? {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    if value.is_empty() || value.eq_ignore_ascii_case("null") {
        None
    } else {
        Some(value)
    }
}

fn string_list(object: &Map<String, Value>, key: &str) -> Vec<String> {
    object
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// Hands out ids unique within one category of one result.
struct IdAllocator {
    prefix: &'static str,
    next: usize,
    used: HashSet<String>,
}

impl IdAllocator {
    fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            next: 1,
            used: HashSet::new(),
        }
    }

    fn claim(&mut self, preferred: Option<String>) -> String {
        if let Some(id) = preferred {
            if self.used.insert(id.clone()) {
                return id;
            }
        }
        loop {
            let candidate = format!("{}_{}", self.prefix, self.next);
            self.next += 1;
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}
