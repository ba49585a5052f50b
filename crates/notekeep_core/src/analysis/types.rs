//! Analysis result records and their conversion into store inputs.

use crate::model::event::NewEvent;
use crate::model::reminder::NewReminder;
use crate::model::task::{NewTask, Priority};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How often an extracted reminder repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    Once,
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Once => "once",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "once" => Some(Self::Once),
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

/// Task candidate found in a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedTask {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// `YYYY-MM-DD` as reported by the model; not validated.
    pub due_date: Option<String>,
    pub category: String,
}

/// Reminder candidate found in a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedReminder {
    pub id: String,
    pub title: String,
    pub description: String,
    pub reminder_date: String,
    pub reminder_time: Option<String>,
    #[serde(rename = "type")]
    pub recurrence: Recurrence,
}

/// Calendar event candidate found in a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: Option<String>,
    pub duration: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub attendees: Vec<String>,
}

/// Structured extraction for one note. Ephemeral; never stored as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub tasks: Vec<ExtractedTask>,
    pub reminders: Vec<ExtractedReminder>,
    pub events: Vec<ExtractedEvent>,
    pub summary: String,
    /// Self-reported extraction quality within `[0, 1]`.
    pub confidence: f64,
}

impl AnalysisResult {
    /// Total number of extracted items across all categories.
    pub fn item_count(&self) -> usize {
        self.tasks.len() + self.reminders.len() + self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

impl ExtractedTask {
    /// Store input for this candidate. Unparseable due dates are dropped.
    pub fn to_new_task(&self) -> NewTask {
        NewTask {
            title: self.title.clone(),
            completed: false,
            priority: self.priority,
            description: non_empty(&self.description),
            due_date: self.due_date.as_deref().and_then(parse_day),
            category: non_empty(&self.category),
        }
    }
}

impl ExtractedReminder {
    /// Store input for this candidate.
    ///
    /// The display label is the reminder time when given, else the date.
    pub fn to_new_reminder(&self) -> NewReminder {
        let time = self
            .reminder_time
            .as_deref()
            .and_then(non_empty)
            .unwrap_or_else(|| self.reminder_date.trim().to_string());
        NewReminder {
            title: self.title.clone(),
            time,
            description: non_empty(&self.description),
            date: parse_day(&self.reminder_date),
        }
    }
}

impl ExtractedEvent {
    /// Store input for this candidate, or `None` when the date is unusable.
    pub fn to_new_event(&self) -> Option<NewEvent> {
        let date = parse_day(&self.date)?;
        let time = self
            .time
            .as_deref()
            .and_then(non_empty)
            .unwrap_or_else(|| "00:00".to_string());
        let mut event = NewEvent::new(self.title.clone(), time, date);
        event.description = non_empty(&self.description);
        Some(event)
    }
}

pub(crate) fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
