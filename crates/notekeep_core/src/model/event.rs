//! Calendar event records.

use super::ItemId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Color tag applied when the caller does not pick one.
pub const DEFAULT_EVENT_COLOR: &str = "#10b981";

/// Calendar entry placed on a specific day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: ItemId,
    pub title: String,
    /// Start time label, usually `HH:MM`.
    pub time: String,
    pub date: NaiveDate,
    /// Hex color tag used by the calendar views.
    pub color: String,
    pub description: Option<String>,
}

/// Creation input for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub time: String,
    pub date: NaiveDate,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewEvent {
    /// Event with the default color and no description.
    pub fn new(title: impl Into<String>, time: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            time: time.into(),
            date,
            color: default_color(),
            description: None,
        }
    }

    pub(crate) fn into_event(self, id: ItemId) -> Event {
        Event {
            id,
            title: self.title,
            time: self.time,
            date: self.date,
            color: self.color,
            description: self.description,
        }
    }
}

fn default_color() -> String {
    DEFAULT_EVENT_COLOR.to_string()
}
