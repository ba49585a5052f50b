//! Reminder records.

use super::ItemId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Something to remember, shown with a free-form time label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: ItemId,
    pub title: String,
    /// Display label such as `Tomorrow 14:00` or `Friday`; not parsed.
    pub time: String,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Creation input for a reminder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewReminder {
    pub title: String,
    pub time: String,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

impl NewReminder {
    pub fn new(title: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            time: time.into(),
            ..Self::default()
        }
    }

    pub(crate) fn into_reminder(self, id: ItemId) -> Reminder {
        Reminder {
            id,
            title: self.title,
            time: self.time,
            description: self.description,
            date: self.date,
        }
    }
}
