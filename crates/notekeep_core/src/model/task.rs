//! Task records.

use super::ItemId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task urgency shown as a colored badge in the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Stable lowercase label used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses a label case-insensitively, ignoring surrounding whitespace.
    ///
    /// Returns `None` for anything other than `low|medium|high`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Actionable to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: ItemId,
    pub title: String,
    pub completed: bool,
    pub priority: Priority,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub category: Option<String>,
}

/// Creation input for a task; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewTask {
    pub title: String,
    pub completed: bool,
    pub priority: Priority,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub category: Option<String>,
}

impl NewTask {
    /// Open task with the given title and priority and no optional fields.
    pub fn new(title: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            priority,
            ..Self::default()
        }
    }

    pub(crate) fn into_task(self, id: ItemId) -> Task {
        Task {
            id,
            title: self.title,
            completed: self.completed,
            priority: self.priority,
            description: self.description,
            due_date: self.due_date,
            category: self.category,
        }
    }
}
