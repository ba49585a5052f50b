//! Local keyword analysis used in demo mode and as the service fallback.
//!
//! # Invariants
//! - At most one item per category, however many keywords match.
//! - Confidence is the fixed `DEMO_CONFIDENCE`.
//! - Dates are UTC calendar days relative to the supplied `now`.

use super::types::{AnalysisResult, ExtractedEvent, ExtractedReminder, ExtractedTask, Recurrence};
use crate::model::task::Priority;
use chrono::{DateTime, Duration, Utc};

pub const DEMO_CONFIDENCE: f64 = 0.8;

/// Terms that suggest an appointment or meeting.
pub const EVENT_KEYWORDS: &[&str] = &["vergadering", "meeting", "afspraak", "dokter"];
/// Terms that suggest something to do.
pub const TASK_KEYWORDS: &[&str] = &["taak", "doen", "maken", "moet", "presentatie"];
/// Terms that suggest something to remember.
pub const REMINDER_KEYWORDS: &[&str] = &["onthouden", "deadline", "belangrijk", "herinnering"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Scans the lowercased body for fixed keyword sets.
pub fn demo_analysis(title: &str, body: &str, now: DateTime<Utc>) -> AnalysisResult {
    let words = body.to_lowercase();
    let tomorrow = (now + Duration::days(1)).format(DATE_FORMAT).to_string();
    let in_three_days = (now + Duration::days(3)).format(DATE_FORMAT).to_string();

    let mut tasks = Vec::new();
    let mut reminders = Vec::new();
    let mut events = Vec::new();

    if contains_any(&words, EVENT_KEYWORDS) {
        events.push(ExtractedEvent {
            id: "demo_event_1".to_string(),
            title: "Appointment scheduled".to_string(),
            description: format!("Appointment found in: {title}"),
            date: tomorrow.clone(),
            time: Some("14:00".to_string()),
            duration: Some("1 hour".to_string()),
            location: None,
            attendees: Vec::new(),
        });
    }

    if contains_any(&words, TASK_KEYWORDS) {
        tasks.push(ExtractedTask {
            id: "demo_task_1".to_string(),
            title: "Detected task".to_string(),
            description: format!("Task extracted from: {title}"),
            priority: Priority::High,
            due_date: Some(in_three_days),
            category: "work".to_string(),
        });
    }

    if contains_any(&words, REMINDER_KEYWORDS) {
        reminders.push(ExtractedReminder {
            id: "demo_reminder_1".to_string(),
            title: "Important reminder".to_string(),
            description: format!("Reminder from: {title}"),
            reminder_date: tomorrow,
            reminder_time: Some("09:00".to_string()),
            recurrence: Recurrence::Once,
        });
    }

    let summary = format!(
        "Demo analysis of \"{title}\" - {} tasks, {} reminders, {} events found",
        tasks.len(),
        reminders.len(),
        events.len()
    );

    AnalysisResult {
        tasks,
        reminders,
        events,
        summary,
        confidence: DEMO_CONFIDENCE,
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::{demo_analysis, DEMO_CONFIDENCE};
    use chrono::{TimeZone, Utc};

    #[test]
    fn many_hits_still_yield_one_item_per_category() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 23, 30, 0).unwrap();
        let body = "Meeting met dokter, daarna vergadering. Afspraak!";

        let result = demo_analysis("Dag", body, now);
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].date, "2026-10-19");
        assert!(result.tasks.is_empty());
        assert!(result.reminders.is_empty());
        assert_eq!(result.confidence, DEMO_CONFIDENCE);
    }

    #[test]
    fn task_is_due_in_three_days_with_high_priority() {
        let now = Utc.with_ymd_and_hms(2026, 12, 30, 10, 0, 0).unwrap();
        let result = demo_analysis("Werk", "Ik moet de PRESENTATIE afmaken", now);

        assert_eq!(result.tasks.len(), 1);
        assert_eq!(result.tasks[0].due_date.as_deref(), Some("2027-01-02"));
        assert_eq!(result.tasks[0].priority, crate::model::task::Priority::High);
        assert!(result.summary.contains("1 tasks, 0 reminders, 0 events"));
    }

    #[test]
    fn keywords_in_title_only_do_not_match() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let result = demo_analysis("Meeting deadline", "boodschappen: melk, brood", now);
        assert!(result.is_empty());
        assert_eq!(result.confidence, DEMO_CONFIDENCE);
    }
}
