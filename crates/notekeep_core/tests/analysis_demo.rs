use chrono::{Duration, TimeZone, Utc};
use notekeep_core::analysis::demo::DEMO_CONFIDENCE;
use notekeep_core::analysis::demo_analysis;
use notekeep_core::model::task::Priority;

#[test]
fn dutch_meeting_note_yields_one_event_tomorrow() {
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 16, 45, 0).unwrap();
    let result = demo_analysis("Werk", "Ik heb een vergadering morgen", now);

    assert_eq!(result.events.len(), 1);
    assert!(result.tasks.is_empty());
    assert!(result.reminders.is_empty());
    assert_eq!(result.confidence, DEMO_CONFIDENCE);

    let event = &result.events[0];
    let tomorrow = (now + Duration::days(1)).date_naive();
    assert_eq!(event.date, tomorrow.format("%Y-%m-%d").to_string());
    assert_eq!(event.time.as_deref(), Some("14:00"));
    assert!(event.to_new_event().is_some());
}

#[test]
fn meeting_and_task_keywords_give_exactly_one_of_each() {
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
    let body = "Vergadering met het team, daarna moet ik de presentatie maken en de taak doen";
    let result = demo_analysis("Planning", body, now);

    assert_eq!(result.events.len(), 1);
    assert_eq!(result.tasks.len(), 1);
    assert!(result.reminders.is_empty());

    let task = &result.tasks[0];
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.due_date.as_deref(), Some("2026-10-21"));
}

#[test]
fn keyword_matching_ignores_case() {
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let result = demo_analysis("x", "DEADLINE vrijdag, BELANGRIJK", now);
    assert_eq!(result.reminders.len(), 1);
    assert_eq!(result.reminders[0].reminder_date, "2026-01-02");
    assert_eq!(result.reminders[0].reminder_time.as_deref(), Some("09:00"));
}

#[test]
fn text_without_keywords_yields_empty_arrays() {
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let result = demo_analysis("Recept", "Bloem, suiker en boter", now);
    assert!(result.is_empty());
    assert_eq!(result.confidence, DEMO_CONFIDENCE);
}

#[test]
fn repeated_calls_are_deterministic_for_a_fixed_clock() {
    let now = Utc.with_ymd_and_hms(2026, 6, 30, 23, 59, 0).unwrap();
    let body = "afspraak bij de dokter, niet vergeten: onthouden";
    let first = demo_analysis("Gezondheid", body, now);
    let second = demo_analysis("Gezondheid", body, now);
    assert_eq!(first, second);
    assert_eq!(first.events[0].date, "2026-07-01");
}
