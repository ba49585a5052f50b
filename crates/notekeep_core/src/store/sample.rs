//! First-launch starter content.

use super::state::AppState;
use crate::model::event::NewEvent;
use crate::model::note::NewNote;
use crate::model::reminder::NewReminder;
use crate::model::task::{NewTask, Priority};
use chrono::{DateTime, Duration, Utc};

impl AppState {
    /// Snapshot pre-filled with the demo content shown on first launch.
    ///
    /// Events are placed on today's and tomorrow's date relative to `now`.
    pub fn with_sample_data(now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let tomorrow = (now + Duration::days(1)).date_naive();

        let tasks = [
            ("Finish project presentation", Priority::High, false),
            ("Prepare team meeting", Priority::Medium, false),
            ("Answer email", Priority::Low, true),
            ("Review design mockups", Priority::Medium, false),
        ];
        let reminders = [
            ("Doctor's appointment", "Tomorrow 14:00"),
            ("Maria's birthday", "Friday"),
            ("Car inspection", "Next week"),
        ];
        let events = [
            ("Team Meeting", "09:00", today, "#f97316"),
            ("Project Review", "14:30", today, "#10b981"),
            ("Client Call", "16:00", tomorrow, "#8b5cf6"),
        ];
        let notes = [
            ("Project Ideas", "New mobile app concept..."),
            ("Meeting Notes", "Discussed quarterly goals..."),
        ];

        let mut state = AppState::new();
        for (title, priority, completed) in tasks {
            let mut task = NewTask::new(title, priority);
            task.completed = completed;
            state = state.add_task(task).0;
        }
        for (title, time) in reminders {
            state = state.add_reminder(NewReminder::new(title, time)).0;
        }
        for (title, time, date, color) in events {
            let mut event = NewEvent::new(title, time, date);
            event.color = color.to_string();
            state = state.add_event(event).0;
        }
        for (title, content) in notes {
            state = state.add_note(NewNote::new(title, content), now).0;
        }
        state
    }
}
