//! Immutable store snapshot.
//!
//! Every mutation takes `&self` and returns the next snapshot, so a caller
//! holding an older snapshot never observes later writes.

use crate::model::event::{Event, NewEvent};
use crate::model::note::{NewNote, Note, NotePatch};
use crate::model::reminder::{NewReminder, Reminder};
use crate::model::task::{NewTask, Task};
use crate::model::{new_item_id, ItemId};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

/// One consistent view of all four collections, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppState {
    tasks: Vec<Task>,
    reminders: Vec<Reminder>,
    events: Vec<Event>,
    notes: Vec<Note>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn task(&self, id: ItemId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn note(&self, id: ItemId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Tasks not yet completed, in insertion order.
    pub fn open_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|task| !task.completed)
    }

    /// Events scheduled on `date`, in insertion order.
    pub fn events_on(&self, date: NaiveDate) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |event| event.date == date)
    }

    pub fn add_task(&self, task: NewTask) -> (Self, ItemId) {
        let id = new_item_id();
        let mut next = self.clone();
        next.tasks.push(task.into_task(id));
        (next, id)
    }

    /// Flips the completion flag of the matching task.
    pub fn toggle_task(&self, id: ItemId) -> Self {
        let mut next = self.clone();
        if let Some(task) = next.tasks.iter_mut().find(|task| task.id == id) {
            task.completed = !task.completed;
        }
        next
    }

    pub fn delete_task(&self, id: ItemId) -> Self {
        let mut next = self.clone();
        next.tasks.retain(|task| task.id != id);
        next
    }

    pub fn add_reminder(&self, reminder: NewReminder) -> (Self, ItemId) {
        let id = new_item_id();
        let mut next = self.clone();
        next.reminders.push(reminder.into_reminder(id));
        (next, id)
    }

    pub fn delete_reminder(&self, id: ItemId) -> Self {
        let mut next = self.clone();
        next.reminders.retain(|reminder| reminder.id != id);
        next
    }

    pub fn add_event(&self, event: NewEvent) -> (Self, ItemId) {
        let id = new_item_id();
        let mut next = self.clone();
        next.events.push(event.into_event(id));
        (next, id)
    }

    pub fn delete_event(&self, id: ItemId) -> Self {
        let mut next = self.clone();
        next.events.retain(|event| event.id != id);
        next
    }

    /// Appends a note stamped with `now` as both creation and update time.
    pub fn add_note(&self, note: NewNote, now: DateTime<Utc>) -> (Self, ItemId) {
        let id = new_item_id();
        let mut next = self.clone();
        next.notes.push(note.into_note(id, now));
        (next, id)
    }

    /// Merges `patch` into the matching note and refreshes `updated_at`.
    ///
    /// # Invariants
    /// - The new `updated_at` is strictly greater than the previous one, even
    ///   when `now` is equal to or earlier than it.
    pub fn update_note(&self, id: ItemId, patch: NotePatch, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        if let Some(note) = next.notes.iter_mut().find(|note| note.id == id) {
            patch.apply_to(note);
            note.updated_at = advance_timestamp(note.updated_at, now);
        }
        next
    }

    pub fn delete_note(&self, id: ItemId) -> Self {
        let mut next = self.clone();
        next.notes.retain(|note| note.id != id);
        next
    }
}

fn advance_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}
