//! Owning store handle passed explicitly to the presentation layer.
//!
//! # Responsibility
//! - Hold the current `AppState` and swap it on every mutation.
//! - Stamp note timestamps from the injected `Clock`.
//!
//! # Invariants
//! - Single writer: mutations take `&mut self`; callers that share the store
//!   across threads wrap it in their own lock.
//! - Snapshots handed out by `snapshot()` are never mutated afterwards.

use super::state::AppState;
use crate::clock::Clock;
use crate::model::event::NewEvent;
use crate::model::note::{NewNote, NotePatch};
use crate::model::reminder::NewReminder;
use crate::model::task::NewTask;
use crate::model::ItemId;
use log::debug;
use std::sync::Arc;

/// Mutable owner of the current domain snapshot.
pub struct AppStore {
    state: AppState,
    clock: Arc<dyn Clock>,
}

impl AppStore {
    /// Creates an empty store.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_state(AppState::new(), clock)
    }

    /// Creates a store seeded with an existing snapshot.
    pub fn with_state(state: AppState, clock: Arc<dyn Clock>) -> Self {
        Self { state, clock }
    }

    /// Current snapshot by reference.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Detached copy of the current snapshot.
    pub fn snapshot(&self) -> AppState {
        self.state.clone()
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn add_task(&mut self, task: NewTask) -> ItemId {
        let (next, id) = self.state.add_task(task);
        self.state = next;
        debug!("event=task_add module=store status=ok id={id}");
        id
    }

    /// Flips completion; unknown ids are ignored.
    pub fn toggle_task(&mut self, id: ItemId) {
        self.state = self.state.toggle_task(id);
        debug!("event=task_toggle module=store status=ok id={id}");
    }

    pub fn delete_task(&mut self, id: ItemId) {
        self.state = self.state.delete_task(id);
        debug!("event=task_delete module=store status=ok id={id}");
    }

    pub fn add_reminder(&mut self, reminder: NewReminder) -> ItemId {
        let (next, id) = self.state.add_reminder(reminder);
        self.state = next;
        debug!("event=reminder_add module=store status=ok id={id}");
        id
    }

    pub fn delete_reminder(&mut self, id: ItemId) {
        self.state = self.state.delete_reminder(id);
        debug!("event=reminder_delete module=store status=ok id={id}");
    }

    pub fn add_event(&mut self, event: NewEvent) -> ItemId {
        let (next, id) = self.state.add_event(event);
        self.state = next;
        debug!("event=event_add module=store status=ok id={id}");
        id
    }

    pub fn delete_event(&mut self, id: ItemId) {
        self.state = self.state.delete_event(id);
        debug!("event=event_delete module=store status=ok id={id}");
    }

    pub fn add_note(&mut self, note: NewNote) -> ItemId {
        let (next, id) = self.state.add_note(note, self.clock.now());
        self.state = next;
        debug!("event=note_add module=store status=ok id={id}");
        id
    }

    /// Merges `patch` into the note and refreshes its update timestamp.
    pub fn update_note(&mut self, id: ItemId, patch: NotePatch) {
        self.state = self.state.update_note(id, patch, self.clock.now());
        debug!("event=note_update module=store status=ok id={id}");
    }

    pub fn delete_note(&mut self, id: ItemId) {
        self.state = self.state.delete_note(id);
        debug!("event=note_delete module=store status=ok id={id}");
    }
}
