//! Domain records for the task, reminder, calendar and note screens.
//!
//! # Responsibility
//! - Define the canonical record shapes held by the in-memory store.
//! - Define the creation inputs (`New*`) and partial-update shapes.
//!
//! # Invariants
//! - Every stored record is identified by a stable `ItemId`.
//! - Records carry no cross-references; an event created from a note
//!   analysis is not linked back to its note.

pub mod event;
pub mod note;
pub mod reminder;
pub mod task;

use uuid::Uuid;

/// Stable identifier for every stored record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ItemId = Uuid;

/// Generates a fresh identifier that is never reused.
pub(crate) fn new_item_id() -> ItemId {
    Uuid::new_v4()
}
