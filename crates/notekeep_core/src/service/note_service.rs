//! Note editing flows.
//!
//! # Responsibility
//! - Create notes from the new-note dialog, rename them and save rich
//!   editor output.
//! - Report validation failures and saves through the toast relay.
//!
//! # Invariants
//! - Notes are never created with a blank title.
//! - Saving rich content always refreshes the plain-text projection.

use crate::model::note::{NewNote, NotePatch};
use crate::model::ItemId;
use crate::notify::{ToastKind, ToastRelay};
use crate::store::AppStore;
use log::info;
use thiserror::Error;

pub const MSG_EMPTY_TITLE: &str = "Enter a title for your note";
pub const MSG_NOTE_SAVED: &str = "Your note has been saved!";

/// Note flow errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteServiceError {
    /// Title input is empty or whitespace-only.
    #[error("note title is empty")]
    EmptyTitle,
    /// Target note does not exist.
    #[error("note not found: {0}")]
    NoteNotFound(ItemId),
}

/// Creates an empty note titled `title`.
///
/// # Errors
/// Returns `EmptyTitle` (and shows an error toast) for a blank title.
pub fn create_note(
    store: &mut AppStore,
    relay: &mut ToastRelay,
    title: &str,
) -> Result<ItemId, NoteServiceError> {
    let title = title.trim();
    if title.is_empty() {
        relay.show(MSG_EMPTY_TITLE, ToastKind::Error, store.clock().now());
        return Err(NoteServiceError::EmptyTitle);
    }

    let id = store.add_note(NewNote::new(title, ""));
    info!("event=note_create module=service status=ok id={id}");
    Ok(id)
}

/// Saves rich editor HTML into an existing note.
///
/// # Errors
/// Returns `NoteNotFound` when the note was deleted meanwhile.
pub fn save_rich_note(
    store: &mut AppStore,
    relay: &mut ToastRelay,
    id: ItemId,
    html: &str,
) -> Result<(), NoteServiceError> {
    update_note(store, relay, id, NotePatch::from_rich_content(html))
}

/// Merges `patch` into an existing note and confirms with a toast.
///
/// # Errors
/// - `EmptyTitle` when the patch renames the note to a blank title.
/// - `NoteNotFound` when the note does not exist.
pub fn update_note(
    store: &mut AppStore,
    relay: &mut ToastRelay,
    id: ItemId,
    mut patch: NotePatch,
) -> Result<(), NoteServiceError> {
    if let Some(title) = patch.title.take() {
        let title = title.trim();
        if title.is_empty() {
            relay.show(MSG_EMPTY_TITLE, ToastKind::Error, store.clock().now());
            return Err(NoteServiceError::EmptyTitle);
        }
        patch.title = Some(title.to_string());
    }
    if store.state().note(id).is_none() {
        return Err(NoteServiceError::NoteNotFound(id));
    }

    let content_chars = patch
        .rich_content
        .as_deref()
        .map_or(0, |html| html.chars().count());
    store.update_note(id, patch);
    relay.show(MSG_NOTE_SAVED, ToastKind::Success, store.clock().now());
    info!("event=note_save module=service status=ok id={id} html_chars={content_chars}");
    Ok(())
}
