//! In-memory domain store.
//!
//! # Responsibility
//! - Hold the task, reminder, event and note collections.
//! - Provide add/toggle/update/delete operations as pure snapshot transitions.
//!
//! # Invariants
//! - Identifiers are unique within each collection.
//! - Operations addressing an unknown id return an unchanged snapshot.
//! - Nothing is persisted; state lives as long as the owning `AppStore`.

pub mod app_store;
pub mod sample;
pub mod state;

pub use app_store::AppStore;
pub use state::AppState;
