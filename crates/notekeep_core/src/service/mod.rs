//! Use-case services composed by the presentation layer.
//!
//! # Responsibility
//! - Combine store, analysis and notification relay into screen-level flows.
//! - Surface user input errors as transient notifications.
//!
//! # Invariants
//! - Services never hold a relay lock across an await point.

pub mod analysis_flow;
pub mod note_service;
