//! Flutter-facing bindings for `notekeep_core`.

pub mod api;
