//! Flutter-facing bindings for the homework tracker core.

pub mod api;
