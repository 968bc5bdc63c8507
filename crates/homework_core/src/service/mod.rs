//! Intent dispatch between a UI adapter and the tracker store.
//!
//! # Responsibility
//! - Map user intents onto store mutations.
//! - Return the UI updates an adapter must apply after each intent.
//! - Obtain interactive confirmation through the `Confirm` seam.
//!
//! # Invariants
//! - The store is never touched before a destructive intent is confirmed.
//! - Every state change is followed by a full re-render of the active view.

pub mod tracker_service;

pub use tracker_service::{
    parse_total_pages, AlwaysConfirm, Confirm, Intent, Modal, TrackerService, UiUpdate,
};
