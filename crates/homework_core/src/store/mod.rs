//! In-memory tracker state.
//!
//! # Responsibility
//! - Own the book collection and the transient view state.
//! - Expose the mutation operations user intents map onto.
//!
//! # Invariants
//! - Collection order is insertion order and doubles as display order.
//! - `current_book_id` never points at a deleted book.
//! - Failed validation or import leaves every field untouched.

pub mod tracker_store;

pub use tracker_store::{Screen, TrackerStore, ViewState};
