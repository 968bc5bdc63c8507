//! Domain model for homework books and their pages.
//!
//! # Responsibility
//! - Define canonical data structures used by the tracker store.
//! - Own the snapshot wire shape through serde attributes.
//!
//! # Invariants
//! - A freshly created book has exactly `total_pages` pages numbered
//!   `1..=total_pages`.
//! - `total_pages` never changes after creation.

pub mod book;
pub mod page;
