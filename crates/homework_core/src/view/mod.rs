//! Pure projections from tracker state to a UI description.
//!
//! # Responsibility
//! - Describe the book list and detail screens as plain data.
//! - Render those descriptions into HTML fragments for document adapters.
//!
//! # Invariants
//! - Projections never mutate state; every render is a full rebuild.
//! - Page cells are interactive only while edit mode is on.
//! - All user-supplied text is escaped in HTML output.

pub mod html;
pub mod projection;

pub use projection::{
    book_detail, book_list, BookCard, BookDetailView, BookListView, PageCell, PageGridView,
    ProgressView,
};
