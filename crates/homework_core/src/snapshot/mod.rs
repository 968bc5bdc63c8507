//! Snapshot export/import.
//!
//! # Responsibility
//! - Encode the full book collection as pretty-printed JSON.
//! - Shape-check and decode imported snapshots.
//! - Move snapshot text across the file boundary for adapters.
//!
//! # Invariants
//! - Decoding never partially succeeds: either every book is accepted or an
//!   `ImportError` is returned.
//! - Page entries are not re-validated beyond their typed shape.

pub mod codec;
pub mod file;

pub use codec::{decode_books, encode_books, ImportError};
pub use file::{read_snapshot_file, snapshot_file_name, write_snapshot_file};
