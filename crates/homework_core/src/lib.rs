//! Core domain logic for the homework tracker.
//! This crate is the single source of truth for tracker state and invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod snapshot;
pub mod store;
pub mod view;

pub use config::TrackerConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::book::{Book, BookId, Progress, ValidationError, MAX_TOTAL_PAGES};
pub use model::page::{Page, PageStatus};
pub use service::{
    parse_total_pages, AlwaysConfirm, Confirm, Intent, Modal, TrackerService, UiUpdate,
};
pub use snapshot::ImportError;
pub use store::{Screen, TrackerStore, ViewState};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
