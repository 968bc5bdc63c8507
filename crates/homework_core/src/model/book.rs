//! Book domain model.
//!
//! # Responsibility
//! - Define the homework book record and its snapshot wire shape.
//! - Validate creation input and derive progress summaries.
//!
//! # Invariants
//! - `Book::create` rejects blank names and page counts outside
//!   `1..=MAX_TOTAL_PAGES`.
//! - Pages of a created book are numbered `1..=total_pages` with no gaps.
//! - `Progress::percentage` is `0.0` for a book without pages instead of NaN.

use crate::model::page::{Page, PageStatus};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Largest page count accepted when creating a book.
pub const MAX_TOTAL_PAGES: u32 = 10_000;

/// Stable identifier of a book.
///
/// Generated ids are UUIDv7 strings, so they are timestamp-derived and
/// monotonic within one process. Imported snapshots may carry any non-empty
/// token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    /// Generates a fresh id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for BookId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BookId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for BookId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Input errors raised by book creation and page status edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Book name is empty after trimming.
    EmptyName,
    /// Page count is below 1 or above `MAX_TOTAL_PAGES`.
    InvalidPageCount(i64),
    /// Page count text has no leading integer.
    UnparseablePageCount(String),
    /// A status save was requested without choosing a status.
    MissingStatus,
}

impl ValidationError {
    /// Message shown to the user when this error aborts an operation.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::InvalidPageCount(_) | Self::UnparseablePageCount(_) => {
                "Please enter a valid book name and page count."
            }
            Self::MissingStatus => "Please choose a page status.",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "book name cannot be empty"),
            Self::InvalidPageCount(value) => {
                write!(f, "total pages must be between 1 and {MAX_TOTAL_PAGES}, got {value}")
            }
            Self::UnparseablePageCount(raw) => {
                write!(f, "total pages is not a number: `{raw}`")
            }
            Self::MissingStatus => write!(f, "no page status chosen"),
        }
    }
}

impl Error for ValidationError {}

/// A tracked homework unit with a fixed page count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub name: String,
    /// Imported counts are read leniently, see `lenient_page_count`.
    #[serde(deserialize_with = "lenient_page_count")]
    pub total_pages: u32,
    pub pages: Vec<Page>,
    /// RFC 3339 creation timestamp. Kept as text so imports round-trip verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Book {
    /// Creates a book with a generated id and all pages `not-started`.
    ///
    /// # Errors
    /// - `EmptyName` when `name` is blank after trimming.
    /// - `InvalidPageCount` when `total_pages` is outside `1..=MAX_TOTAL_PAGES`.
    pub fn create(
        name: &str,
        total_pages: i64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let total = u32::try_from(total_pages)
            .ok()
            .filter(|value| (1..=MAX_TOTAL_PAGES).contains(value))
            .ok_or(ValidationError::InvalidPageCount(total_pages))?;

        Ok(Self::with_id(BookId::generate(), name, total, created_at))
    }

    /// Creates a book with a caller-provided id and all pages `not-started`.
    ///
    /// Does not validate `name` or `total_pages`.
    pub fn with_id(
        id: BookId,
        name: impl Into<String>,
        total_pages: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            total_pages,
            pages: (1..=total_pages).map(Page::new).collect(),
            created_at: Some(created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    /// Looks up a page by its number.
    pub fn page(&self, number: u32) -> Option<&Page> {
        self.pages.iter().find(|page| page.number == Some(number))
    }

    /// Overwrites the status of one page.
    ///
    /// Returns `false` when no page carries `number`.
    pub fn set_page_status(&mut self, number: u32, status: PageStatus) -> bool {
        match self.pages.iter_mut().find(|page| page.number == Some(number)) {
            Some(page) => {
                page.set_status(status);
                true
            }
            None => false,
        }
    }

    pub fn completed_pages(&self) -> u32 {
        let count = self
            .pages
            .iter()
            .filter(|page| page.status.is_completed())
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.completed_pages(), self.total_pages)
    }
}

/// Reads a snapshot `totalPages` the way a loose numeric coercion would.
///
/// Numbers and numeric strings round up to a whole count, `true` counts as 1.
/// Anything else, including non-positive values, becomes 0.
fn lenient_page_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        _ => None,
    };
    Ok(match number {
        Some(count) if count.is_finite() && count > 0.0 => {
            count.ceil().min(f64::from(u32::MAX)) as u32
        }
        _ => 0,
    })
}

/// Progress summary of one book.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub completed: u32,
    /// `total - completed`, floored at zero for inconsistent imports.
    pub remaining: u32,
    pub total: u32,
    /// `completed / total * 100`.
    pub percentage: f64,
}

impl Progress {
    pub fn new(completed: u32, total: u32) -> Self {
        let percentage = if total == 0 {
            0.0
        } else {
            f64::from(completed) / f64::from(total) * 100.0
        };
        Self {
            completed,
            remaining: total.saturating_sub(completed),
            total,
            percentage,
        }
    }
}
