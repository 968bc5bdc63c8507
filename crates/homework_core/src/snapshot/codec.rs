//! JSON codec for the book collection.

use crate::model::book::Book;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors raised while importing a snapshot.
#[derive(Debug)]
pub enum ImportError {
    /// The snapshot file could not be read.
    Read(String),
    /// The text is not valid JSON.
    Parse(serde_json::Error),
    /// The top-level JSON value is not an array.
    NotAnArray,
    /// A book entry lacks a required field or has a falsy value for it.
    MissingField { index: usize, field: &'static str },
    /// A book entry passed the shape check but cannot be represented.
    InvalidBook {
        index: usize,
        source: serde_json::Error,
    },
}

impl ImportError {
    /// Message shown to the user when an import is rejected.
    pub fn user_message(&self) -> String {
        format!("Import failed: {self}")
    }
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(details) => write!(f, "could not read file: {details}"),
            Self::Parse(err) => write!(f, "invalid JSON: {err}"),
            Self::NotAnArray => write!(f, "invalid data format: expected a list of books"),
            Self::MissingField { index, field } => {
                write!(f, "invalid data format: book #{index} has no valid `{field}`")
            }
            Self::InvalidBook { index, source } => {
                write!(f, "invalid data format: book #{index}: {source}")
            }
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::InvalidBook { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Serializes books as a pretty-printed JSON array.
pub fn encode_books(books: &[Book]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(books)
}

/// Parses and shape-checks snapshot text.
///
/// Every element must carry a non-empty string `id`, a non-empty string
/// `name`, a truthy `totalPages` and an array `pages`. Page entries are taken
/// as they are; unknown statuses and loose shapes are kept for export.
pub fn decode_books(raw: &str) -> Result<Vec<Book>, ImportError> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Array(entries) = value else {
        return Err(ImportError::NotAnArray);
    };

    for (index, entry) in entries.iter().enumerate() {
        check_book_shape(index, entry)?;
    }

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value::<Book>(entry)
                .map_err(|source| ImportError::InvalidBook { index, source })
        })
        .collect()
}

fn check_book_shape(index: usize, entry: &Value) -> Result<(), ImportError> {
    let missing = |field| ImportError::MissingField { index, field };

    if !is_non_empty_string(entry.get("id")) {
        return Err(missing("id"));
    }
    if !is_non_empty_string(entry.get("name")) {
        return Err(missing("name"));
    }
    if !entry.get("totalPages").is_some_and(is_truthy) {
        return Err(missing("totalPages"));
    }
    if !entry.get("pages").is_some_and(Value::is_array) {
        return Err(missing("pages"));
    }
    Ok(())
}

fn is_non_empty_string(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(text)) if !text.is_empty())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
