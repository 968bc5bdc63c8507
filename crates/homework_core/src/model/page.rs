//! Page domain model.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt::{Display, Formatter};

const STATUS_NOT_STARTED: &str = "not-started";
const STATUS_COMPLETED: &str = "completed";

/// Completion state of one page.
///
/// Serialized as the kebab-case wire strings `not-started` / `completed`.
/// Imported snapshots may carry values outside that set; those are kept
/// verbatim in `Other` and treated as not completed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PageStatus {
    /// Page has not been worked on yet.
    NotStarted,
    /// Page is done.
    Completed,
    /// Unrecognized status string preserved from an import.
    Other(String),
}

impl PageStatus {
    /// Returns the wire string for this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::NotStarted => STATUS_NOT_STARTED,
            Self::Completed => STATUS_COMPLETED,
            Self::Other(value) => value.as_str(),
        }
    }

    /// Parses a wire string, returning `None` for values outside the known set.
    pub fn parse_known(value: &str) -> Option<Self> {
        match value {
            STATUS_NOT_STARTED => Some(Self::NotStarted),
            STATUS_COMPLETED => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Human-readable label used in page tooltips.
    pub fn label(&self) -> &'static str {
        if self.is_completed() {
            "Completed"
        } else {
            "Not started"
        }
    }
}

impl From<String> for PageStatus {
    fn from(value: String) -> Self {
        Self::parse_known(value.as_str()).unwrap_or(Self::Other(value))
    }
}

impl From<PageStatus> for String {
    fn from(value: PageStatus) -> Self {
        match value {
            PageStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for PageStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One numbered page of a book.
///
/// Imported entries are not re-validated. An entry that does not have the
/// exact `{number, status}` shape is kept as its original JSON value and
/// exported unchanged, while `number` and `status` expose whatever could be
/// read from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct Page {
    /// 1-based page number; `None` when an imported entry has no integer number.
    pub number: Option<u32>,
    pub status: PageStatus,
    source: Option<Value>,
}

impl Page {
    /// Creates a page in the `not-started` state.
    pub fn new(number: u32) -> Self {
        Self::with_status(number, PageStatus::NotStarted)
    }

    pub fn with_status(number: u32, status: PageStatus) -> Self {
        Self {
            number: Some(number),
            status,
            source: None,
        }
    }

    /// Overwrites the status, keeping any other fields of an imported entry.
    pub fn set_status(&mut self, status: PageStatus) {
        if let Some(Value::Object(fields)) = self.source.as_mut() {
            fields.insert("status".to_string(), Value::String(status.as_str().to_string()));
        }
        self.status = status;
    }
}

impl From<Value> for Page {
    fn from(value: Value) -> Self {
        let number = value.get("number").and_then(whole_page_number);
        let status = value
            .get("status")
            .and_then(Value::as_str)
            .map(|raw| PageStatus::from(raw.to_string()));
        let exact_shape = matches!(&value, Value::Object(fields) if fields.len() == 2)
            && number.is_some()
            && status.is_some();

        Self {
            number,
            status: status.unwrap_or_else(|| PageStatus::Other(String::new())),
            source: (!exact_shape).then_some(value),
        }
    }
}

impl From<Page> for Value {
    fn from(page: Page) -> Self {
        match page.source {
            Some(source) => source,
            None => json!({
                "number": page.number,
                "status": String::from(page.status),
            }),
        }
    }
}

fn whole_page_number(value: &Value) -> Option<u32> {
    if let Some(number) = value.as_u64() {
        return u32::try_from(number).ok();
    }
    let number = value.as_f64()?;
    if number.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&number) {
        Some(number as u32)
    } else {
        None
    }
}
