//! Tracker use-case service.

use crate::config::TrackerConfig;
use crate::model::book::ValidationError;
use crate::model::page::PageStatus;
use crate::snapshot::{snapshot_file_name, ImportError};
use crate::store::{Screen, TrackerStore};
use crate::view::projection::{book_detail, book_list, edit_button_label, page_grid};
use crate::view::{BookDetailView, BookListView, PageGridView, ProgressView};
use chrono::{NaiveDate, Utc};
use log::{debug, error};

const DELETE_CONFIRM_MESSAGE: &str = "Delete this book?";
const IMPORT_SUCCESS_MESSAGE: &str = "Data imported successfully!";
const IMPORT_NO_FILE_MESSAGE: &str = "Please choose a file to import.";
const EXPORT_FAILED_MESSAGE: &str = "Export failed.";

/// Interactive yes/no confirmation supplied by the UI adapter.
pub trait Confirm {
    /// Returns `true` when the user accepts `message`.
    fn confirm(&mut self, message: &str) -> bool;
}

/// Confirmation that accepts everything. Used when the adapter has already
/// asked the user before dispatching.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}

/// Dialogs the adapter shows and hides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    CreateBook,
    EditPage,
    Import,
}

/// User actions delivered by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ShowCreateBook,
    CancelCreateBook,
    /// Create-book form submission; `total_pages` is the raw field text.
    CreateBook { name: String, total_pages: String },
    DeleteBook(String),
    SelectBook(String),
    ShowHome,
    ToggleEditMode,
    EditPage(u32),
    ChooseStatus(PageStatus),
    SavePageStatus,
    CancelPageEdit,
    /// Export stamped with the adapter's UTC date.
    Export { today: NaiveDate },
    ShowImport,
    CancelImport,
    /// Import confirmation; `None` when no file was picked.
    Import { raw: Option<String> },
    /// The adapter failed to read the picked file.
    ImportReadFailed(String),
}

/// Instructions for the adapter, applied in order.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    Screen(Screen),
    BookList(BookListView),
    BookDetail(BookDetailView),
    PageGrid(PageGridView),
    Progress(ProgressView),
    EditModeLabel(&'static str),
    Modal { modal: Modal, visible: bool },
    /// Status to highlight in the edit dialog for `page`.
    PreselectStatus {
        page: u32,
        status: Option<PageStatus>,
    },
    Alert(String),
    Download { file_name: String, contents: String },
}

/// Owns the tracker store and turns intents into UI updates.
pub struct TrackerService<C: Confirm> {
    store: TrackerStore,
    confirm: C,
    config: TrackerConfig,
}

impl<C: Confirm> TrackerService<C> {
    /// Creates a service, seeding demo books when the config asks for it.
    pub fn new(config: TrackerConfig, confirm: C) -> Self {
        Self::with_store(TrackerStore::new(), config, confirm)
    }

    /// Creates a service over an existing store.
    pub fn with_store(mut store: TrackerStore, config: TrackerConfig, confirm: C) -> Self {
        if config.seed_sample_data {
            store.seed_sample_data(Utc::now());
        }
        Self {
            store,
            confirm,
            config,
        }
    }

    pub fn store(&self) -> &TrackerStore {
        &self.store
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Gives the adapter access to its confirmation seam between intents.
    pub fn confirm_mut(&mut self) -> &mut C {
        &mut self.confirm
    }

    /// Updates that paint the startup screen.
    pub fn initial_render(&self) -> Vec<UiUpdate> {
        vec![
            UiUpdate::Screen(Screen::Home),
            UiUpdate::BookList(book_list(&self.store)),
        ]
    }

    /// Applies one intent and returns the resulting UI updates.
    pub fn dispatch(&mut self, intent: Intent) -> Vec<UiUpdate> {
        debug!("event=intent module=service name={}", intent_name(&intent));
        match intent {
            Intent::ShowCreateBook => vec![modal(Modal::CreateBook, true)],
            Intent::CancelCreateBook => vec![modal(Modal::CreateBook, false)],
            Intent::CreateBook { name, total_pages } => self.create_book(&name, &total_pages),
            Intent::DeleteBook(id) => self.delete_book(&id),
            Intent::SelectBook(id) => self.select_book(&id),
            Intent::ShowHome => {
                self.store.show_home();
                vec![
                    UiUpdate::Screen(Screen::Home),
                    UiUpdate::BookList(book_list(&self.store)),
                ]
            }
            Intent::ToggleEditMode => self.toggle_edit_mode(),
            Intent::EditPage(page) => self.edit_page(page),
            Intent::ChooseStatus(status) => {
                self.store.choose_status(status);
                Vec::new()
            }
            Intent::SavePageStatus => self.save_page_status(),
            Intent::CancelPageEdit => {
                self.store.cancel_page_edit();
                vec![modal(Modal::EditPage, false)]
            }
            Intent::Export { today } => self.export(today),
            Intent::ShowImport => vec![modal(Modal::Import, true)],
            Intent::CancelImport => vec![modal(Modal::Import, false)],
            Intent::Import { raw: None } => vec![UiUpdate::Alert(IMPORT_NO_FILE_MESSAGE.to_string())],
            Intent::Import { raw: Some(raw) } => self.import(&raw),
            Intent::ImportReadFailed(details) => {
                vec![UiUpdate::Alert(ImportError::Read(details).user_message())]
            }
        }
    }

    fn create_book(&mut self, name: &str, total_pages: &str) -> Vec<UiUpdate> {
        let created = parse_total_pages(total_pages)
            .and_then(|total| self.store.create_book(name, total));
        match created {
            Ok(_) => vec![
                modal(Modal::CreateBook, false),
                UiUpdate::BookList(book_list(&self.store)),
            ],
            Err(err) => vec![UiUpdate::Alert(err.user_message().to_string())],
        }
    }

    fn delete_book(&mut self, id: &str) -> Vec<UiUpdate> {
        if !self.confirm.confirm(DELETE_CONFIRM_MESSAGE) {
            debug!("event=book_delete module=service status=cancelled book_id={id}");
            return Vec::new();
        }
        self.store.delete_book(id);
        vec![UiUpdate::BookList(book_list(&self.store))]
    }

    fn select_book(&mut self, id: &str) -> Vec<UiUpdate> {
        if self.store.select_book(id).is_none() {
            return Vec::new();
        }
        match book_detail(&self.store) {
            Some(detail) => vec![
                UiUpdate::BookDetail(detail),
                UiUpdate::Screen(Screen::Detail),
            ],
            None => Vec::new(),
        }
    }

    fn toggle_edit_mode(&mut self) -> Vec<UiUpdate> {
        let edit_mode = self.store.toggle_edit_mode();
        let mut updates = vec![UiUpdate::EditModeLabel(edit_button_label(edit_mode))];
        if !edit_mode {
            updates.push(modal(Modal::EditPage, false));
        }
        if let Some(book) = self.store.current_book() {
            updates.push(UiUpdate::PageGrid(page_grid(book, edit_mode)));
        }
        updates
    }

    fn edit_page(&mut self, page: u32) -> Vec<UiUpdate> {
        let Some(current) = self.store.select_page_for_edit(page) else {
            return Vec::new();
        };
        debug!("event=page_edit_open module=service page={page} status={current}");
        vec![
            UiUpdate::PreselectStatus {
                page,
                status: self.store.view().chosen_status.clone(),
            },
            modal(Modal::EditPage, true),
        ]
    }

    fn save_page_status(&mut self) -> Vec<UiUpdate> {
        match self.store.save_chosen_status() {
            Ok(Some(progress)) => {
                let mut updates = vec![UiUpdate::Progress(progress.into())];
                if let Some(book) = self.store.current_book() {
                    updates.push(UiUpdate::PageGrid(page_grid(
                        book,
                        self.store.view().is_edit_mode,
                    )));
                }
                updates.push(modal(Modal::EditPage, false));
                updates
            }
            Ok(None) => Vec::new(),
            Err(err) => vec![UiUpdate::Alert(err.user_message().to_string())],
        }
    }

    fn export(&self, today: NaiveDate) -> Vec<UiUpdate> {
        match self.store.export_snapshot() {
            Ok(contents) => vec![UiUpdate::Download {
                file_name: snapshot_file_name(&self.config.export_basename, today),
                contents,
            }],
            Err(err) => {
                error!("event=snapshot_export module=service status=error reason=\"{err}\"");
                vec![UiUpdate::Alert(EXPORT_FAILED_MESSAGE.to_string())]
            }
        }
    }

    fn import(&mut self, raw: &str) -> Vec<UiUpdate> {
        match self.store.import_snapshot(raw) {
            Ok(_) => vec![
                UiUpdate::Screen(Screen::Home),
                UiUpdate::BookList(book_list(&self.store)),
                modal(Modal::Import, false),
                UiUpdate::Alert(IMPORT_SUCCESS_MESSAGE.to_string()),
            ],
            Err(err) => vec![UiUpdate::Alert(err.user_message())],
        }
    }
}

/// Parses page-count text with leading-integer semantics.
///
/// Leading whitespace and a sign are accepted and parsing stops at the first
/// non-digit, so `"12 pages"` yields 12. Values beyond `i64` saturate.
///
/// # Errors
/// `UnparseablePageCount` when no digit follows the optional sign.
pub fn parse_total_pages(raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: &str = &rest[..rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len())];
    if digits.is_empty() {
        return Err(ValidationError::UnparseablePageCount(raw.to_string()));
    }
    let magnitude = digits.bytes().fold(0_i64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    });
    Ok(if negative { -magnitude } else { magnitude })
}

fn modal(modal: Modal, visible: bool) -> UiUpdate {
    UiUpdate::Modal { modal, visible }
}

fn intent_name(intent: &Intent) -> &'static str {
    match intent {
        Intent::ShowCreateBook => "show_create_book",
        Intent::CancelCreateBook => "cancel_create_book",
        Intent::CreateBook { .. } => "create_book",
        Intent::DeleteBook(_) => "delete_book",
        Intent::SelectBook(_) => "select_book",
        Intent::ShowHome => "show_home",
        Intent::ToggleEditMode => "toggle_edit_mode",
        Intent::EditPage(_) => "edit_page",
        Intent::ChooseStatus(_) => "choose_status",
        Intent::SavePageStatus => "save_page_status",
        Intent::CancelPageEdit => "cancel_page_edit",
        Intent::Export { .. } => "export",
        Intent::ShowImport => "show_import",
        Intent::CancelImport => "cancel_import",
        Intent::Import { .. } => "import",
        Intent::ImportReadFailed(_) => "import_read_failed",
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_total_pages, Confirm};
    use crate::model::book::ValidationError;

    struct Decline;

    impl Confirm for Decline {
        fn confirm(&mut self, _message: &str) -> bool {
            false
        }
    }

    #[test]
    fn parse_total_pages_follows_leading_integer_rules() {
        assert_eq!(parse_total_pages("10").unwrap(), 10);
        assert_eq!(parse_total_pages("  12 pages").unwrap(), 12);
        assert_eq!(parse_total_pages("-3").unwrap(), -3);
        assert_eq!(parse_total_pages("7.9").unwrap(), 7);
        assert_eq!(
            parse_total_pages("abc").unwrap_err(),
            ValidationError::UnparseablePageCount("abc".to_string())
        );
        assert!(parse_total_pages("").is_err());
    }

    #[test]
    fn parse_total_pages_saturates_huge_values() {
        assert_eq!(parse_total_pages("99999999999999999999999").unwrap(), i64::MAX);
    }

    #[test]
    fn declined_delete_keeps_books() {
        use super::{Intent, TrackerService};
        use crate::config::TrackerConfig;

        let mut service = TrackerService::new(TrackerConfig::default(), Decline);
        let updates = service.dispatch(Intent::DeleteBook("sample1".to_string()));
        assert!(updates.is_empty());
        assert_eq!(service.store().books().len(), 2);
    }
}
