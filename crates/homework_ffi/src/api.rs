//! FFI session API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose one sync call per user intent on an opaque tracker session.
//! - Flatten core UI updates into a single response envelope the UI applies.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Each session owns its tracker state; there is no process-wide store.
//! - Destructive calls carry the user's confirmation answer explicitly.

use homework_core::snapshot::{read_snapshot_file, write_snapshot_file};
use homework_core::view::html::{render_book_list, render_page_grid};
use homework_core::view::BookDetailView;
use homework_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Confirm, ImportError, Intent, Modal, PageStatus, Screen, TrackerConfig, TrackerService,
    UiUpdate,
};
use chrono::{NaiveDate, Utc};
use log::warn;
use std::path::Path;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Visibility change for one dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalToggle {
    /// `create_book|edit_page|import`.
    pub name: String,
    pub visible: bool,
}

/// File the UI should offer for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadFile {
    pub file_name: String,
    pub contents: String,
}

/// Flattened UI updates produced by one session call.
///
/// `None` fields mean "leave as is".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionResponse {
    /// `false` when the call only produced a user message and no re-render.
    pub ok: bool,
    /// Alert text for the user, empty when there is nothing to show.
    pub message: String,
    /// `home|detail`.
    pub screen: Option<String>,
    pub book_list_html: Option<String>,
    pub book_title: Option<String>,
    pub page_grid_html: Option<String>,
    pub remaining_pages: Option<u32>,
    /// CSS width for the progress fill, e.g. `10%`.
    pub progress_width: Option<String>,
    pub edit_button_label: Option<String>,
    pub modals: Vec<ModalToggle>,
    /// Status to highlight in the edit dialog; empty string clears the highlight.
    pub preselect_status: Option<String>,
    pub download: Option<DownloadFile>,
}

impl SessionResponse {
    fn from_updates(updates: Vec<UiUpdate>) -> Self {
        let mut response = Self::default();
        let mut rendered = false;
        for update in updates {
            match update {
                UiUpdate::Screen(screen) => {
                    response.screen = Some(screen_label(screen).to_string());
                }
                UiUpdate::BookList(list) => {
                    response.book_list_html = Some(render_book_list(&list));
                    rendered = true;
                }
                UiUpdate::BookDetail(detail) => {
                    response.apply_detail(detail);
                    rendered = true;
                }
                UiUpdate::PageGrid(grid) => {
                    response.page_grid_html = Some(render_page_grid(&grid));
                    rendered = true;
                }
                UiUpdate::Progress(progress) => {
                    response.remaining_pages = Some(progress.remaining_pages);
                    response.progress_width = Some(progress.bar_width);
                    rendered = true;
                }
                UiUpdate::EditModeLabel(label) => {
                    response.edit_button_label = Some(label.to_string());
                }
                UiUpdate::Modal { modal, visible } => response.modals.push(ModalToggle {
                    name: modal_name(modal).to_string(),
                    visible,
                }),
                UiUpdate::PreselectStatus { status, .. } => {
                    response.preselect_status = Some(
                        status
                            .map(|value| value.as_str().to_string())
                            .unwrap_or_default(),
                    );
                }
                UiUpdate::Alert(message) => response.message = message,
                UiUpdate::Download {
                    file_name,
                    contents,
                } => {
                    response.download = Some(DownloadFile {
                        file_name,
                        contents,
                    });
                    rendered = true;
                }
            }
        }
        response.ok = rendered || response.message.is_empty();
        response
    }

    fn apply_detail(&mut self, detail: BookDetailView) {
        self.book_title = Some(detail.title);
        self.remaining_pages = Some(detail.progress.remaining_pages);
        self.progress_width = Some(detail.progress.bar_width);
        self.edit_button_label = Some(detail.edit_button_label.to_string());
        self.page_grid_html = Some(render_page_grid(&detail.grid));
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            ..Self::default()
        }
    }
}

/// Confirmation answer supplied with the call that needs it.
///
/// The answer is consumed by the first prompt so it never leaks into a later
/// call.
#[derive(Debug, Default)]
struct CallConfirm {
    answer: bool,
}

impl Confirm for CallConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        std::mem::take(&mut self.answer)
    }
}

/// Opaque tracker session owned by the UI.
#[flutter_rust_bridge::frb(opaque)]
pub struct TrackerSession {
    service: TrackerService<CallConfirm>,
}

impl TrackerSession {
    /// Creates a session; demo books are seeded when `seed_sample_data` is set.
    #[flutter_rust_bridge::frb(sync)]
    pub fn new(seed_sample_data: bool) -> Self {
        let config = TrackerConfig {
            seed_sample_data,
            ..TrackerConfig::default()
        };
        Self::with_config(config)
    }

    /// Creates a session from configuration JSON.
    ///
    /// Invalid JSON falls back to the default configuration.
    #[flutter_rust_bridge::frb(sync)]
    pub fn from_config_json(raw: String) -> Self {
        let config = TrackerConfig::from_json(raw.as_str()).unwrap_or_else(|err| {
            warn!("event=session_config module=ffi status=fallback reason=\"{err}\"");
            TrackerConfig::default()
        });
        Self::with_config(config)
    }

    fn with_config(config: TrackerConfig) -> Self {
        Self {
            service: TrackerService::new(config, CallConfirm::default()),
        }
    }

    /// Paints the startup screen.
    #[flutter_rust_bridge::frb(sync)]
    pub fn initial_render(&self) -> SessionResponse {
        SessionResponse::from_updates(self.service.initial_render())
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn show_create_book(&mut self) -> SessionResponse {
        self.dispatch(Intent::ShowCreateBook)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn cancel_create_book(&mut self) -> SessionResponse {
        self.dispatch(Intent::CancelCreateBook)
    }

    /// Submits the create-book form; `total_pages` is the raw field text.
    #[flutter_rust_bridge::frb(sync)]
    pub fn create_book(&mut self, name: String, total_pages: String) -> SessionResponse {
        self.dispatch(Intent::CreateBook { name, total_pages })
    }

    /// Deletes a book; nothing happens unless `confirmed` is true.
    #[flutter_rust_bridge::frb(sync)]
    pub fn delete_book(&mut self, book_id: String, confirmed: bool) -> SessionResponse {
        self.service_confirm(confirmed);
        self.dispatch(Intent::DeleteBook(book_id))
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn select_book(&mut self, book_id: String) -> SessionResponse {
        self.dispatch(Intent::SelectBook(book_id))
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn show_home(&mut self) -> SessionResponse {
        self.dispatch(Intent::ShowHome)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn toggle_edit_mode(&mut self) -> SessionResponse {
        self.dispatch(Intent::ToggleEditMode)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn edit_page(&mut self, page_number: u32) -> SessionResponse {
        self.dispatch(Intent::EditPage(page_number))
    }

    /// Highlights a status in the edit dialog (`not-started|completed`).
    #[flutter_rust_bridge::frb(sync)]
    pub fn choose_status(&mut self, status: String) -> SessionResponse {
        match PageStatus::parse_known(status.trim()) {
            Some(status) => self.dispatch(Intent::ChooseStatus(status)),
            None => SessionResponse::failure(format!("unknown page status: `{status}`")),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn save_page_status(&mut self) -> SessionResponse {
        self.dispatch(Intent::SavePageStatus)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn cancel_page_edit(&mut self) -> SessionResponse {
        self.dispatch(Intent::CancelPageEdit)
    }

    /// Returns the snapshot as a download payload named with today's date.
    #[flutter_rust_bridge::frb(sync)]
    pub fn export_snapshot(&mut self) -> SessionResponse {
        self.dispatch(Intent::Export {
            today: export_date(),
        })
    }

    /// Writes the snapshot into `dir`; the message carries the written path.
    #[flutter_rust_bridge::frb(sync)]
    pub fn export_snapshot_to_dir(&self, dir: String) -> SessionResponse {
        let today = export_date();
        let store = self.service.store();
        match write_snapshot_file(
            Path::new(dir.trim()),
            &self.service.config().export_basename,
            today,
            store.books(),
        ) {
            Ok(path) => SessionResponse {
                ok: true,
                message: path.display().to_string(),
                ..SessionResponse::default()
            },
            Err(err) => SessionResponse::failure(format!("Export failed: {err}")),
        }
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn show_import(&mut self) -> SessionResponse {
        self.dispatch(Intent::ShowImport)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn cancel_import(&mut self) -> SessionResponse {
        self.dispatch(Intent::CancelImport)
    }

    /// Imports snapshot text; `None` means no file was picked.
    #[flutter_rust_bridge::frb(sync)]
    pub fn import_snapshot(&mut self, raw: Option<String>) -> SessionResponse {
        self.dispatch(Intent::Import { raw })
    }

    /// Reads a snapshot file from disk and imports it.
    #[flutter_rust_bridge::frb(sync)]
    pub fn import_snapshot_file(&mut self, path: String) -> SessionResponse {
        match read_snapshot_file(Path::new(path.trim())) {
            Ok(raw) => self.dispatch(Intent::Import { raw: Some(raw) }),
            Err(ImportError::Read(details)) => self.dispatch(Intent::ImportReadFailed(details)),
            Err(other) => SessionResponse::failure(other.user_message()),
        }
    }

    fn service_confirm(&mut self, confirmed: bool) {
        self.service.confirm_mut().answer = confirmed;
    }

    fn dispatch(&mut self, intent: Intent) -> SessionResponse {
        SessionResponse::from_updates(self.service.dispatch(intent))
    }
}

fn screen_label(screen: Screen) -> &'static str {
    match screen {
        Screen::Home => "home",
        Screen::Detail => "detail",
    }
}

/// Export files are stamped with the UTC calendar date.
fn export_date() -> NaiveDate {
    Utc::now().date_naive()
}

fn modal_name(modal: Modal) -> &'static str {
    match modal {
        Modal::CreateBook => "create_book",
        Modal::EditPage => "edit_page",
        Modal::Import => "import",
    }
}
