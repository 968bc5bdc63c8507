//! Tracker store: book collection plus view state.

use crate::model::book::{Book, BookId, Progress, ValidationError};
use crate::model::page::PageStatus;
use crate::snapshot::{decode_books, encode_books, ImportError};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};

/// Which top-level screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Book list.
    #[default]
    Home,
    /// Page grid of the current book.
    Detail,
}

/// Transient navigation and edit-dialog state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub screen: Screen,
    /// Weak reference into the book collection.
    pub current_book_id: Option<BookId>,
    pub is_edit_mode: bool,
    /// Page whose status dialog is open.
    pub editing_page_number: Option<u32>,
    /// Status currently highlighted in the dialog.
    pub chosen_status: Option<PageStatus>,
}

impl ViewState {
    fn clear_page_edit(&mut self) {
        self.editing_page_number = None;
        self.chosen_status = None;
    }
}

/// Single owner of all tracker state.
#[derive(Debug, Clone, Default)]
pub struct TrackerStore {
    books: Vec<Book>,
    view: ViewState,
}

impl TrackerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from an existing collection, e.g. a decoded snapshot.
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books,
            view: ViewState::default(),
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn book(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id.as_str() == id)
    }

    /// Book shown on the detail screen, if it still exists.
    pub fn current_book(&self) -> Option<&Book> {
        let id = self.view.current_book_id.as_ref()?;
        self.book(id.as_str())
    }

    /// Seeds two demo books when the collection is empty.
    ///
    /// Returns `false` and changes nothing when books already exist.
    pub fn seed_sample_data(&mut self, now: DateTime<Utc>) -> bool {
        if !self.books.is_empty() {
            return false;
        }
        self.books.push(sample_book("sample1", "Math workbook", 50, 15, now));
        self.books.push(sample_book("sample2", "Reading workbook", 30, 5, now));
        debug!("event=sample_seed module=store status=ok books=2");
        true
    }

    /// Creates a book stamped with the current time.
    pub fn create_book(&mut self, name: &str, total_pages: i64) -> Result<BookId, ValidationError> {
        self.create_book_at(name, total_pages, Utc::now())
    }

    /// Creates a book and appends it to the collection.
    ///
    /// # Errors
    /// Returns `ValidationError` for a blank name or a page count below 1; the
    /// collection is unchanged in that case.
    pub fn create_book_at(
        &mut self,
        name: &str,
        total_pages: i64,
        now: DateTime<Utc>,
    ) -> Result<BookId, ValidationError> {
        let book = Book::create(name, total_pages, now).inspect_err(|err| {
            warn!("event=book_create module=store status=rejected reason=\"{err}\"");
        })?;
        let id = book.id.clone();
        info!(
            "event=book_create module=store status=ok book_id={} total_pages={}",
            id, book.total_pages
        );
        self.books.push(book);
        Ok(id)
    }

    /// Removes the book with `id`; unknown ids are a no-op.
    pub fn delete_book(&mut self, id: &str) -> Option<Book> {
        let Some(position) = self.books.iter().position(|book| book.id.as_str() == id) else {
            debug!("event=book_delete module=store status=miss book_id={id}");
            return None;
        };
        let removed = self.books.remove(position);
        if self.view.current_book_id.as_ref() == Some(&removed.id) {
            self.view = ViewState::default();
        }
        info!("event=book_delete module=store status=ok book_id={id}");
        Some(removed)
    }

    /// Enters the detail screen for `id`.
    ///
    /// Edit mode is reset and any pending page selection is dropped. Returns
    /// `None` without touching the view when the id does not resolve.
    pub fn select_book(&mut self, id: &str) -> Option<&Book> {
        let index = self.books.iter().position(|book| book.id.as_str() == id)?;
        self.view = ViewState {
            screen: Screen::Detail,
            current_book_id: Some(self.books[index].id.clone()),
            is_edit_mode: false,
            editing_page_number: None,
            chosen_status: None,
        };
        Some(&self.books[index])
    }

    /// Returns to the book list.
    pub fn show_home(&mut self) {
        self.view.screen = Screen::Home;
        self.view.clear_page_edit();
    }

    /// Flips edit mode and returns the new value.
    pub fn toggle_edit_mode(&mut self) -> bool {
        self.view.is_edit_mode = !self.view.is_edit_mode;
        if !self.view.is_edit_mode {
            self.view.clear_page_edit();
        }
        self.view.is_edit_mode
    }

    /// Opens the status dialog for one page of the current book.
    ///
    /// Only effective in edit mode. Returns the page's current status; a known
    /// status also becomes the preselected choice.
    pub fn select_page_for_edit(&mut self, page_number: u32) -> Option<PageStatus> {
        if !self.view.is_edit_mode {
            return None;
        }
        let status = self.current_book()?.page(page_number)?.status.clone();
        self.view.editing_page_number = Some(page_number);
        self.view.chosen_status = match status {
            PageStatus::Other(_) => None,
            ref known => Some(known.clone()),
        };
        Some(status)
    }

    /// Records the status highlighted in the dialog.
    ///
    /// Ignored when no page is being edited.
    pub fn choose_status(&mut self, status: PageStatus) {
        if self.view.editing_page_number.is_some() {
            self.view.chosen_status = Some(status);
        }
    }

    pub fn cancel_page_edit(&mut self) {
        self.view.clear_page_edit();
    }

    /// Writes `status` onto the page being edited.
    ///
    /// Returns the recomputed progress, or `Ok(None)` when there is no page
    /// selection or the selection no longer resolves.
    ///
    /// # Errors
    /// `MissingStatus` when `status` is `None`; nothing changes.
    pub fn apply_page_status(
        &mut self,
        status: Option<PageStatus>,
    ) -> Result<Option<Progress>, ValidationError> {
        let Some(page_number) = self.view.editing_page_number else {
            return Ok(None);
        };
        let status = status.ok_or(ValidationError::MissingStatus)?;
        let Some(book) = self.current_book_mut() else {
            return Ok(None);
        };
        if !book.set_page_status(page_number, status.clone()) {
            return Ok(None);
        }
        let progress = book.progress();
        info!(
            "event=page_status module=store status=ok book_id={} page={} value={} completed={}",
            book.id, page_number, status, progress.completed
        );
        self.view.clear_page_edit();
        Ok(Some(progress))
    }

    /// Saves the status chosen through `choose_status`/`select_page_for_edit`.
    pub fn save_chosen_status(&mut self) -> Result<Option<Progress>, ValidationError> {
        let chosen = self.view.chosen_status.clone();
        self.apply_page_status(chosen)
    }

    /// Encodes the whole collection as pretty JSON.
    pub fn export_snapshot(&self) -> Result<String, serde_json::Error> {
        let encoded = encode_books(&self.books)?;
        info!(
            "event=snapshot_export module=store status=ok books={} bytes={}",
            self.books.len(),
            encoded.len()
        );
        Ok(encoded)
    }

    /// Replaces the collection with the books in `raw`.
    ///
    /// Returns the number of imported books. On success the view returns to
    /// the book list.
    ///
    /// # Errors
    /// Any `ImportError`; the store is left exactly as it was.
    pub fn import_snapshot(&mut self, raw: &str) -> Result<usize, ImportError> {
        let books = decode_books(raw).inspect_err(|err| {
            warn!("event=snapshot_import module=store status=rejected reason=\"{err}\"");
        })?;
        let count = books.len();
        self.books = books;
        self.view = ViewState::default();
        info!("event=snapshot_import module=store status=ok books={count}");
        Ok(count)
    }

    fn current_book_mut(&mut self) -> Option<&mut Book> {
        let id = self.view.current_book_id.as_ref()?;
        self.books.iter_mut().find(|book| &book.id == id)
    }
}

fn sample_book(id: &str, name: &str, total: u32, done: u32, now: DateTime<Utc>) -> Book {
    let mut book = Book::with_id(BookId::from(id), name, total, now);
    for number in 1..=done {
        book.set_page_status(number, PageStatus::Completed);
    }
    book
}
