//! View models for the list and detail screens.

use crate::model::book::{Book, BookId, Progress};
use crate::model::page::{Page, PageStatus};
use crate::store::TrackerStore;
use chrono::DateTime;

const EDIT_LABEL: &str = "Edit";
const DONE_EDITING_LABEL: &str = "Done editing";

/// Book list screen content.
#[derive(Debug, Clone, PartialEq)]
pub enum BookListView {
    /// Placeholder shown when there are no books.
    Empty,
    /// One card per book, in collection order.
    Cards(Vec<BookCard>),
}

/// Summary card for one book on the list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct BookCard {
    pub id: BookId,
    pub name: String,
    pub total_pages: u32,
    pub completed_pages: u32,
    /// `YYYY-MM-DD`, or the raw `createdAt` text when it does not parse.
    pub created_on: String,
    pub percentage: f64,
}

/// Progress summary as displayed on the detail screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub remaining_pages: u32,
    pub percentage: f64,
    /// CSS width value such as `"10%"`.
    pub bar_width: String,
}

impl From<Progress> for ProgressView {
    fn from(value: Progress) -> Self {
        Self {
            remaining_pages: value.remaining,
            percentage: value.percentage,
            bar_width: format!("{}%", format_percentage(value.percentage)),
        }
    }
}

/// One page cell in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCell {
    /// `None` for imported entries without an integer number.
    pub number: Option<u32>,
    pub status: PageStatus,
    /// Tooltip text, e.g. `Page 3 - Completed`.
    pub title: String,
    /// Whether clicking the cell opens the status dialog. Cells without a
    /// number never are.
    pub interactive: bool,
}

/// Page grid of one book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageGridView {
    pub cells: Vec<PageCell>,
}

/// Detail screen content.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDetailView {
    pub book_id: BookId,
    pub title: String,
    pub progress: ProgressView,
    pub edit_button_label: &'static str,
    pub grid: PageGridView,
}

/// Projects the book collection into list cards.
pub fn book_list(store: &TrackerStore) -> BookListView {
    if store.books().is_empty() {
        return BookListView::Empty;
    }
    BookListView::Cards(store.books().iter().map(book_card).collect())
}

/// Projects the current book into the detail screen.
///
/// Returns `None` when no current book resolves.
pub fn book_detail(store: &TrackerStore) -> Option<BookDetailView> {
    let book = store.current_book()?;
    let edit_mode = store.view().is_edit_mode;
    Some(BookDetailView {
        book_id: book.id.clone(),
        title: book.name.clone(),
        progress: book.progress().into(),
        edit_button_label: edit_button_label(edit_mode),
        grid: page_grid(book, edit_mode),
    })
}

/// Projects the pages of `book` into grid cells.
pub fn page_grid(book: &Book, edit_mode: bool) -> PageGridView {
    PageGridView {
        cells: book
            .pages
            .iter()
            .map(|page| page_cell(page, edit_mode))
            .collect(),
    }
}

pub fn edit_button_label(edit_mode: bool) -> &'static str {
    if edit_mode {
        DONE_EDITING_LABEL
    } else {
        EDIT_LABEL
    }
}

/// Formats a percentage without trailing zeros (`10`, `33.333333333333336`).
pub fn format_percentage(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn book_card(book: &Book) -> BookCard {
    let progress = book.progress();
    BookCard {
        id: book.id.clone(),
        name: book.name.clone(),
        total_pages: book.total_pages,
        completed_pages: progress.completed,
        created_on: book.created_at.as_deref().map(created_on).unwrap_or_default(),
        percentage: progress.percentage,
    }
}

fn page_cell(page: &Page, edit_mode: bool) -> PageCell {
    let label = page.number.map(|number| number.to_string()).unwrap_or_default();
    PageCell {
        number: page.number,
        status: page.status.clone(),
        title: format!("Page {label} - {}", page.status.label()),
        interactive: edit_mode && page.number.is_some(),
    }
}

fn created_on(created_at: &str) -> String {
    DateTime::parse_from_rfc3339(created_at)
        .map(|timestamp| timestamp.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| created_at.to_string())
}
