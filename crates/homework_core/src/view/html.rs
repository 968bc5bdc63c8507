//! HTML rendering of view models.
//!
//! Actions are exposed through `data-action` attributes so an adapter can
//! bind handlers by typed lookup instead of inline script.

use crate::view::projection::{format_percentage, BookCard, BookListView, PageGridView};
use std::fmt::Write;

const EMPTY_LIST_HTML: &str = "<div class=\"no-books\"><p>No books yet. Click \"New book\" to get started.</p></div>";

/// Renders the book list screen.
pub fn render_book_list(view: &BookListView) -> String {
    match view {
        BookListView::Empty => EMPTY_LIST_HTML.to_string(),
        BookListView::Cards(cards) => cards.iter().map(render_book_card).collect(),
    }
}

/// Renders the page grid.
pub fn render_page_grid(view: &PageGridView) -> String {
    let mut out = String::new();
    for cell in &view.cells {
        let status_class = escape(cell.status.as_str());
        let title = escape(&cell.title);
        let n = cell.number.map(|number| number.to_string()).unwrap_or_default();
        match cell.number.filter(|_| cell.interactive) {
            Some(number) => {
                let _ = write!(
                    out,
                    "<div class=\"page-item {status_class} editable\" title=\"{title}\" \
                     data-action=\"edit-page\" data-page=\"{number}\">{n}</div>"
                );
            }
            None => {
                let _ = write!(
                    out,
                    "<div class=\"page-item {status_class}\" title=\"{title}\">{n}</div>"
                );
            }
        }
    }
    out
}

fn render_book_card(card: &BookCard) -> String {
    let id = escape(card.id.as_str());
    format!(
        "<div class=\"book-item\">\
         <h3>{name}</h3>\
         <div class=\"book-info\">\
         <p>Total pages: {total}</p>\
         <p>Completed: {completed} pages</p>\
         <p>Created: {created}</p>\
         </div>\
         <div class=\"progress\"><div class=\"progress-bar\" style=\"width: {width}%\"></div></div>\
         <div class=\"book-actions\">\
         <button class=\"btn-primary\" data-action=\"select-book\" data-book-id=\"{id}\">View details</button>\
         <button class=\"btn-secondary\" data-action=\"delete-book\" data-book-id=\"{id}\">Delete</button>\
         </div>\
         </div>",
        name = escape(&card.name),
        total = card.total_pages,
        completed = card.completed_pages,
        created = escape(&card.created_on),
        width = format_percentage(card.percentage),
    )
}

/// Escapes text for use in element content and quoted attributes.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
