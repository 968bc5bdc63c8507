use homework_core::view::{book_detail, book_list, BookListView};
use homework_core::{PageStatus, TrackerStore};

#[test]
fn empty_store_projects_placeholder() {
    assert_eq!(book_list(&TrackerStore::new()), BookListView::Empty);
}

#[test]
fn cards_follow_collection_order() {
    let mut store = TrackerStore::new();
    store.create_book("First", 4).unwrap();
    store.create_book("Second", 2).unwrap();

    let BookListView::Cards(cards) = book_list(&store) else {
        panic!("expected cards");
    };
    let names: Vec<&str> = cards.iter().map(|card| card.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);
    assert_eq!(cards[0].created_on.len(), "YYYY-MM-DD".len());
}

#[test]
fn detail_requires_current_book() {
    let mut store = TrackerStore::new();
    let id = store.create_book("Math", 3).unwrap();
    assert!(book_detail(&store).is_none());

    store.select_book(id.as_str()).unwrap();
    let detail = book_detail(&store).unwrap();
    assert_eq!(detail.book_id, id);
    assert_eq!(detail.grid.cells.len(), 3);
    assert_eq!(detail.grid.cells[0].title, "Page 1 - Not started");
}

#[test]
fn detail_reflects_edit_mode_and_statuses() {
    let mut store = TrackerStore::new();
    let id = store.create_book("Math", 3).unwrap();
    store.select_book(id.as_str()).unwrap();
    store.toggle_edit_mode();
    store.select_page_for_edit(1).unwrap();
    store
        .apply_page_status(Some(PageStatus::Completed))
        .unwrap();

    let detail = book_detail(&store).unwrap();
    assert_eq!(detail.edit_button_label, "Done editing");
    assert!(detail.grid.cells.iter().all(|cell| cell.interactive));
    assert_eq!(detail.grid.cells[0].status, PageStatus::Completed);
    assert_eq!(detail.grid.cells[0].title, "Page 1 - Completed");
    assert_eq!(detail.progress.remaining_pages, 2);
}
