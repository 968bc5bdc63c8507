use chrono::NaiveDate;
use homework_core::view::html::{render_book_list, render_page_grid};
use homework_core::view::BookListView;
use homework_core::{
    AlwaysConfirm, Confirm, Intent, Modal, PageStatus, Screen, TrackerConfig, TrackerService,
    UiUpdate,
};

struct ScriptedConfirm {
    answers: Vec<bool>,
    asked: Vec<String>,
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.answers.pop().unwrap_or(false)
    }
}

fn empty_config() -> TrackerConfig {
    TrackerConfig {
        seed_sample_data: false,
        ..TrackerConfig::default()
    }
}

fn alerts(updates: &[UiUpdate]) -> Vec<&str> {
    updates
        .iter()
        .filter_map(|update| match update {
            UiUpdate::Alert(message) => Some(message.as_str()),
            _ => None,
        })
        .collect()
}

fn create(service: &mut TrackerService<impl Confirm>, name: &str, pages: &str) -> Vec<UiUpdate> {
    service.dispatch(Intent::CreateBook {
        name: name.to_string(),
        total_pages: pages.to_string(),
    })
}

#[test]
fn default_config_seeds_sample_books() {
    let service = TrackerService::new(TrackerConfig::default(), AlwaysConfirm);
    let books = service.store().books();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0].total_pages, 50);
    assert_eq!(books[1].total_pages, 30);

    let updates = service.initial_render();
    assert_eq!(updates[0], UiUpdate::Screen(Screen::Home));
    match &updates[1] {
        UiUpdate::BookList(BookListView::Cards(cards)) => {
            assert_eq!(cards.len(), 2);
            assert_eq!(cards[0].completed_pages, 15);
            assert_eq!(cards[0].percentage, 30.0);
        }
        other => panic!("unexpected update: {other:?}"),
    }
}

#[test]
fn create_book_closes_dialog_and_rerenders_list() {
    let mut service = TrackerService::new(empty_config(), AlwaysConfirm);
    assert_eq!(
        service.dispatch(Intent::ShowCreateBook),
        vec![UiUpdate::Modal {
            modal: Modal::CreateBook,
            visible: true
        }]
    );

    let updates = create(&mut service, " Math ", "10");
    assert_eq!(
        updates[0],
        UiUpdate::Modal {
            modal: Modal::CreateBook,
            visible: false
        }
    );
    let UiUpdate::BookList(BookListView::Cards(cards)) = &updates[1] else {
        panic!("expected book list, got {:?}", updates[1]);
    };
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].name, "Math");
    assert_eq!(cards[0].total_pages, 10);
}

#[test]
fn invalid_create_input_alerts_without_mutation() {
    let mut service = TrackerService::new(empty_config(), AlwaysConfirm);
    for (name, pages) in [("", "10"), ("Math", "0"), ("Math", "-4"), ("Math", "many")] {
        let updates = create(&mut service, name, pages);
        assert_eq!(
            alerts(&updates),
            vec!["Please enter a valid book name and page count."]
        );
    }
    assert!(service.store().books().is_empty());
}

#[test]
fn delete_requires_confirmation() {
    let confirm = ScriptedConfirm {
        answers: vec![true, false],
        asked: Vec::new(),
    };
    let mut service = TrackerService::new(empty_config(), confirm);
    create(&mut service, "Math", "3");
    let id = service.store().books()[0].id.to_string();

    assert!(service.dispatch(Intent::DeleteBook(id.clone())).is_empty());
    assert_eq!(service.store().books().len(), 1);

    let updates = service.dispatch(Intent::DeleteBook(id));
    assert_eq!(updates, vec![UiUpdate::BookList(BookListView::Empty)]);
    assert!(service.store().books().is_empty());
}

#[test]
fn full_edit_flow_updates_progress_and_grid() {
    let mut service = TrackerService::new(empty_config(), AlwaysConfirm);
    create(&mut service, "Math", "10");
    let id = service.store().books()[0].id.to_string();

    let updates = service.dispatch(Intent::SelectBook(id));
    let UiUpdate::BookDetail(detail) = &updates[0] else {
        panic!("expected detail, got {:?}", updates[0]);
    };
    assert_eq!(detail.title, "Math");
    assert_eq!(detail.edit_button_label, "Edit");
    assert_eq!(detail.progress.remaining_pages, 10);
    assert_eq!(detail.progress.bar_width, "0%");
    assert!(detail.grid.cells.iter().all(|cell| !cell.interactive));
    assert_eq!(updates[1], UiUpdate::Screen(Screen::Detail));

    // Page clicks are ignored outside edit mode.
    assert!(service.dispatch(Intent::EditPage(3)).is_empty());

    let updates = service.dispatch(Intent::ToggleEditMode);
    assert_eq!(updates[0], UiUpdate::EditModeLabel("Done editing"));
    let Some(UiUpdate::PageGrid(grid)) = updates.last() else {
        panic!("expected grid, got {updates:?}");
    };
    assert!(grid.cells.iter().all(|cell| cell.interactive));
    assert!(render_page_grid(grid).contains("data-action=\"edit-page\""));

    let updates = service.dispatch(Intent::EditPage(3));
    assert_eq!(
        updates,
        vec![
            UiUpdate::PreselectStatus {
                page: 3,
                status: Some(PageStatus::NotStarted)
            },
            UiUpdate::Modal {
                modal: Modal::EditPage,
                visible: true
            },
        ]
    );

    service.dispatch(Intent::ChooseStatus(PageStatus::Completed));
    let updates = service.dispatch(Intent::SavePageStatus);
    let UiUpdate::Progress(progress) = &updates[0] else {
        panic!("expected progress, got {:?}", updates[0]);
    };
    assert_eq!(progress.remaining_pages, 9);
    assert_eq!(progress.percentage, 10.0);
    assert_eq!(progress.bar_width, "10%");
    assert_eq!(
        updates.last(),
        Some(&UiUpdate::Modal {
            modal: Modal::EditPage,
            visible: false
        })
    );
    assert_eq!(service.store().view().editing_page_number, None);
}

#[test]
fn saving_unknown_status_page_without_choice_alerts() {
    let mut service = TrackerService::new(empty_config(), AlwaysConfirm);
    service.dispatch(Intent::Import {
        raw: Some(
            r#"[{"id":"x","name":"A","totalPages":1,"pages":[{"number":1,"status":"skipped"}]}]"#
                .to_string(),
        ),
    });
    service.dispatch(Intent::SelectBook("x".to_string()));
    service.dispatch(Intent::ToggleEditMode);

    let updates = service.dispatch(Intent::EditPage(1));
    assert_eq!(
        updates[0],
        UiUpdate::PreselectStatus {
            page: 1,
            status: None
        }
    );

    let updates = service.dispatch(Intent::SavePageStatus);
    assert_eq!(alerts(&updates), vec!["Please choose a page status."]);
    assert_eq!(service.store().view().editing_page_number, Some(1));
}

#[test]
fn cancel_page_edit_hides_dialog() {
    let mut service = TrackerService::new(empty_config(), AlwaysConfirm);
    create(&mut service, "Math", "2");
    let id = service.store().books()[0].id.to_string();
    service.dispatch(Intent::SelectBook(id));
    service.dispatch(Intent::ToggleEditMode);
    service.dispatch(Intent::EditPage(1));

    let updates = service.dispatch(Intent::CancelPageEdit);
    assert_eq!(
        updates,
        vec![UiUpdate::Modal {
            modal: Modal::EditPage,
            visible: false
        }]
    );
    assert!(service.dispatch(Intent::SavePageStatus).is_empty());
}

#[test]
fn export_offers_dated_download() {
    let mut service = TrackerService::new(empty_config(), AlwaysConfirm);
    create(&mut service, "Math", "2");
    let today = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();

    let updates = service.dispatch(Intent::Export { today });
    let [UiUpdate::Download {
        file_name,
        contents,
    }] = updates.as_slice()
    else {
        panic!("expected download, got {updates:?}");
    };
    assert_eq!(file_name, "homework_stats_2024-05-17.json");
    let parsed: serde_json::Value = serde_json::from_str(contents).unwrap();
    assert_eq!(parsed[0]["name"], "Math");
}

#[test]
fn import_success_returns_home_with_message() {
    let mut service = TrackerService::new(TrackerConfig::default(), AlwaysConfirm);
    service.dispatch(Intent::SelectBook("sample1".to_string()));

    let updates = service.dispatch(Intent::Import {
        raw: Some(
            r#"[{"id":"x","name":"A","totalPages":2,"pages":[{"number":1,"status":"completed"},{"number":2,"status":"not-started"}],"createdAt":"2024-01-01T00:00:00Z"}]"#
                .to_string(),
        ),
    });
    assert_eq!(updates[0], UiUpdate::Screen(Screen::Home));
    let UiUpdate::BookList(list) = &updates[1] else {
        panic!("expected list, got {:?}", updates[1]);
    };
    let html = render_book_list(list);
    assert!(html.contains("Completed: 1 pages"));
    assert!(html.contains("Created: 2024-01-01"));
    assert!(html.contains("width: 50%"));
    assert_eq!(alerts(&updates), vec!["Data imported successfully!"]);
    assert!(service.store().current_book().is_none());
}

#[test]
fn import_failures_alert_and_keep_state() {
    let mut service = TrackerService::new(TrackerConfig::default(), AlwaysConfirm);

    let updates = service.dispatch(Intent::Import { raw: None });
    assert_eq!(alerts(&updates), vec!["Please choose a file to import."]);

    let updates = service.dispatch(Intent::Import {
        raw: Some(r#"{"not":"a list"}"#.to_string()),
    });
    assert_eq!(updates.len(), 1);
    assert!(alerts(&updates)[0].starts_with("Import failed: "));

    let updates = service.dispatch(Intent::ImportReadFailed("permission denied".to_string()));
    assert!(alerts(&updates)[0].contains("permission denied"));

    assert_eq!(service.store().books().len(), 2);
}

#[test]
fn show_home_rerenders_list() {
    let mut service = TrackerService::new(TrackerConfig::default(), AlwaysConfirm);
    service.dispatch(Intent::SelectBook("sample2".to_string()));
    let updates = service.dispatch(Intent::ShowHome);
    assert_eq!(updates[0], UiUpdate::Screen(Screen::Home));
    assert!(matches!(updates[1], UiUpdate::BookList(BookListView::Cards(_))));
}
