//! End-to-end import scenarios against in-memory Notion and notes store.

mod common;

use common::*;
use notion_import::{AppError, ImportRequest, PageListRequest};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn request(user: Option<&str>, page: Option<&str>, project: Option<&str>) -> ImportRequest {
    ImportRequest {
        user_id: user.map(str::to_string),
        page_id: page.map(str::to_string),
        project_id: project.map(str::to_string),
    }
}

fn full_request() -> ImportRequest {
    request(Some(USER_ID), Some(PAGE_ID), Some(PROJECT_ID))
}

#[tokio::test]
async fn q3_plan_is_imported_with_title_and_tidy_body() {
    let store = Arc::new(FakeStore::connected());
    let service = import_service(q3_plan(), store.clone());

    let outcome = service.import(full_request()).await.unwrap();

    assert_eq!(outcome.title, "Q3 Plan");
    assert_eq!(outcome.note.content, "# Goals\n\n• Grow 10%\n• Ship v2");
    assert_eq!(outcome.message(), "Successfully imported \"Q3 Plan\" from Notion");

    let notes = store.notes.lock().unwrap();
    assert_eq!(notes.len(), 1);
    let note = &notes[0];
    assert_eq!(note.title, "Q3 Plan");
    assert_eq!(note.project_id.as_str(), PROJECT_ID);
    assert_eq!(note.user_id.as_str(), USER_ID);
    assert_eq!(note.tags, vec!["notion", "imported", "notion-import"]);
    assert_eq!(note.source_metadata.source_type, "notion");
    assert_eq!(note.source_metadata.name, "Q3 Plan");
    assert_eq!(note.source_metadata.id, PAGE_ID);
    assert!(note.source_metadata.url.ends_with(PAGE_ID));
}

#[tokio::test]
async fn nested_fetch_failure_still_imports_with_placeholder() {
    let broken = block_id(7);
    let notion = FakeNotion::default()
        .with_page(
            page(vec![("title", title_property("Roadmap"))]),
            vec![
                paragraph("Intro"),
                parent_bullet(broken.clone(), "Parent"),
                paragraph("Outro"),
            ],
        )
        .failing_children_of(&broken);
    let store = Arc::new(FakeStore::connected());

    let outcome = import_service(notion, store)
        .import(full_request())
        .await
        .unwrap();

    assert_eq!(outcome.stats.nested_failures, 1);
    assert_eq!(outcome.stats.blocks_fetched, 3);
    assert!(outcome
        .note
        .content
        .contains("*[Error loading nested content]*"));
    let intro = outcome.note.content.find("Intro").unwrap();
    let placeholder = outcome.note.content.find("*[Error").unwrap();
    let outro = outcome.note.content.find("Outro").unwrap();
    assert!(intro < placeholder && placeholder < outro);
}

#[tokio::test]
async fn nested_children_are_indented_under_parent() {
    let parent = block_id(1);
    let notion = FakeNotion::default()
        .with_page(
            page(vec![("title", title_property("Nested"))]),
            vec![parent_bullet(parent.clone(), "Top")],
        )
        .with_children(&parent, vec![bullet("Inner")]);
    let store = Arc::new(FakeStore::connected());

    let outcome = import_service(notion, store)
        .import(full_request())
        .await
        .unwrap();

    assert_eq!(outcome.note.content, "• Top\n • Inner");
    assert_eq!(outcome.stats.blocks_fetched, 2);
    assert_eq!(outcome.stats.deepest_level, 1);
    // page, top-level listing, children of "Top"
    assert_eq!(outcome.stats.requests, 3);
}

#[tokio::test]
async fn missing_user_id_is_rejected_before_any_call() {
    let store = Arc::new(FakeStore::connected());
    let service = import_service(q3_plan(), store.clone());

    let err = service
        .import(request(None, Some(PAGE_ID), Some(PROJECT_ID)))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Missing required parameters: userId, pageId, and projectId"
    );
    assert!(store.notes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn user_without_connection_is_told_to_connect() {
    let store = Arc::new(FakeStore::default());
    let err = import_service(q3_plan(), store)
        .import(full_request())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ConnectionNotFound { .. }));
    assert_eq!(
        err.to_string(),
        "Notion connection not found. Please connect your Notion account first."
    );
}

#[tokio::test]
async fn unknown_page_fails_the_whole_import() {
    let store = Arc::new(FakeStore::connected());
    let result = import_service(FakeNotion::default(), store.clone())
        .import(full_request())
        .await;

    assert!(result.is_err());
    assert!(store.notes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn store_rejection_surfaces_its_message() {
    let store = Arc::new(FakeStore {
        reject_inserts: Some("violates foreign key constraint".to_string()),
        ..FakeStore::connected()
    });

    let err = import_service(q3_plan(), store)
        .import(full_request())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Failed to save note: violates foreign key constraint"
    );
}

#[tokio::test]
async fn untitled_page_takes_its_heading() {
    let notion = FakeNotion::default().with_page(
        page(vec![]),
        vec![paragraph("Some intro"), heading_1("Launch checklist")],
    );
    let store = Arc::new(FakeStore::connected());

    let outcome = import_service(notion, store)
        .import(full_request())
        .await
        .unwrap();

    assert_eq!(outcome.title, "Launch checklist");
}

#[tokio::test]
async fn page_picker_lists_titles() {
    let store = Arc::new(FakeStore::connected());
    let pages = import_service(q3_plan(), store)
        .list_pages(PageListRequest {
            user_id: Some(USER_ID.to_string()),
            query: Some("Q3".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].title, "Q3 Plan");
    assert_eq!(pages[0].id, "01234567-89ab-cdef-0123-456789abcdef");
    assert_eq!(
        pages[0].last_edited_time.as_deref(),
        Some("2024-03-01T09:30:00.000Z")
    );
}
