//! The Notion HTTP client and fetcher against a mock Notion API.

mod common;

use common::{FakeStore, PROJECT_ID, TOKEN, USER_ID};
use notion_import::{
    AccessToken, AppError, Block, Children, HttpNotionConnector, ImportRequest, NotionErrorCode,
    NotionFetcher, NotionHttpClient, NotionId, NotionImport, NotionRepository, ValidatedUrl,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = "0123456789abcdef0123456789abcdef";
const PAGE_HYPHENATED: &str = "01234567-89ab-cdef-0123-456789abcdef";
const PARENT_BLOCK: &str = "11111111-2222-3333-4444-555555555555";

fn client(server: &MockServer) -> NotionHttpClient {
    let token = AccessToken::new("secret_test_token").unwrap();
    NotionHttpClient::with_base_url(&token, &server.uri()).unwrap()
}

fn page_json() -> serde_json::Value {
    json!({
        "object": "page",
        "id": PAGE_HYPHENATED,
        "url": "https://www.notion.so/Q3-Plan-0123456789abcdef0123456789abcdef",
        "last_edited_time": "2024-03-01T09:30:00.000Z",
        "archived": false,
        "properties": {
            "Status": {"id": "s", "type": "select", "select": {"name": "Done"}},
            "Name": {"id": "title", "type": "title", "title": [
                {"type": "text", "plain_text": "Q3 ", "href": null},
                {"type": "text", "plain_text": "Plan", "href": null}
            ]}
        }
    })
}

fn list(results: serde_json::Value) -> serde_json::Value {
    json!({"object": "list", "results": results, "next_cursor": null, "has_more": false})
}

#[tokio::test]
async fn page_request_sends_auth_and_version_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/pages/{}", PAGE_HYPHENATED)))
        .and(header("Authorization", "Bearer secret_test_token"))
        .and(header("Notion-Version", "2022-06-28"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json()))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server)
        .retrieve_page(&NotionId::parse(PAGE).unwrap())
        .await
        .unwrap();

    assert_eq!(page.id.as_str(), PAGE);
    let keys: Vec<_> = page.properties.keys().cloned().collect();
    assert_eq!(keys, vec!["Status", "Name"]);
    assert_eq!(
        page.properties["Name"].title_text().as_deref(),
        Some("Q3 Plan")
    );
}

#[tokio::test]
async fn upstream_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/pages/{}", PAGE_HYPHENATED)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "object": "error",
            "status": 404,
            "code": "object_not_found",
            "message": "Could not find page with ID: 01234567-89ab-cdef-0123-456789abcdef."
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .retrieve_page(&NotionId::parse(PAGE).unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.notion_code(), Some(&NotionErrorCode::ObjectNotFound));
    assert!(err
        .to_string()
        .contains("Could not find page with ID: 01234567-89ab-cdef-0123-456789abcdef."));
}

#[tokio::test]
async fn top_level_children_request_page_size() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/blocks/{}/children", PAGE_HYPHENATED)))
        .and(query_param("page_size", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(json!([
            {"object": "block", "id": PARENT_BLOCK, "type": "paragraph", "has_children": false,
             "paragraph": {"rich_text": [{"plain_text": "Hello"}]}}
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let blocks = client(&server)
        .retrieve_children(&NotionId::parse(PAGE).unwrap(), Some(100))
        .await
        .unwrap();

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind_name(), "paragraph");
}

#[tokio::test]
async fn search_posts_page_filter_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({
            "query": "plan",
            "filter": {"value": "page", "property": "object"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(json!([page_json()]))))
        .expect(1)
        .mount(&server)
        .await;

    let pages = client(&server).search_pages(Some(" plan ")).await.unwrap();
    assert_eq!(pages.len(), 1);
}

#[tokio::test]
async fn fetcher_degrades_failed_nested_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/pages/{}", PAGE_HYPHENATED)))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/blocks/{}/children", PAGE_HYPHENATED)))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(json!([
            {"object": "block", "id": PARENT_BLOCK, "type": "toggle", "has_children": true,
             "toggle": {"rich_text": [{"plain_text": "Details"}]}}
        ]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/blocks/{}/children", PARENT_BLOCK)))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let repository: Arc<dyn NotionRepository> = Arc::new(client(&server));
    let fetched = NotionFetcher::new(repository)
        .fetch_page(&NotionId::parse(PAGE).unwrap())
        .await
        .unwrap();

    assert_eq!(fetched.stats.requests, 3);
    assert_eq!(fetched.stats.nested_failures, 1);
    match &fetched.blocks[0] {
        Block::Toggle(toggle) => assert!(matches!(toggle.common.children, Children::Failed { .. })),
        other => panic!("expected toggle, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_server_is_a_network_failure() {
    let token = AccessToken::new("secret_test_token").unwrap();
    let client = NotionHttpClient::with_base_url(&token, "http://127.0.0.1:9").unwrap();

    let err = client
        .retrieve_page(&NotionId::parse(PAGE).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NetworkFailure(_)));
}

#[tokio::test]
async fn imported_note_records_requested_page_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/pages/{}", PAGE_HYPHENATED)))
        .and(header("Authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/blocks/{}/children", PAGE_HYPHENATED)))
        .and(query_param("page_size", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(json!([
            {"object": "block", "id": PARENT_BLOCK, "type": "paragraph", "has_children": false,
             "paragraph": {"rich_text": [{"plain_text": "Hello"}]}}
        ]))))
        .mount(&server)
        .await;

    let store = Arc::new(FakeStore::connected());
    let connector = HttpNotionConnector::new(ValidatedUrl::parse(&server.uri()).unwrap());
    let service = NotionImport::new(store.clone(), Arc::new(connector));

    let outcome = service
        .import(ImportRequest {
            user_id: Some(USER_ID.to_string()),
            page_id: Some(PAGE.to_string()),
            project_id: Some(PROJECT_ID.to_string()),
        })
        .await
        .unwrap();

    assert_eq!(outcome.title, "Q3 Plan");
    let notes = store.notes.lock().unwrap();
    assert_eq!(notes[0].source_metadata.id, PAGE);
    assert_eq!(notes[0].content, "Hello");
}
