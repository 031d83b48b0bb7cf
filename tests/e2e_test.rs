//! End-to-end flow tests for podtui
//!
//! Drives the app through the real fetch worker against a mocked catalog:
//! list → search → page → detail → back, plus failure paths.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mockito::{Mock, Server, ServerGuard};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_test::assert_ok;

use podtui::api::CatalogClient;
use podtui::app::{App, AppMessage, AppState, InputMode, LoadState, DETAIL_FAILED, LIST_FAILED};
use podtui::commands::ListPage;
use podtui::fetch;
use podtui::models::QueryState;
use podtui::Route;

// =============================================================================
// Mock Response Fixtures
// =============================================================================

/// Ten shows; every one but "Garden Hour" mentions space
fn mock_catalog() -> String {
    let entries = [
        ("101", "Space Cadets", "Kids learn about rockets", "[9]"),
        ("102", "Deep Field", "A SPACE telescope diary", "[1]"),
        ("103", "Garden Hour", "Soil, seeds and patience", "[1]"),
        ("104", "Orbit Radio", "Chatter from space stations", "[4,5]"),
        ("105", "Spaceship Earth", "Climate stories", "[8]"),
        ("106", "Moon Shot", "Business lessons from the space race", "[6]"),
        ("107", "Dark Matter", "Fiction set in deep space", "[7]"),
        ("108", "Launch Window", "News from the space industry", "[8]"),
        ("109", "Star Talk Live", "Comedy in space", "[4]"),
        ("110", "Cosmic History", "The history of space flight", "[3]"),
    ];
    let shows: Vec<String> = entries
        .iter()
        .map(|(id, title, description, genres)| {
            format!(
                r#"{{"id":"{}","title":"{}","description":"{}","image":"","genres":{},"seasons":2,"updated":"2022-11-03T07:00:00.000Z"}}"#,
                id, title, description, genres
            )
        })
        .collect();
    format!("[{}]", shows.join(","))
}

fn mock_detail(id: &str, title: &str) -> String {
    format!(
        r#"{{
            "id": "{id}",
            "title": "{title}",
            "description": "Full description",
            "image": "",
            "genres": ["Featured", "History"],
            "updated": "2022-11-03T07:00:00.000Z",
            "seasons": [
                {{"season": 1, "title": "Season 1", "image": "", "episodes": [
                    {{"episode": 1, "title": "One", "description": "", "file": ""}},
                    {{"episode": 2, "title": "Two", "description": "", "file": ""}}
                ]}},
                {{"season": 2, "title": "Season 2", "image": "", "episodes": [
                    {{"episode": 1, "title": "Three", "description": "", "file": ""}}
                ]}}
            ]
        }}"#
    )
}

// =============================================================================
// Harness
// =============================================================================

struct Harness {
    app: App,
    messages: UnboundedReceiver<AppMessage>,
    _server: ServerGuard,
    _mocks: Vec<Mock>,
}

impl Harness {
    /// Wire an app to a fetch worker pointed at `server`
    fn new(page_size: usize, server: ServerGuard, mocks: Vec<Mock>) -> Self {
        let client = CatalogClient::with_base_url(server.url());

        let (app, commands) = App::with_channels();
        let app = app.with_page_size(page_size);
        let (_worker, messages) = fetch::spawn_worker(client, commands);

        Self {
            app,
            messages,
            _server: server,
            _mocks: mocks,
        }
    }

    /// Wait for `n` fetch results and apply them
    async fn pump(&mut self, n: usize) {
        for _ in 0..n {
            let message = tokio::time::timeout(Duration::from_secs(5), self.messages.recv())
                .await
                .expect("timed out waiting for fetch result")
                .expect("fetch worker stopped");
            self.app.handle_message(message);
        }
    }

    fn key(&mut self, code: KeyCode) {
        self.app.handle_key(KeyEvent::new(code, KeyModifiers::empty()));
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.key(KeyCode::Char(c));
        }
    }

    fn page_titles(&self) -> Vec<String> {
        self.app
            .list
            .page_items()
            .iter()
            .map(|s| s.title.clone())
            .collect()
    }
}

async fn catalog_mock(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(mock_catalog())
        .create_async()
        .await
}

async fn json_mock(server: &mut ServerGuard, path: &str, body: String) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_body(body)
        .create_async()
        .await
}

async fn status_mock(server: &mut ServerGuard, path: &str, status: usize) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .create_async()
        .await
}

// =============================================================================
// Flows
// =============================================================================

#[tokio::test]
async fn test_search_paginate_open_and_back() {
    let mut server = Server::new_async().await;
    let mocks = vec![
        catalog_mock(&mut server).await,
        json_mock(&mut server, "/id/110", mock_detail("110", "Cosmic History")).await,
        json_mock(
            &mut server,
            "/genre/3",
            r#"{"id":3,"title":"History","description":"Looking back","shows":["110"]}"#.to_string(),
        )
        .await,
    ];
    let mut h = Harness::new(8, server, mocks);

    h.app.start(Route::default());
    assert!(h.app.list.shows.is_loading());
    h.pump(1).await;
    assert_eq!(h.app.list.shows.ready().map(|s| s.len()), Some(10));

    // Search "space": nine matches over two pages of eight
    h.key(KeyCode::Char('/'));
    h.type_text("space");
    h.key(KeyCode::Enter);
    assert_eq!(h.app.input_mode, InputMode::Normal);
    assert_eq!(h.app.list.filtered().len(), 9);
    assert_eq!(h.app.list.total_pages(), 2);
    assert_eq!(h.page_titles().len(), 8);
    assert!(!h.page_titles().contains(&"Garden Hour".to_string()));

    h.key(KeyCode::Right);
    assert_eq!(h.app.list.query.page, 2);
    assert_eq!(h.page_titles(), vec!["Cosmic History"]);

    // Open the only show on page 2; detail and genre spotlight both load
    h.key(KeyCode::Enter);
    assert_eq!(h.app.state, AppState::Detail);
    assert_eq!(h.app.current_route(), Route::Show("110".into()));
    h.pump(2).await;

    let detail = h.app.detail.as_ref().unwrap();
    assert!(detail.show.is_ready());
    assert_eq!(detail.season, Some(1));
    assert_eq!(detail.total_episodes(), 3);
    assert_eq!(detail.spotlight.as_ref().map(|g| g.title.as_str()), Some("History"));

    h.key(KeyCode::Char(']'));
    assert_eq!(h.app.detail.as_ref().unwrap().season, Some(2));

    // Back restores search text and page without refetching
    h.key(KeyCode::Esc);
    assert_eq!(h.app.state, AppState::List);
    assert_eq!(h.app.list.query.search, "space");
    assert_eq!(h.app.list.query.page, 2);
    assert_eq!(h.page_titles(), vec!["Cosmic History"]);
    assert!(h.messages.try_recv().is_err());
}

#[tokio::test]
async fn test_cli_page_matches_list_view() {
    let mut server = Server::new_async().await;
    let mocks = vec![catalog_mock(&mut server).await];
    let mut h = Harness::new(8, server, mocks);
    h.app.start(Route::List(QueryState::new("space", None)));
    h.pump(1).await;
    h.app.list.next_page();

    let LoadState::Ready(shows) = &h.app.list.shows else {
        panic!("Expected loaded shows");
    };
    let page = ListPage::build(shows, &h.app.list.query, 8);
    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.total_matches, 9);
    let titles: Vec<_> = page.shows.iter().map(|s| s.title.clone()).collect();
    assert_eq!(titles, h.page_titles());
}

#[tokio::test]
async fn test_genre_spotlight_failure_keeps_detail() {
    let mut server = Server::new_async().await;
    let mocks = vec![
        catalog_mock(&mut server).await,
        json_mock(&mut server, "/id/104", mock_detail("104", "Orbit Radio")).await,
        status_mock(&mut server, "/genre/4", 500).await,
    ];
    let mut h = Harness::new(8, server, mocks);

    h.app.start(Route::default());
    h.pump(1).await;
    h.app.open_show("104");
    h.pump(2).await;

    let detail = h.app.detail.as_ref().unwrap();
    assert!(detail.show.is_ready());
    assert!(detail.spotlight.is_none());
}

#[tokio::test]
async fn test_detail_failure_then_retry() {
    let mut server = Server::new_async().await;
    let mocks = vec![
        catalog_mock(&mut server).await,
        status_mock(&mut server, "/id/999", 502).await,
    ];
    let mut h = Harness::new(8, server, mocks);

    h.app.start(Route::Show("999".into()));
    // List and detail load concurrently; no preview known so no spotlight
    h.pump(2).await;

    let detail = h.app.detail.as_ref().unwrap();
    assert_eq!(detail.show.error(), Some(DETAIL_FAILED));
    assert!(detail.spotlight_request.is_none());

    h.key(KeyCode::Char('r'));
    assert!(h.app.detail.as_ref().unwrap().show.is_loading());
    h.pump(1).await;
    assert!(h.app.detail.as_ref().unwrap().show.is_failed());

    // Opened directly on a show: back lands on the default list
    h.key(KeyCode::Backspace);
    assert_eq!(h.app.state, AppState::List);
    assert_eq!(h.app.list.query, QueryState::default());
}

#[tokio::test]
async fn test_list_failure_and_reload() {
    let mut server = Server::new_async().await;
    let mocks = vec![status_mock(&mut server, "/", 500).await];
    let mut h = Harness::new(8, server, mocks);

    h.app.start(Route::default());
    h.pump(1).await;
    assert_eq!(h.app.list.shows.error(), Some(LIST_FAILED));

    h.key(KeyCode::Char('r'));
    assert!(h.app.list.shows.is_loading());
    h.pump(1).await;
    assert!(h.app.list.shows.is_failed());
}

#[tokio::test]
async fn test_worker_feeds_fresh_results_only() {
    let mut server = Server::new_async().await;
    let mocks = vec![catalog_mock(&mut server).await];
    let mut h = Harness::new(8, server, mocks);

    // Two reloads back to back: the first response is either aborted or stale
    h.app.start(Route::default());
    h.app.reload();
    let latest = h.app.list.request;

    let message = tokio::time::timeout(Duration::from_secs(5), h.messages.recv())
        .await
        .expect("timed out waiting for fetch result")
        .expect("fetch worker stopped");
    let AppMessage::ShowsLoaded { request, result } = message.clone() else {
        panic!("Expected ShowsLoaded");
    };
    assert_ok!(&result);
    h.app.handle_message(message);

    if request == latest {
        assert!(h.app.list.shows.is_ready());
    } else {
        assert!(h.app.list.shows.is_loading());
        h.pump(1).await;
        assert!(h.app.list.shows.is_ready());
    }
}
