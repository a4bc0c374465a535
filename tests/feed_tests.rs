use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use window_admin_lib::config::ConsoleConfig;
use window_admin_lib::feed::RefreshOutcome;
use window_admin_lib::services::ApplicationQuery;
use window_admin_lib::AdminConsole;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn console(server: &MockServer, dir: &tempfile::TempDir) -> AdminConsole {
    AdminConsole::new(ConsoleConfig {
        api_base_url: format!("{}/api", server.uri()),
        demo_login: false,
        storage_dir: Some(dir.path().to_path_buf()),
        request_timeout: None,
    })
    .unwrap()
}

fn search(text: &str) -> ApplicationQuery {
    ApplicationQuery {
        search: Some(text.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn refresh_publishes_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/application"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "demo-1"}, {"id": "demo-2"}])))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let console = console(&server, &dir);
    let feed = console.applications_feed();

    assert_eq!(feed.refresh().await, RefreshOutcome::Applied);

    let state = feed.snapshot();
    assert_eq!(state.applications.len(), 2);
    assert!(!state.is_loading);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn failed_fetch_degrades_to_empty_list_with_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/application"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "Database unavailable"})))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let console = console(&server, &dir);
    let feed = console.applications_feed();

    assert_eq!(feed.refresh().await, RefreshOutcome::Applied);

    let state = feed.snapshot();
    assert!(state.applications.is_empty());
    assert_eq!(state.error.as_deref(), Some("Database unavailable"));
    assert!(!state.is_loading);
}

#[tokio::test]
async fn stale_response_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/application"))
        .and(query_param("search", "slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": "stale"}]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/application"))
        .and(query_param("search", "fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "fresh"}])))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let console = console(&server, &dir);
    let feed = console.applications_feed();

    let slow = feed.filter(search("slow"));
    let fast = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        feed.filter(search("fast")).await
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert_eq!(slow, RefreshOutcome::Superseded);
    assert_eq!(fast, RefreshOutcome::Applied);

    let state = feed.snapshot();
    assert_eq!(state.applications, vec![json!({"id": "fresh"})]);
    assert_eq!(state.filters, search("fast"));
    assert!(!state.is_loading);
}

#[tokio::test]
async fn delete_then_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/application/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/application"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "8"}])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let console = console(&server, &dir);
    let feed = console.applications_feed();

    feed.delete("7").await.unwrap();

    let state = feed.snapshot();
    assert_eq!(state.applications, vec![json!({"id": "8"})]);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn failed_delete_records_error_and_skips_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/application/7"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not found"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/application"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let console = console(&server, &dir);
    let feed = console.applications_feed();

    let err = feed.delete("7").await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    let state = feed.snapshot();
    assert_eq!(state.error.as_deref(), Some("Not found"));
    assert!(!state.is_loading);
}

#[tokio::test]
async fn details_failure_sets_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/application/x"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/application/y"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "y"})))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let console = console(&server, &dir);
    let feed = console.applications_feed();

    assert!(feed.details("x").await.is_err());
    assert_eq!(feed.snapshot().error.as_deref(), Some("HTTP error! status: 403"));

    assert_eq!(feed.details("y").await.unwrap()["id"], "y");
    assert!(feed.snapshot().error.is_none());
}
