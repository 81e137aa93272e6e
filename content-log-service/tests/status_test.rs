mod common;

use common::{MemoryStore, StaticConnector, TestApp, COLLECTION};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;

#[tokio::test]
async fn status_reports_collections_on_both_paths() {
    let app = TestApp::spawn(Arc::new(MemoryStore::new(&[COLLECTION]))).await;
    let client = Client::new();

    for path in ["/status", "/example"] {
        let response = client
            .get(app.url(path))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(
            body,
            json!({ "status": "success", "environment": "test", "collections": [COLLECTION] })
        );
    }

    assert_eq!(app.connector.attempts(), 1);
}

#[tokio::test]
async fn status_failure_hides_detail_in_generic_mode() {
    let app = TestApp::spawn_with(StaticConnector::refusing(), "generic").await;

    let response = Client::new()
        .get(app.url("/status"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Failed to fetch data");
    assert_eq!(body["details"], "Internal Server Error");
    assert_eq!(body["environment"], "test");
}

#[tokio::test]
async fn status_failure_detail_is_masked_in_verbose_mode() {
    let app = TestApp::spawn_with(StaticConnector::refusing(), "verbose").await;

    let response = Client::new()
        .get(app.url("/example"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    let details = body["details"].as_str().expect("details should be a string");
    assert!(details.contains("db.internal"));
    assert!(!details.contains("user"));
    assert!(!details.contains("pass"));
}
