//! Folder index administration and scheduled jobs.

use std::sync::Arc;

use http::StatusCode;
use trackhub_database::FolderIndexStore;
use trackhub_worker::jobs::FolderIndexJobHandler;
use trackhub_worker::{JobExecutor, JobRequest};

use crate::helpers::{self, TestApp, strings};

#[tokio::test]
async fn test_rebuild_endpoint_is_idempotent() {
    let app = TestApp::new();
    app.seed("POOL", &["/POOL/2025/JAN/a.mp3", "/POOL/2025/b.mp3"])
        .await;

    let first = app.post("/api/admin/folder-index/rebuild").await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.data()["folders_written"], 3);
    assert_eq!(first.data()["failed_batches"], 0);

    let before = app.state.stores.folders.find_children(None, "/POOL").await.unwrap();
    let second = app.post("/api/admin/folder-index/rebuild?collection=POOL").await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.data()["stale_removed"], 0);
    let after = app.state.stores.folders.find_children(None, "/POOL").await.unwrap();

    assert_eq!(before.len(), after.len());
    assert_eq!(before[0].direct_track_count, after[0].direct_track_count);
    assert_eq!(app.state.stores.folders.count(None).await.unwrap(), 3);
}

#[tokio::test]
async fn test_concurrent_rebuild_is_rejected() {
    let app = TestApp::new();
    let _running = app.state.builder.hold().await;

    let response = app.post("/api/admin/folder-index/rebuild").await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_verify_detects_stale_index() {
    let app = TestApp::new();
    app.seed("POOL", &["/POOL/2025/JAN/a.mp3"]).await;
    app.rebuild().await;
    app.seed("POOL", &["/POOL/2025/MAR/b.mp3"]).await;

    let audit = app.get("/api/admin/folder-index/verify?path=/POOL/2025").await;
    assert_eq!(audit.status, StatusCode::OK);
    assert_eq!(strings(&audit.data()["missing_from_index"]), vec!["MAR"]);

    // Not an error for the navigator: MAR is simply not listed yet.
    let listing = app.get("/api/browse?path=/POOL/2025/MAR").await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.data()["files"].as_array().unwrap().len(), 1);

    app.rebuild().await;
    let audit = app.get("/api/admin/folder-index/verify?path=/POOL/2025").await;
    assert!(strings(&audit.data()["missing_from_index"]).is_empty());
}

#[tokio::test]
async fn test_mixed_content_report() {
    let app = TestApp::new();
    app.seed("RETRO", &["/80s/hidden.mp3", "/80s/Pop/a.mp3", "/90s/b.mp3"])
        .await;
    app.rebuild().await;

    let mixed = app.get("/api/admin/folder-index/mixed").await;
    let paths: Vec<&str> = mixed
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["full_path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["/80s"]);

    let listing = app.get("/api/browse?path=/80s").await;
    assert_eq!(strings(&listing.data()["folders"]), vec!["Pop"]);
    assert!(listing.data()["files"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_rebuild_with_unreachable_store() {
    let app = TestApp::with_stores(helpers::offline_stores());
    let response = app.post("/api/admin/folder-index/rebuild").await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_scheduled_job_rebuilds_index() {
    let app = TestApp::new();
    app.seed("POOL", &["/POOL/2025/JAN/a.mp3"]).await;

    let mut executor = JobExecutor::new();
    executor.register(Arc::new(FolderIndexJobHandler::new(app.state.builder.clone())));
    let result = executor
        .execute(&JobRequest::new("folder_index_rebuild", serde_json::json!({})))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(result["folders_written"], 3);
    let listing = app.get("/api/browse?path=/POOL").await;
    assert_eq!(strings(&listing.data()["folders"]), vec!["2025"]);
}
