//! Directory browsing over HTTP.

use http::StatusCode;

use crate::helpers::{self, TestApp, strings};

const POOL: &[&str] = &[
    "/POOL/2025/JAN/track1.mp3",
    "/POOL/2025/JAN/track2.mp3",
    "/POOL/2025/FEB/track3.mp3",
];

#[tokio::test]
async fn test_pool_scenario() {
    let app = TestApp::new();
    app.seed("POOL", POOL).await;
    let report = app.rebuild().await;
    assert_eq!(report.folders_written, 4);

    let year = app.get("/api/browse?path=/POOL/2025").await;
    assert_eq!(year.status, StatusCode::OK);
    assert_eq!(strings(&year.data()["folders"]), vec!["FEB", "JAN"]);
    assert!(year.data()["files"].as_array().unwrap().is_empty());
    assert_eq!(year.data()["parent"], "/POOL");

    let month = app.get("/api/browse?path=/POOL/2025/JAN/").await;
    assert_eq!(month.status, StatusCode::OK);
    assert_eq!(month.data()["path"], "/POOL/2025/JAN");
    assert!(strings(&month.data()["folders"]).is_empty());
    let files: Vec<&str> = month.data()["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["display_name"].as_str().unwrap())
        .collect();
    assert_eq!(files, vec!["track1", "track2"]);

    let crumbs = month.data()["breadcrumbs"].as_array().unwrap();
    assert_eq!(crumbs.len(), 3);
    assert_eq!(crumbs[2]["path"], "/POOL/2025/JAN");
}

#[tokio::test]
async fn test_root_and_unknown_paths() {
    let app = TestApp::new();
    app.seed("POOL", POOL).await;
    app.seed("RETRO", &["/80s/Italo/a.mp3"]).await;
    app.rebuild().await;

    let root = app.get("/api/browse").await;
    assert_eq!(strings(&root.data()["folders"]), vec!["80s", "POOL"]);
    assert!(root.data()["parent"].is_null());

    let scoped = app.get("/api/browse?path=/&collection=RETRO").await;
    assert_eq!(strings(&scoped.data()["folders"]), vec!["80s"]);

    let missing = app.get("/api/browse?path=/nowhere/at/all").await;
    assert_eq!(missing.status, StatusCode::OK);
    assert!(strings(&missing.data()["folders"]).is_empty());
    assert!(missing.data()["files"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_numeric_folders_sort_by_value() {
    let app = TestApp::new();
    app.seed("P", &["/Y/10/a.mp3", "/Y/2/b.mp3", "/Y/01/c.mp3", "/Y/Best Collection/d.mp3"])
        .await;
    app.rebuild().await;

    let listing = app.get("/api/browse?path=/Y").await;
    assert_eq!(
        strings(&listing.data()["folders"]),
        vec!["Best Collection", "01", "2", "10"]
    );
}

#[tokio::test]
async fn test_encoded_path_segments() {
    let app = TestApp::new();
    app.seed("P", &["/DJ%20Packs/Vol%201/a.mp3"]).await;
    app.rebuild().await;

    let listing = app.get("/api/browse?path=/DJ%20Packs").await;
    assert_eq!(strings(&listing.data()["folders"]), vec!["Vol 1"]);
}

#[tokio::test]
async fn test_unreachable_store_is_503() {
    let app = TestApp::with_stores(helpers::offline_stores());

    let response = app.get("/api/browse?path=/POOL").await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["error"], "SOURCE_UNAVAILABLE");
}
