//! Search and collections over HTTP.

use http::StatusCode;

use crate::helpers::{self, TestApp};

#[tokio::test]
async fn test_collections_listing() {
    let app = TestApp::new();
    app.seed("RETRO", &["/80s/a.mp3"]).await;
    app.seed("BEATPORT", &["/BP/a.mp3", "/BP/b.mp3"]).await;

    let response = app.get("/api/collections").await;
    assert_eq!(response.status, StatusCode::OK);
    let cols = response.data().as_array().unwrap();
    assert_eq!(cols.len(), 2);
    assert_eq!(cols[0]["collection_id"], "BEATPORT");
    assert_eq!(cols[0]["track_count"], 2);
}

#[tokio::test]
async fn test_search() {
    let app = TestApp::new();
    app.seed(
        "BEATPORT",
        &["/BP/Disclosure - Latch.mp3", "/BP/Other.mp3", "/BP/100%25 Latch.mp3"],
    )
    .await;

    let hits = app.get("/api/search?q=latch").await;
    assert_eq!(hits.status, StatusCode::OK);
    assert_eq!(hits.data()["total"], 2);

    let literal = app.get("/api/search?q=100%25").await;
    assert_eq!(literal.data()["total"], 1);

    let short = app.get("/api/search?q=%20l%20").await;
    assert_eq!(short.status, StatusCode::OK);
    assert_eq!(short.data()["total"], 0);
}

#[tokio::test]
async fn test_search_unreachable_store() {
    let app = TestApp::with_stores(helpers::offline_stores());
    let response = app.get("/api/search?q=latch").await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}
