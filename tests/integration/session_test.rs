//! Navigation sessions over a shared navigator.

use std::sync::Arc;

use trackhub_service::BrowseSession;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_session_walks_the_tree() {
    let app = TestApp::new();
    app.seed(
        "POOL",
        &["/POOL/2025/JAN/track1.mp3", "/POOL/2025/FEB/track3.mp3"],
    )
    .await;
    app.rebuild().await;

    let session = BrowseSession::new(Arc::clone(&app.state.navigator), Some("POOL".into()));

    let root = session.home().await.unwrap().unwrap();
    assert_eq!(root.folders, vec!["POOL"]);

    session.open("POOL").await.unwrap();
    let year = session.open("2025").await.unwrap().unwrap();
    assert_eq!(year.folders, vec!["FEB", "JAN"]);

    let month = session.open("JAN").await.unwrap().unwrap();
    assert_eq!(month.files.len(), 1);
    let crumbs: Vec<String> = session
        .breadcrumbs()
        .await
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(crumbs, vec!["POOL", "2025", "JAN"]);

    let back = session.up().await.unwrap().unwrap();
    assert_eq!(back.path, "/POOL/2025");
    assert_eq!(session.current_path().await, "/POOL/2025");
}
