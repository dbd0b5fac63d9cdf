//! Shared test helpers for integration tests.

use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use trackhub_api::{AppState, build_app};
use trackhub_core::config::AppConfig;
use trackhub_core::error::AppError;
use trackhub_core::result::AppResult;
use trackhub_core::types::ScanRange;
use trackhub_database::{PathRecordStore, Stores};
use trackhub_entity::track::{CollectionSummary, NewPathRecord, PathRecord};
use trackhub_service::{BuildReport, ListingImporter};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for driving services directly
    pub state: AppState,
}

impl TestApp {
    /// Fresh application over empty in-memory stores
    pub fn new() -> Self {
        Self::with_stores(Stores::memory())
    }

    /// Application over the given stores
    pub fn with_stores(stores: Stores) -> Self {
        let config = AppConfig::default();
        let state = AppState::new(config.clone(), stores);
        let router = build_app(state.clone(), &config.server.cors);
        Self { router, state }
    }

    /// Import paths into a collection
    pub async fn seed(&self, collection: &str, paths: &[&str]) {
        let importer = ListingImporter::new(self.state.stores.records.clone(), 100);
        let report = importer
            .import(collection, paths.iter().copied())
            .await
            .expect("Failed to seed records");
        assert_eq!(report.failed_batches, 0);
    }

    /// Rebuild the whole folder index
    pub async fn rebuild(&self) -> BuildReport {
        self.state
            .builder
            .build_index(None)
            .await
            .expect("Failed to rebuild folder index")
    }

    /// Send a request and parse the JSON body
    pub async fn request(&self, method: &str, uri: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request("GET", uri).await
    }

    pub async fn post(&self, uri: &str) -> TestResponse {
        self.request("POST", uri).await
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

/// String array at `value`
pub fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Record store whose every call fails, standing in for an outage
#[derive(Debug)]
pub struct OfflineRecords;

fn offline<T>() -> AppResult<T> {
    Err(AppError::database("could not connect to server"))
}

#[async_trait]
impl PathRecordStore for OfflineRecords {
    async fn fetch_range(&self, _: Option<&str>, _: ScanRange) -> AppResult<Vec<PathRecord>> {
        offline()
    }
    async fn find_direct_children(&self, _: Option<&str>, _: &str) -> AppResult<Vec<PathRecord>> {
        offline()
    }
    async fn first_path_from(
        &self,
        _: Option<&str>,
        _: &str,
        _: Bound<&str>,
    ) -> AppResult<Option<String>> {
        offline()
    }
    async fn search_by_name(
        &self,
        _: Option<&str>,
        _: &str,
        _: u64,
    ) -> AppResult<Vec<PathRecord>> {
        offline()
    }
    async fn list_collections(&self) -> AppResult<Vec<CollectionSummary>> {
        offline()
    }
    async fn upsert_batch(&self, _: &[NewPathRecord]) -> AppResult<u64> {
        offline()
    }
}

/// Stores whose record side is offline
pub fn offline_stores() -> Stores {
    Stores {
        records: Arc::new(OfflineRecords),
        folders: Stores::memory().folders,
    }
}
