//! Common test utilities for E2E testing with mocks.
//!
//! Builds the real router in-process with a mock provider and an in-memory
//! store injected, so the full HTTP surface can be exercised without
//! external infrastructure.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use cineshelf_core::testing::{MemoryStore, MockProvider};
use cineshelf_core::{load_config_from_str, CatalogStore, MetadataProvider};
use cineshelf_server::api::create_router;
use cineshelf_server::state::AppState;

/// Re-export fixtures for test convenience
pub use cineshelf_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
///
/// Provides an in-process router with fully controllable collaborators:
/// - Metadata provider (MockProvider)
/// - Catalog store (MemoryStore)
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock provider - configure upstream records and failures
    pub provider: Arc<MockProvider>,
    /// In-memory store - seed or inspect cached rows
    pub store: Arc<MemoryStore>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with empty mocks.
    pub fn new() -> Self {
        let provider = Arc::new(MockProvider::new());
        let store = Arc::new(MemoryStore::new());

        let config = load_config_from_str(
            r#"
[tmdb]
bearer_token = "test-token"

[server]
host = "127.0.0.1"
port = 0
"#,
        )
        .expect("Failed to build test config");

        let state = Arc::new(AppState::new(
            config,
            Arc::clone(&store) as Arc<dyn CatalogStore>,
            Arc::clone(&provider) as Arc<dyn MetadataProvider>,
        ));

        let router = create_router(state);

        Self {
            router,
            provider,
            store,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let text = String::from_utf8_lossy(&bytes).to_string();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body, text }
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
