//! Test utilities and common fixtures

use serde_json::json;


/// JSON representation of a project as the server sends it
pub fn sample_project_json() -> serde_json::Value {
    json!({
        "name": "Demo",
        "key": "DEMO",
        "id": 7,
        "description": "a demo project",
        "type": "NORMAL",
        "public": false
    })
}

/// JSON representation of the paged projects listing
pub fn sample_project_page_json() -> serde_json::Value {
    json!({
        "size": 1,
        "limit": 25,
        "isLastPage": true,
        "start": 0,
        "values": [sample_project_json()]
    })
}

/// Mock HTTP server wrapper for integration tests
pub struct MockServer {
    pub server: wiremock::MockServer,
}

impl MockServer {
    /// Start a new mock server
    pub async fn start() -> Self {
        let server = wiremock::MockServer::start().await;
        Self { server }
    }

    /// Get the base URL of the mock server
    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    /// Create a test config pointing to this mock server
    pub fn test_config(&self) -> crate::config::ClientConfig {
        crate::config::ClientConfig::new(
            self.base_url(),
            crate::auth::Credentials::basic("dGVzdDp0ZXN0"),
        )
    }
}
