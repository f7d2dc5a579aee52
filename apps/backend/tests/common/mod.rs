//! Common test utilities and fixtures for integration tests.
//!
//! The router runs against the process-wide verse index, which in tests is
//! built from the bundled sample corpus (Al-Fatiha and surahs 112-114).

pub mod fixtures;

use axum::Router;
use axum_test::TestServer;

use recitation_backend::config::Config;
use recitation_backend::{build_router, AppState};

/// Test context holding the router under test.
pub struct TestContext {
    app: Router,
}

impl TestContext {
    /// Create a context with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a context with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        let state = AppState::new(config);
        Self {
            app: build_router(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Start an in-memory test server.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to start test server")
    }
}
