//! Mock Interacta API server.
//!
//! Provides an axum-based HTTP server that simulates the Interacta API.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

const API: &str = "/portal/api";
const EXTERNAL: &str = "/portal/api/external/v2";

/// A mock Interacta API server for testing.
///
/// The server runs in the background on a random local port. Point a
/// [`crate::Settings`] at [`MockServer::url`] and log in with the state's
/// credentials.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with no posts, users or groups.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "mock server stopped");
            }
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the portal URL of the mock server, without the API path.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for post in scenario.posts {
            state = state.with_post(post);
        }
        for user in scenario.users {
            state = state.with_user(user);
        }
        for group in scenario.groups {
            state = state.with_group(group);
        }

        state
    }

    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Login routes
            .route(
                &format!("{API}/auth/internal/login/credentials"),
                post(handlers::login_credentials),
            )
            .route(
                &format!("{API}/auth/internal/login/service"),
                post(handlers::login_service),
            )
            // Post routes
            .route(
                &format!("{EXTERNAL}/communication/posts/data/community-list/:community_id"),
                post(handlers::list_posts),
            )
            .route(
                &format!("{EXTERNAL}/communication/posts/data/post-detail-by-id/:post_id"),
                get(handlers::get_post),
            )
            .route(
                &format!("{EXTERNAL}/communication/posts/manage/create-post/:community_id"),
                post(handlers::create_post),
            )
            .route(
                &format!("{EXTERNAL}/communication/posts/manage/delete-post/:post_id"),
                delete(handlers::delete_post),
            )
            // Directory routes
            .route(&format!("{EXTERNAL}/admin/data/users"), post(handlers::list_users))
            .route(&format!("{EXTERNAL}/admin/data/groups"), post(handlers::list_groups))
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
