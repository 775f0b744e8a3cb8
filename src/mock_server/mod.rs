//! Mock Interacta API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Interacta
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server keeps state across requests: a post
//! created through the client can be fetched, listed and deleted again.
//!
//! # Example
//!
//! ```ignore
//! use interactapi::mock_server::MockServer;
//! use interactapi::{Get, InteractaClient, PostDetail, Settings};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let settings = Settings::new(server.url()).with_credentials("admin", "secret");
//!     let mut client = InteractaClient::new(settings).unwrap();
//!     client.login().await.unwrap();
//!
//!     // Server comes with default fixtures
//!     let post = PostDetail::get(&client, 1).await.unwrap();
//!     assert_eq!(post.title, "Printer broken on floor 2");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
