//! Interacta API client library.
//!
//! A Rust library for interacting with the Interacta REST API using a
//! trait-based architecture where each operation (Get, List, Create,
//! Update, Delete) is defined as a trait that entity types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use interactapi::{InteractaClient, List, Post, PostListQuery};
//!
//! #[tokio::main]
//! async fn main() -> interactapi::Result<()> {
//!     // Settings from INTERACTA_* environment variables
//!     let mut client = InteractaClient::from_env()?;
//!     client.login().await?;
//!
//!     // First page of a community's posts
//!     let page = Post::list_page(&client, 1142, &PostListQuery::default()).await?;
//!     println!("{} posts on the first page", page.len());
//!
//!     // Every post whose title contains "printer"
//!     let posts = Post::list_all(&client, 1142, &PostListQuery::with_title("printer")).await?;
//!     println!("Found {} posts", posts.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`Get`] - Fetch a single entity by id
//! - [`List`] - Fetch cursor-paginated collections
//! - [`Create`], [`Update`], [`Delete`] - Manage entities
//!
//! Every call returns a typed response: [`ApiResponse`] derefs to the parsed
//! body and keeps the [`RawResponse`] around for inspection.
//!
//! # Configuration
//!
//! [`Settings`] come from a TOML file or from environment variables:
//!
//! - `INTERACTA_BASE_URL` (required) - Portal URL, `/portal/api/` is appended
//! - `INTERACTA_USERNAME` / `INTERACTA_PASSWORD` - Credential login
//! - `INTERACTA_SERVICE_ACCOUNT_FILE` - Service-account key file (takes precedence)
//! - `INTERACTA_LOG_API_CALLS` - Log every call at info level

pub mod auth;
pub mod cli;
mod client;
mod config;
mod error;
mod models;
pub mod output;
mod pagination;
mod response;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::InteractaClient;
pub use config::{
    CommunitySettings, Settings, DEFAULT_TIMEOUT, ENV_BASE_URL, ENV_LOG_API_CALLS, ENV_PASSWORD,
    ENV_SERVICE_ACCOUNT_FILE, ENV_USERNAME,
};
pub use error::{InteractaError, Result};
pub use pagination::{collect_all, Page, PageRequest, Pagination, DEFAULT_PAGE_SIZE};
pub use response::{ApiResponse, FromResponse, RawResponse};

// Re-export traits
pub use output::PrettyPrint;
pub use traits::{Create, Delete, Get, List, Update};

// Re-export authentication
pub use auth::{build_login_request, KeyId, LoginRequest, ServiceAccount};

// Re-export models and their convenience functions
pub use models::*;
