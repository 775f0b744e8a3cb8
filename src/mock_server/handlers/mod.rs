//! HTTP request handlers for the mock server.

pub mod auth;
pub mod directory;
pub mod posts;

pub use auth::*;
pub use directory::*;
pub use posts::*;

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::mock_server::state::MockState;
use crate::Pagination;

/// Body shared by the paged list endpoints; unknown filters are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBody {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub title: Option<String>,
    pub full_text_filter: Option<String>,
    pub status_filter: Option<Vec<i32>>,
}

/// Reject calls without the bearer token handed out on login.
pub(crate) fn check_auth(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if state.is_authorized(header) {
        Ok(())
    } else {
        Err(error_response(StatusCode::UNAUTHORIZED, "Missing or invalid access token"))
    }
}

pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "errorCode": status.as_u16(),
            "message": message
        })),
    )
        .into_response()
}
