//! Login endpoint handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::error_response;
use crate::mock_server::state::MockState;

/// Body of the credential login.
#[derive(Debug, Deserialize)]
pub struct CredentialsBody {
    pub username: String,
    pub password: String,
}

/// Body of the service-account login.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBody {
    pub jwt_assertion: String,
}

/// POST /portal/api/auth/internal/login/credentials
pub async fn login_credentials(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(body): Json<CredentialsBody>,
) -> impl IntoResponse {
    let state = state.read().await;

    if body.username == state.username && body.password == state.password {
        (
            StatusCode::OK,
            Json(serde_json::json!({ "accessToken": state.access_token })),
        )
            .into_response()
    } else {
        error_response(StatusCode::UNAUTHORIZED, "Invalid credentials")
    }
}

/// POST /portal/api/auth/internal/login/service
///
/// Any assertion shaped like a compact JWS is accepted; signatures are not
/// verified.
pub async fn login_service(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(body): Json<ServiceBody>,
) -> impl IntoResponse {
    let state = state.read().await;

    let parts: Vec<&str> = body.jwt_assertion.split('.').collect();
    if parts.len() == 3 && parts.iter().all(|p| !p.is_empty()) {
        (
            StatusCode::OK,
            Json(serde_json::json!({ "accessToken": state.access_token })),
        )
            .into_response()
    } else {
        error_response(StatusCode::BAD_REQUEST, "Malformed jwtAssertion")
    }
}
