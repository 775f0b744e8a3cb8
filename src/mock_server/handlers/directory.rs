//! User and group listing handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tokio::sync::RwLock;

use super::{check_auth, ListBody};
use crate::mock_server::state::{paginate, MockState};

/// POST .../admin/data/users
pub async fn list_users(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Json(body): Json<ListBody>,
) -> impl IntoResponse {
    let state = state.read().await;
    if let Err(rejection) = check_auth(&state, &headers) {
        return rejection;
    }

    let users = state.list_users(body.full_text_filter.as_deref(), body.status_filter.as_deref());
    (StatusCode::OK, Json(paginate(users, &body.pagination))).into_response()
}

/// POST .../admin/data/groups
pub async fn list_groups(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Json(body): Json<ListBody>,
) -> impl IntoResponse {
    let state = state.read().await;
    if let Err(rejection) = check_auth(&state, &headers) {
        return rejection;
    }

    let groups = state.list_groups(body.full_text_filter.as_deref(), body.status_filter.as_deref());
    (StatusCode::OK, Json(paginate(groups, &body.pagination))).into_response()
}
