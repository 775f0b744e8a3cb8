//! Post endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tokio::sync::RwLock;

use super::{check_auth, error_response, ListBody};
use crate::mock_server::state::{paginate, MockState};
use crate::{PostCreated, PostParams};

/// POST .../communication/posts/data/community-list/{community_id}
pub async fn list_posts(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(community_id): Path<u64>,
    headers: HeaderMap,
    Json(body): Json<ListBody>,
) -> impl IntoResponse {
    let state = state.read().await;
    if let Err(rejection) = check_auth(&state, &headers) {
        return rejection;
    }

    let posts: Vec<_> = state
        .list_posts(community_id, body.title.as_deref())
        .into_iter()
        .map(|p| p.post)
        .collect();

    (StatusCode::OK, Json(paginate(posts, &body.pagination))).into_response()
}

/// GET .../communication/posts/data/post-detail-by-id/{post_id}
pub async fn get_post(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(post_id): Path<u64>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let state = state.read().await;
    if let Err(rejection) = check_auth(&state, &headers) {
        return rejection;
    }

    match state.posts.get(&post_id) {
        Some(post) => (StatusCode::OK, Json(post.clone())).into_response(),
        None => error_response(StatusCode::NOT_FOUND, &format!("No post with id {post_id}")),
    }
}

/// POST .../communication/posts/manage/create-post/{community_id}
pub async fn create_post(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(community_id): Path<u64>,
    headers: HeaderMap,
    Json(params): Json<PostParams>,
) -> impl IntoResponse {
    let mut state = state.write().await;
    if let Err(rejection) = check_auth(&state, &headers) {
        return rejection;
    }

    let post = state.create_post(community_id, params);
    let created = PostCreated {
        post_id: post.id,
        next_occ_token: Some(1),
        post_data: Some(post),
    };
    (StatusCode::OK, Json(created)).into_response()
}

/// DELETE .../communication/posts/manage/delete-post/{post_id}
pub async fn delete_post(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(post_id): Path<u64>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let mut state = state.write().await;
    if let Err(rejection) = check_auth(&state, &headers) {
        return rejection;
    }

    match state.delete_post(post_id) {
        Some(_) => (StatusCode::OK, Json(serde_json::json!({}))).into_response(),
        None => error_response(StatusCode::NOT_FOUND, &format!("No post with id {post_id}")),
    }
}
