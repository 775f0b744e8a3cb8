//! E2E tests using the mock Interacta server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use interactapi::mock_server::{Fixtures, MockServer, MockState};
use interactapi::{
    all_users, find_group_by_name, find_post_by_title, Create, Delete, Get, InteractaClient,
    InteractaError, List, Post, PostDetail, PostListQuery, PostParams, Settings, UserListQuery,
    UserStats,
};

async fn logged_in(server: &MockServer) -> InteractaClient {
    let settings = Settings::new(server.url()).with_credentials("admin", "secret");
    let mut client = InteractaClient::new(settings).unwrap();
    client.login().await.unwrap();
    client
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    let result = reqwest::Client::new()
        .get(format!("{}/health", url))
        .send()
        .await;
    assert!(result.is_err());
}

// =============================================================================
// Login Tests
// =============================================================================

#[tokio::test]
async fn test_service_account_login() {
    let server = MockServer::start().await;
    let account = interactapi::ServiceAccount::from_file(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/service_account.json"
    ))
    .unwrap();
    let settings = Settings::new(server.url()).with_service_account(account);
    let mut client = InteractaClient::new(settings).unwrap();

    let token = client.login().await.unwrap();
    assert_eq!(token, "mock-access-token");

    let post = PostDetail::get(&client, 2).await.unwrap();
    assert_eq!(post.title, "VPN access request");

    server.shutdown().await;
}

#[tokio::test]
async fn test_stale_token_is_unauthorized() {
    let server = MockServer::start().await;
    let mut client = logged_in(&server).await;
    client.set_access_token("expired");

    let err = PostDetail::get(&client, 1).await.unwrap_err();
    assert!(err.is_unauthorized());

    // Logging in again recovers
    client.login().await.unwrap();
    assert!(PostDetail::get(&client, 1).await.is_ok());

    server.shutdown().await;
}

// =============================================================================
// Post Workflows
// =============================================================================

#[tokio::test]
async fn test_list_all_posts_across_pages() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    let mut query = PostListQuery::default();
    query.pagination.page_size = 1;

    let first = Post::list_page(&client, 1142, &query).await.unwrap();
    assert_eq!(first.len(), 1);
    assert!(first.has_more());

    let all = Post::list_all(&client, 1142, &query).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|p| p.community_id == 1142));

    server.shutdown().await;
}

#[tokio::test]
async fn test_create_find_and_delete_post() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    let params = PostParams {
        title: "Coffee machine leaking".to_string(),
        description: Some("Water all over the kitchen".to_string()),
        ..Default::default()
    };
    let created = Post::create(&client, 1142, &params).await.unwrap();

    let found = find_post_by_title(&client, 1142, "coffee").await.unwrap();
    assert_eq!(found.id, created.post_id);

    Post::delete(&client, created.post_id).await.unwrap();

    let err = PostDetail::get(&client, created.post_id).await.unwrap_err();
    assert!(matches!(err, InteractaError::ObjectNotFound(_)));

    server.shutdown().await;
}

#[tokio::test]
async fn test_find_post_on_empty_server() {
    let server = MockServer::start_empty().await;
    let client = logged_in(&server).await;

    let err = find_post_by_title(&client, 1142, "anything").await.unwrap_err();
    assert!(matches!(err, InteractaError::ObjectNotFound(_)));

    server.shutdown().await;
}

// =============================================================================
// Directory Workflows
// =============================================================================

#[tokio::test]
async fn test_user_stats_over_default_users() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    let users = all_users(&client, None).await.unwrap();
    let stats = UserStats::from_users(&users);
    assert_eq!(stats.ids.len(), 5);
    assert_eq!(stats.blocked, vec![13]);
    assert_eq!(stats.deleted, vec![14]);
    assert_eq!(stats.active.len(), 3);

    let divergent: Vec<u64> = users
        .iter()
        .filter(|u| !u.divergent_provider_accounts().is_empty())
        .map(|u| u.id)
        .collect();
    assert_eq!(divergent, vec![15]);

    let active = all_users(
        &client,
        Some(UserListQuery {
            status_filter: Some(vec![0]),
            ..Default::default()
        }),
    )
    .await
    .unwrap();
    assert_eq!(active.len(), 3);

    server.shutdown().await;
}

#[tokio::test]
async fn test_find_group_skips_deleted() {
    let state = MockState::new()
        .with_group(Fixtures::group(1, "Help Desk", 4))
        .with_group({
            let mut old = Fixtures::group(2, "Help Desk", 0);
            old.deleted = true;
            old
        });
    let server = MockServer::with_state(state).await;
    let client = logged_in(&server).await;

    let group = find_group_by_name(&client, "Help Desk", None).await.unwrap();
    assert_eq!(group.id, 1);

    server.shutdown().await;
}

#[tokio::test]
async fn test_state_changes_are_visible() {
    let server = MockServer::start_empty().await;
    let client = logged_in(&server).await;

    server
        .state()
        .write()
        .await
        .posts
        .insert(5, Fixtures::minimal_post(5, 1142, "Injected"));

    let post = PostDetail::get(&client, 5).await.unwrap();
    assert_eq!(post.title, "Injected");

    server.shutdown().await;
}
