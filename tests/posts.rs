//! Post endpoint tests against a wiremock Interacta API.

use interactapi::{
    find_post_by_exact_title, find_post_by_title, Create, Delete, Get, InteractaClient,
    InteractaError, List, Post, PostDetail, PostListQuery, PostParams, Settings,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMMUNITY_LIST: &str = "/portal/api/external/v2/communication/posts/data/community-list/1142";

fn client(server: &MockServer) -> InteractaClient {
    let mut client = InteractaClient::new(Settings::new(&server.uri())).unwrap();
    client.set_access_token("test-token");
    client
}

#[tokio::test]
async fn test_list_all_follows_page_tokens() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMMUNITY_LIST))
        .and(body_partial_json(json!({"pageToken": "page-2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 3, "title": "Third"}],
            "nextPageToken": null,
            "totalItemsCount": 3
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(COMMUNITY_LIST))
        .and(body_partial_json(json!({"pageToken": null})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 1, "title": "First"}, {"id": 2, "title": "Second"}],
            "nextPageToken": "page-2",
            "totalItemsCount": 3
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let posts = Post::list_all(&client(&mock_server), 1142, &PostListQuery::default())
        .await
        .unwrap();

    let ids: Vec<u64> = posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_empty_page_token_ends_listing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMMUNITY_LIST))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 1, "title": "Only"}],
            "nextPageToken": ""
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let posts = Post::list_all(&client(&mock_server), 1142, &PostListQuery::default())
        .await
        .unwrap();
    assert_eq!(posts.len(), 1);
}

#[tokio::test]
async fn test_list_page_sends_title_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMMUNITY_LIST))
        .and(body_partial_json(json!({"title": "printer", "pageSize": 15})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 1, "title": "Printer broken"}],
            "nextPageToken": "more"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = Post::list_page(
        &client(&mock_server),
        1142,
        &PostListQuery::with_title("printer"),
    )
    .await
    .unwrap();

    assert_eq!(page.len(), 1);
    assert!(page.has_more());
    assert_eq!(page.raw().status.as_u16(), 200);
}

#[tokio::test]
async fn test_find_post_by_title() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMMUNITY_LIST))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": 1, "title": "Printer broken"},
                {"id": 2, "title": "Printer broken again"},
                {"id": 3, "title": "Scanner"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);

    let post = find_post_by_title(&client, 1142, "scanner").await.unwrap();
    assert_eq!(post.id, 3);

    let err = find_post_by_title(&client, 1142, "printer").await.unwrap_err();
    assert!(matches!(err, InteractaError::MultipleObjectsFound(_)));
    assert_eq!(
        err.to_string(),
        "2 objects match post with 'printer' in title in Interacta"
    );

    let post = find_post_by_exact_title(&client, 1142, "PRINTER BROKEN")
        .await
        .unwrap();
    assert_eq!(post.id, 1);

    let err = find_post_by_exact_title(&client, 1142, "fax").await.unwrap_err();
    assert!(matches!(err, InteractaError::ObjectNotFound(_)));
    assert_eq!(err.to_string(), "post with title 'fax' not found in Interacta");
}

#[tokio::test]
async fn test_post_detail_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/portal/api/external/v2/communication/posts/data/post-detail-by-id/99",
        ))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = PostDetail::get(&client(&mock_server), 99).await.unwrap_err();
    assert!(matches!(err, InteractaError::ObjectNotFound(_)));
    assert_eq!(err.to_string(), "post 99 not found in Interacta");
}

#[tokio::test]
async fn test_server_error_keeps_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/portal/api/external/v2/communication/posts/data/post-detail-by-id/5",
        ))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let err = PostDetail::get(&client(&mock_server), 5).await.unwrap_err();
    match err {
        InteractaError::Response(raw) => {
            assert_eq!(raw.status.as_u16(), 500);
            assert_eq!(raw.body, "boom");
        }
        other => panic!("Expected Response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unparsable_body_is_schema_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/portal/api/external/v2/communication/posts/data/post-detail-by-id/6",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"title": "no id"})))
        .mount(&mock_server)
        .await;

    let err = PostDetail::get(&client(&mock_server), 6).await.unwrap_err();
    assert!(matches!(err, InteractaError::SchemaValidation { .. }));
}

#[tokio::test]
async fn test_create_and_delete_post() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(
            "/portal/api/external/v2/communication/posts/manage/create-post/1142",
        ))
        .and(body_partial_json(json!({"title": "New ticket"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "postId": 77,
            "nextOccToken": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(
            "/portal/api/external/v2/communication/posts/manage/delete-post/77",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let params = PostParams {
        title: "New ticket".to_string(),
        ..Default::default()
    };

    let created = Post::create(&client, 1142, &params).await.unwrap();
    assert_eq!(created.post_id, 77);
    assert_eq!(created.next_occ_token, Some(1));

    Post::delete(&client, created.post_id).await.unwrap();
}

#[tokio::test]
async fn test_call_before_login() {
    let mock_server = MockServer::start().await;
    let client = InteractaClient::new(Settings::new(&mock_server.uri())).unwrap();

    let err = PostDetail::get(&client, 1).await.unwrap_err();
    assert!(matches!(err, InteractaError::NotAuthenticated));
}
