//! Community posts.

use std::ops::Deref;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{serde_as, DefaultOnNull};

use crate::client::InteractaClient;
use crate::error::{InteractaError, Result};
use crate::models::common::{exactly_one, external_path};
use crate::models::hashtag::Hashtag;
use crate::models::user::User;
use crate::pagination::{Page, PageRequest, Pagination};
use crate::response::{ApiResponse, RawResponse};
use crate::traits::{Create, Delete, Get, List, Update};

/// A post as returned by the community listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    #[serde(default)]
    pub community_id: u64,
    #[serde(default)]
    pub custom_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description_plain_text: Option<String>,
    /// 0 public, 1 private.
    #[serde(default)]
    pub visibility: Option<i32>,
    #[serde(default)]
    pub announcement: Option<bool>,
    #[serde(default)]
    pub workflow_state_description: Option<String>,
    /// Custom field values keyed by field id.
    #[serde(default)]
    pub custom_data: Option<Value>,
    #[serde(default)]
    pub creator_user: Option<User>,
    #[serde(default)]
    pub creation_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_modify_user: Option<User>,
    #[serde(default)]
    pub last_modify_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub watchers_count: Option<u32>,
    #[serde(default)]
    pub comments_count: Option<u32>,
    #[serde(default)]
    pub likes_count: Option<u32>,
    #[serde(default)]
    pub views_count: Option<u32>,
}

impl Post {
    /// Title matching used by [`find_post_by_title`]: case-insensitive
    /// containment on the trimmed title.
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title
            .trim()
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }

    /// Case-insensitive equality on the trimmed title.
    pub fn title_equals(&self, title: &str) -> bool {
        self.title.trim().to_lowercase() == title.to_lowercase()
    }
}

/// A post with workflow state, watchers and hashtags.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    #[serde(default)]
    pub current_workflow_state: Option<Value>,
    #[serde(default)]
    pub current_workflow_screen_data: Option<Value>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub watcher_users: Vec<User>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub hashtags: Vec<Hashtag>,
    #[serde(default)]
    pub attachments_count: Option<u32>,
}

impl Deref for PostDetail {
    type Target = Post;

    fn deref(&self) -> &Post {
        &self.post
    }
}

/// Filters for the community post listing.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_by_user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followed_by_me: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_workflow_status_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashtag_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<i32>,
    /// Sort key, e.g. `title`, `creationTimestamp`, `customField-<id>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_field_filters: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned_first: Option<bool>,
}

impl PostListQuery {
    /// Query filtering on the title.
    pub fn with_title(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }
}

impl PageRequest for PostListQuery {
    fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    fn pagination_mut(&mut self) -> &mut Pagination {
        &mut self.pagination
    }
}

/// Payload to create or edit a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostParams {
    #[serde(default)]
    pub title: String,
    /// Description in delta format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watcher_user_ids: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_init_state_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Current post data, as needed to build an edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostForEdit {
    /// Token to pass to the edit call.
    #[serde(default)]
    pub occ_token: Option<i64>,
    #[serde(flatten)]
    pub post: PostParams,
}

impl PostForEdit {
    /// Turn the current data into an edit payload.
    pub fn into_params(self) -> PostParams {
        self.post
    }
}

/// Answer to a post creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCreated {
    pub post_id: u64,
    #[serde(default)]
    pub next_occ_token: Option<i64>,
    #[serde(default)]
    pub post_data: Option<PostDetail>,
}

/// Answer to a post deletion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostDeleted {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[async_trait]
impl List for Post {
    /// Community id.
    type Scope = u64;
    type Query = PostListQuery;

    #[tracing::instrument(skip(client, query))]
    async fn list_page(
        client: &InteractaClient,
        community_id: u64,
        query: &Self::Query,
    ) -> Result<ApiResponse<Page<Self>>> {
        let path = format!("communication/posts/data/community-list/{community_id}");
        client.post(&external_path(&path), query).await
    }
}

#[async_trait]
impl Get for PostDetail {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &InteractaClient, post_id: u64) -> Result<ApiResponse<Self>> {
        let path = format!("communication/posts/data/post-detail-by-id/{post_id}");
        match client.get(&external_path(&path)).await {
            Err(e) if e.status() == Some(404) => Err(InteractaError::ObjectNotFound(format!(
                "post {post_id} not found in Interacta"
            ))),
            other => other,
        }
    }
}

#[async_trait]
impl Create for Post {
    /// Community id.
    type Scope = u64;
    type Params = PostParams;
    type Output = ApiResponse<PostCreated>;

    #[tracing::instrument(skip(client, params))]
    async fn create(
        client: &InteractaClient,
        community_id: u64,
        params: &Self::Params,
    ) -> Result<Self::Output> {
        let path = format!("communication/posts/manage/create-post/{community_id}");
        client.post(&external_path(&path), params).await
    }
}

#[async_trait]
impl Get for PostForEdit {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &InteractaClient, post_id: u64) -> Result<ApiResponse<Self>> {
        let path = format!("communication/posts/manage/post-data-for-edit/{post_id}");
        client.get(&external_path(&path)).await
    }
}

#[async_trait]
impl Update for Post {
    /// Post id and the occ token from [`PostForEdit`].
    type Id = (u64, i64);
    type Params = PostParams;
    type Output = RawResponse;

    #[tracing::instrument(skip(client, params))]
    async fn update(
        client: &InteractaClient,
        id: (u64, i64),
        params: &Self::Params,
    ) -> Result<RawResponse> {
        let (post_id, occ_token) = id;
        let path = format!("communication/posts/manage/edit-post/{post_id}/{occ_token}");
        client.put(&external_path(&path), params).await
    }
}

#[async_trait]
impl Delete for Post {
    type Id = u64;
    type Output = ApiResponse<PostDeleted>;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &InteractaClient, post_id: u64) -> Result<Self::Output> {
        let path = format!("communication/posts/manage/delete-post/{post_id}");
        client.delete(&external_path(&path)).await
    }
}

/// Fetch every post of a community.
pub async fn list_all_posts(
    client: &InteractaClient,
    community_id: u64,
    query: Option<PostListQuery>,
) -> Result<Vec<Post>> {
    Post::list_all(client, community_id, &query.unwrap_or_default()).await
}

/// Find the single post whose title contains `title`, ignoring case.
///
/// Only the first page returned by the server's title filter is searched.
#[tracing::instrument(skip(client))]
pub async fn find_post_by_title(
    client: &InteractaClient,
    community_id: u64,
    title: &str,
) -> Result<Post> {
    let page = Post::list_page(client, community_id, &PostListQuery::with_title(title))
        .await?
        .into_inner();
    let posts = page.into_iter().filter(|p| p.title_contains(title)).collect();
    exactly_one(posts, &format!("post with '{title}' in title"))
}

/// Find the single post titled exactly `title`, ignoring case.
#[tracing::instrument(skip(client))]
pub async fn find_post_by_exact_title(
    client: &InteractaClient,
    community_id: u64,
    title: &str,
) -> Result<Post> {
    let page = Post::list_page(client, community_id, &PostListQuery::with_title(title))
        .await?
        .into_inner();
    let posts = page.into_iter().filter(|p| p.title_equals(title)).collect();
    exactly_one(posts, &format!("post with title '{title}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(title: &str) -> Post {
        serde_json::from_value(json!({"id": 1, "title": title})).unwrap()
    }

    #[test]
    fn test_title_matching() {
        let p = post("  Ticket PRINTER broken ");
        assert!(p.title_contains("printer"));
        assert!(p.title_contains("Ticket"));
        assert!(!p.title_contains("scanner"));

        assert!(p.title_equals("ticket printer broken"));
        assert!(!p.title_equals("ticket printer"));
    }

    #[test]
    fn test_post_detail_flattens_post() {
        let detail: PostDetail = serde_json::from_value(json!({
            "id": 42,
            "communityId": 1142,
            "title": "Hello",
            "creationTimestamp": "2024-03-01T10:00:00Z",
            "creatorUser": {"id": 3, "firstName": "Ada"},
            "watcherUsers": null,
            "hashtags": [{"id": 5, "name": "urgent"}],
            "currentWorkflowState": {"id": 501}
        }))
        .unwrap();

        assert_eq!(detail.id, 42);
        assert_eq!(detail.community_id, 1142);
        assert_eq!(detail.creator_user.as_ref().unwrap().first_name, "Ada");
        assert!(detail.watcher_users.is_empty());
        assert_eq!(detail.hashtags[0].name, "urgent");
        assert!(detail.creation_timestamp.is_some());
    }

    #[test]
    fn test_post_list_query_body() {
        let mut query = PostListQuery::with_title("printer");
        query.pagination.page_token = Some("abc".to_string());
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "pageToken": "abc",
                "pageSize": 15,
                "calculateTotalItemsCount": true,
                "title": "printer"
            })
        );
    }

    #[test]
    fn test_post_params_body() {
        let params = PostParams {
            title: "titolo".to_string(),
            custom_data: Some(json!({"1411": 27})),
            watcher_user_ids: Some(vec![4155]),
            visibility: Some(1),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "title": "titolo",
                "customData": {"1411": 27},
                "watcherUserIds": [4155],
                "visibility": 1
            })
        );
    }

    #[test]
    fn test_post_for_edit_round_trip() {
        let for_edit: PostForEdit = serde_json::from_value(json!({
            "title": "old",
            "occToken": 7,
            "customData": {"1411": 1},
            "draft": false
        }))
        .unwrap();
        assert_eq!(for_edit.occ_token, Some(7));

        let mut params = for_edit.into_params();
        params.title = "new".to_string();
        let body = serde_json::to_value(&params).unwrap();
        assert_eq!(body["title"], "new");
        assert_eq!(body["draft"], false);
        assert!(body.get("occToken").is_none());
    }
}
