//! Post comments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::InteractaClient;
use crate::error::Result;
use crate::models::common::external_path;
use crate::models::user::User;
use crate::pagination::{Page, Pagination};
use crate::response::{ApiResponse, RawResponse};
use crate::traits::{Create, Delete, List};

/// A comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    /// Comment body in delta format.
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub creator_user: Option<User>,
    #[serde(default)]
    pub creation_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted: Option<bool>,
}

/// Payload to create a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentParams {
    /// Comment body in delta format.
    pub comment: String,
}

impl CommentParams {
    /// A comment made of a single plain-text run.
    pub fn plain_text(text: &str) -> Self {
        Self {
            comment: json!([{ "insert": text }]).to_string(),
        }
    }
}

/// Answer to a comment creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCreated {
    pub comment_id: u64,
}

#[async_trait]
impl List for Comment {
    /// Post id.
    type Scope = u64;
    type Query = Pagination;

    #[tracing::instrument(skip(client, query))]
    async fn list_page(
        client: &InteractaClient,
        post_id: u64,
        query: &Pagination,
    ) -> Result<ApiResponse<Page<Self>>> {
        let path = format!("communication/posts/data/comments-list/{post_id}");
        client.post(&external_path(&path), query).await
    }
}

#[async_trait]
impl Create for Comment {
    /// Post id.
    type Scope = u64;
    type Params = CommentParams;
    type Output = ApiResponse<CommentCreated>;

    #[tracing::instrument(skip(client, params))]
    async fn create(
        client: &InteractaClient,
        post_id: u64,
        params: &CommentParams,
    ) -> Result<Self::Output> {
        let path = format!("communication/posts/manage/create-comment/{post_id}");
        client.post(&external_path(&path), params).await
    }
}

#[async_trait]
impl Delete for Comment {
    type Id = u64;
    type Output = RawResponse;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &InteractaClient, comment_id: u64) -> Result<RawResponse> {
        let path = format!("communication/posts/manage/delete-comment/{comment_id}");
        client.delete(&external_path(&path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_comment() {
        let params = CommentParams::plain_text("Commento di test");
        let delta: serde_json::Value = serde_json::from_str(&params.comment).unwrap();
        assert_eq!(delta, json!([{"insert": "Commento di test"}]));
    }
}
