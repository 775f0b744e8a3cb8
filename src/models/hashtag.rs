//! Community hashtags.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use crate::client::InteractaClient;
use crate::error::Result;
use crate::models::common::external_path;
use crate::pagination::{Page, Pagination};
use crate::response::ApiResponse;
use crate::traits::List;

/// A hashtag defined in a community.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hashtag {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub community_id: Option<u64>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub deleted: bool,
}

#[async_trait]
impl List for Hashtag {
    /// Community id.
    type Scope = u64;
    type Query = Pagination;

    #[tracing::instrument(skip(client, query))]
    async fn list_page(
        client: &InteractaClient,
        community_id: u64,
        query: &Pagination,
    ) -> Result<ApiResponse<Page<Self>>> {
        let path = format!("admin/data/communities/{community_id}/hashtags");
        client.post(&external_path(&path), query).await
    }
}
