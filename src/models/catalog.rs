//! Post definition catalogs: shared value lists for custom fields.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use crate::client::InteractaClient;
use crate::error::Result;
use crate::models::common::external_path;
use crate::pagination::{Page, Pagination};
use crate::response::ApiResponse;
use crate::traits::List;

/// An entry of a catalog.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: u64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub parent_ids: Option<Vec<u64>>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub deleted: bool,
}

/// A catalog, with its entries when they were requested.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub hierarchical: Option<bool>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub entries: Vec<CatalogEntry>,
}

/// Answer of [`list_catalogs`].
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogList {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub catalogs: Vec<Catalog>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogsRequest<'a> {
    catalog_ids: &'a [u64],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogsParams {
    load_entries: bool,
}

/// Fetch catalogs by id, optionally with their entries.
#[tracing::instrument(skip(client))]
pub async fn list_catalogs(
    client: &InteractaClient,
    catalog_ids: &[u64],
    load_entries: bool,
) -> Result<ApiResponse<CatalogList>> {
    client
        .post_with_query(
            &external_path("communication/settings/post-definition/catalogs"),
            &CatalogsParams { load_entries },
            &CatalogsRequest { catalog_ids },
        )
        .await
}

#[async_trait]
impl List for CatalogEntry {
    /// Catalog id.
    type Scope = u64;
    type Query = Pagination;

    #[tracing::instrument(skip(client, query))]
    async fn list_page(
        client: &InteractaClient,
        catalog_id: u64,
        query: &Pagination,
    ) -> Result<ApiResponse<Page<Self>>> {
        let path = format!("communication/settings/post-definition/catalogs/{catalog_id}/entries");
        client.post(&external_path(&path), query).await
    }
}
