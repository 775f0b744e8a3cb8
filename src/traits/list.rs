//! List trait for fetching collections of entities.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::client::InteractaClient;
use crate::error::Result;
use crate::pagination::{collect_all, Page, PageRequest};
use crate::response::ApiResponse;

/// List/filter entities with cursor pagination.
///
/// `Scope` is the parent the listing belongs to (a community id for posts,
/// `()` for users). `Query` is the request body, carrying the filters and the
/// paging block.
///
/// # Example
///
/// ```ignore
/// use interactapi::{InteractaClient, List, Post, PostListQuery};
///
/// // One page
/// let page = Post::list_page(&client, 1142, &PostListQuery::default()).await?;
///
/// // Every page
/// let posts = Post::list_all(&client, 1142, &PostListQuery::default()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send + DeserializeOwned {
    /// Parent of the listing.
    type Scope: Copy + Send + Sync;

    /// Request body with filters and paging.
    type Query: PageRequest + Clone + Default + Send + Sync;

    /// Fetch one page as selected by the query's page token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_page(
        client: &InteractaClient,
        scope: Self::Scope,
        query: &Self::Query,
    ) -> Result<ApiResponse<Page<Self>>>;

    /// Fetch every page and concatenate the items in server order.
    ///
    /// The caller's query is cloned; only the page token of the clone changes
    /// between calls.
    ///
    /// # Errors
    ///
    /// Returns the first failing page's error; earlier items are dropped.
    async fn list_all(
        client: &InteractaClient,
        scope: Self::Scope,
        query: &Self::Query,
    ) -> Result<Vec<Self>> {
        let mut query = query.clone();
        collect_all(&mut query, move |q| async move {
            Self::list_page(client, scope, &q)
                .await
                .map(ApiResponse::into_inner)
        })
        .await
    }
}
