//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::InteractaClient;
use crate::error::Result;
use crate::response::ApiResponse;

/// Fetch a single entity by ID.
///
/// # Example
///
/// ```ignore
/// use interactapi::{Get, InteractaClient, PostDetail};
///
/// let post = PostDetail::get(&client, 4242).await?;
/// println!("{} ({})", post.title, post.raw().status);
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id: Send;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &InteractaClient, id: Self::Id) -> Result<ApiResponse<Self>>;
}
