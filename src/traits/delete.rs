//! Delete trait.

use async_trait::async_trait;

use crate::client::InteractaClient;
use crate::error::Result;
use crate::response::FromResponse;

/// Delete an entity by ID.
#[async_trait]
pub trait Delete {
    /// The ID type for this entity.
    type Id: Send;

    /// What the server answers with.
    type Output: FromResponse + Send;

    /// Delete the entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn delete(client: &InteractaClient, id: Self::Id) -> Result<Self::Output>;
}
