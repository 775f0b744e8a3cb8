//! Update trait for modifying entities.

use async_trait::async_trait;
use serde::Serialize;

use crate::client::InteractaClient;
use crate::error::Result;
use crate::response::FromResponse;

/// Update an existing entity.
///
/// # Example
///
/// ```ignore
/// use interactapi::{Group, GroupParams, InteractaClient, Update};
///
/// let edited = Group::update(
///     &client,
///     42,
///     &GroupParams {
///         name: "Helpdesk".to_string(),
///         ..Default::default()
///     },
/// )
/// .await?;
/// ```
#[async_trait]
pub trait Update {
    /// The ID type for this entity.
    type Id: Send;

    /// Update payload.
    type Params: Serialize + Send + Sync;

    /// What the server answers with.
    type Output: FromResponse + Send;

    /// Update the entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn update(
        client: &InteractaClient,
        id: Self::Id,
        params: &Self::Params,
    ) -> Result<Self::Output>;
}
