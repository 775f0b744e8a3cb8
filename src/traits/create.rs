//! Create trait for new entities.

use async_trait::async_trait;
use serde::Serialize;

use crate::client::InteractaClient;
use crate::error::Result;
use crate::response::FromResponse;

/// Create a new entity.
///
/// The server answers with a creation receipt rather than the entity itself,
/// so the result type is declared separately.
#[async_trait]
pub trait Create {
    /// Parent the entity is created in (`()` when global).
    type Scope: Send;

    /// Creation payload.
    type Params: Serialize + Send + Sync;

    /// What the server answers with.
    type Output: FromResponse + Send;

    /// Create the entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the answer does not parse.
    async fn create(
        client: &InteractaClient,
        scope: Self::Scope,
        params: &Self::Params,
    ) -> Result<Self::Output>;
}
