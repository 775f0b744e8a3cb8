//! Post workflow transitions and screen data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::InteractaClient;
use crate::error::Result;
use crate::models::common::external_path;
use crate::response::ApiResponse;

/// Screen data of a post, as needed to run a transition or edit the screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowScreenData {
    /// Screen field values keyed by field id.
    #[serde(default)]
    pub data: Option<Value>,
    /// Token to pass to [`edit_workflow_screen_data`].
    #[serde(default)]
    pub occ_token: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of a workflow transition or screen edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowParams {
    /// Screen field values keyed by field id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_data: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Answer to a transition or screen edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowResult {
    #[serde(default)]
    pub next_occ_token: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScreenDataParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    workflow_operation_id: Option<u64>,
}

/// Fetch the screen data of a post, for a given transition if any.
#[tracing::instrument(skip(client))]
pub async fn get_workflow_screen_data(
    client: &InteractaClient,
    post_id: u64,
    workflow_operation_id: Option<u64>,
) -> Result<ApiResponse<WorkflowScreenData>> {
    let path = format!("communication/posts/manage/post-workflow-screen-data-for-edit/{post_id}");
    client
        .get_with_query(
            &external_path(&path),
            &ScreenDataParams {
                workflow_operation_id,
            },
        )
        .await
}

/// Move a post through a workflow transition.
#[tracing::instrument(skip(client, params))]
pub async fn execute_workflow_operation(
    client: &InteractaClient,
    post_id: u64,
    workflow_operation_id: u64,
    params: &WorkflowParams,
) -> Result<ApiResponse<WorkflowResult>> {
    let path = format!(
        "communication/posts/manage/execute-post-workflow-operation/{post_id}/{workflow_operation_id}"
    );
    client.post(&external_path(&path), params).await
}

/// Edit the screen data of a post.
#[tracing::instrument(skip(client, params))]
pub async fn edit_workflow_screen_data(
    client: &InteractaClient,
    post_id: u64,
    screen_occ_token: i64,
    params: &WorkflowParams,
) -> Result<ApiResponse<WorkflowResult>> {
    let path = format!(
        "communication/posts/manage/edit-post-workflow-screen-data/{post_id}/{screen_occ_token}"
    );
    client.put(&external_path(&path), params).await
}
