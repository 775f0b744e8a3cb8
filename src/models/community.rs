//! Community settings: post definition, custom fields and details.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{serde_as, DefaultOnNull};

use crate::client::InteractaClient;
use crate::error::Result;
use crate::models::common::external_path;
use crate::models::hashtag::Hashtag;
use crate::response::ApiResponse;
use crate::traits::Get;

/// Type of a custom field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub enum FieldType {
    Int,
    BigInt,
    Decimal,
    Date,
    DateTime,
    String,
    Enum,
    EnumList,
    TextArea,
    Flag,
    DeltaArea,
    Feedback,
    HierarchicalEnum,
    Link,
    GenericEntityList,
    Unknown(u16),
}

impl From<u16> for FieldType {
    fn from(code: u16) -> Self {
        match code {
            1 => Self::Int,
            2 => Self::BigInt,
            3 => Self::Decimal,
            4 => Self::Date,
            5 => Self::DateTime,
            6 => Self::String,
            7 => Self::Enum,
            8 => Self::EnumList,
            9 => Self::TextArea,
            10 => Self::Flag,
            11 => Self::DeltaArea,
            12 => Self::Feedback,
            13 => Self::HierarchicalEnum,
            14 => Self::Link,
            15 => Self::GenericEntityList,
            other => Self::Unknown(other),
        }
    }
}

impl From<FieldType> for u16 {
    fn from(value: FieldType) -> Self {
        match value {
            FieldType::Int => 1,
            FieldType::BigInt => 2,
            FieldType::Decimal => 3,
            FieldType::Date => 4,
            FieldType::DateTime => 5,
            FieldType::String => 6,
            FieldType::Enum => 7,
            FieldType::EnumList => 8,
            FieldType::TextArea => 9,
            FieldType::Flag => 10,
            FieldType::DeltaArea => 11,
            FieldType::Feedback => 12,
            FieldType::HierarchicalEnum => 13,
            FieldType::Link => 14,
            FieldType::GenericEntityList => 15,
            FieldType::Unknown(code) => code,
        }
    }
}

impl FieldType {
    fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::Int => "INT",
            Self::BigInt => "BIGINT",
            Self::Decimal => "DECIMAL",
            Self::Date => "DATE",
            Self::DateTime => "DATETIME",
            Self::String => "STRING",
            Self::Enum => "ENUM",
            Self::EnumList => "ENUM_LIST",
            Self::TextArea => "TEXT_AREA",
            Self::Flag => "FLAG",
            Self::DeltaArea => "DELTA_AREA",
            Self::Feedback => "FEEDBACK",
            Self::HierarchicalEnum => "HIERARCHICAL_ENUM",
            Self::Link => "LINK",
            Self::GenericEntityList => "GENERIC_ENTITY_LIST",
            Self::Unknown(_) => return None,
        };
        Some(name)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "UNKNOWN({})", u16::from(*self)),
        }
    }
}

/// One value of an enum custom field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub id: u64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub parent_ids: Option<Vec<u64>>,
    #[serde(default)]
    pub deleted: Option<bool>,
}

/// A custom field of a community's posts.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub field_type: Option<FieldType>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub readonly: Option<bool>,
    #[serde(default)]
    pub searchable: Option<bool>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub enum_values: Vec<EnumValue>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// A field shown on a workflow transition screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenField {
    pub id: u64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub field_type: Option<FieldType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Workflow attached to a community's posts.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub screen_field_metadatas: Vec<ScreenField>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkflowDefinition {
    /// The screen field with this label.
    pub fn screen_field(&self, label: &str) -> Option<&ScreenField> {
        self.screen_field_metadatas
            .iter()
            .find(|f| f.label.as_deref() == Some(label))
    }
}

/// How posts of a community are built.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDefinition {
    pub community_id: u64,
    #[serde(default)]
    pub workflow_definition: Option<WorkflowDefinition>,
    #[serde(default)]
    pub title_enabled: Option<i32>,
    #[serde(default)]
    pub description_enabled: Option<i32>,
    #[serde(default)]
    pub watchers_enabled: Option<i32>,
    #[serde(default)]
    pub hash_tag_enabled: Option<bool>,
    #[serde(default)]
    pub attachment_enabled: Option<bool>,
    #[serde(default)]
    pub like_enabled: Option<bool>,
    #[serde(default)]
    pub custom_fields_enabled: Option<bool>,
    #[serde(default)]
    pub default_post_visibility: Option<i32>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub field_definitions: Vec<FieldDefinition>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub hashtags: Vec<Hashtag>,
}

impl PostDefinition {
    /// The custom field with this id.
    pub fn field(&self, field_id: u64) -> Option<&FieldDefinition> {
        self.field_definitions.iter().find(|f| f.id == field_id)
    }
}

/// Basic community data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub workspace_id: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Community details with its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityDetails {
    pub community: Community,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[async_trait]
impl Get for PostDefinition {
    /// Community id.
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &InteractaClient, community_id: u64) -> Result<ApiResponse<Self>> {
        let path = format!("communication/settings/communities/{community_id}/post-definition");
        client.get(&external_path(&path)).await
    }
}

#[async_trait]
impl Get for CommunityDetails {
    /// Community id.
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &InteractaClient, community_id: u64) -> Result<ApiResponse<Self>> {
        let path = format!("communication/settings/communities/{community_id}/details");
        client.get(&external_path(&path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_type_codes() {
        assert_eq!(FieldType::from(7), FieldType::Enum);
        assert_eq!(u16::from(FieldType::Link), 14);
        assert_eq!(FieldType::from(99), FieldType::Unknown(99));
        assert_eq!(FieldType::EnumList.to_string(), "ENUM_LIST");
        assert_eq!(FieldType::Unknown(99).to_string(), "UNKNOWN(99)");
    }

    #[test]
    fn test_post_definition() {
        let definition: PostDefinition = serde_json::from_value(json!({
            "communityId": 1142,
            "workflowDefinition": {
                "id": 3,
                "screenFieldMetadatas": [
                    {"id": 1, "label": "Esito", "type": 7},
                    {"id": 2, "label": "Note", "type": 9}
                ]
            },
            "fieldDefinitions": [
                {"id": 1411, "label": "Priority", "type": 7, "enumValues": [{"id": 27, "label": "High"}]},
                {"id": 1412, "label": "Link", "type": 14, "enumValues": null}
            ],
            "hashtags": null
        }))
        .unwrap();

        assert_eq!(definition.field_definitions.len(), 2);
        let priority = definition.field(1411).unwrap();
        assert_eq!(priority.field_type, Some(FieldType::Enum));
        assert_eq!(priority.enum_values[0].label.as_deref(), Some("High"));
        assert!(definition.field(1412).unwrap().enum_values.is_empty());
        assert!(definition.hashtags.is_empty());

        let workflow = definition.workflow_definition.unwrap();
        assert_eq!(workflow.screen_field("Note").unwrap().id, 2);
        assert!(workflow.screen_field("Missing").is_none());
        assert_eq!(workflow.extra["id"], 3);
    }

    #[test]
    fn test_community_details() {
        let details: CommunityDetails = serde_json::from_value(json!({
            "community": {"id": 1142, "name": "Playground", "workspaceId": 2},
            "adminUsers": []
        }))
        .unwrap();
        assert_eq!(details.community.name, "Playground");
        assert!(details.extra.contains_key("adminUsers"));
    }
}
