//! User groups and their members.

use std::ops::Deref;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{serde_as, DefaultOnNull};

use crate::client::InteractaClient;
use crate::error::Result;
use crate::models::common::{exactly_one, external_path};
use crate::models::user::User;
use crate::pagination::{Page, PageRequest, Pagination};
use crate::response::{ApiResponse, RawResponse};
use crate::traits::{Create, Delete, Get, List, Update};

/// Page size used by [`find_group_by_name`] when no query is given.
pub const FIND_GROUP_PAGE_SIZE: u32 = 100;

/// A group as returned by the admin group listing.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub members_count: Option<u32>,
}

/// Filters for the admin group listing.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupListQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Full-text search on name and e-mail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_text_filter: Option<String>,
    /// Group status; `[0]` keeps only groups that are not deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_filter: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_ids: Option<Vec<u64>>,
    /// Skip groups that contain this user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_group_by_member_user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_type_id: Option<String>,
}

impl PageRequest for GroupListQuery {
    fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    fn pagination_mut(&mut self) -> &mut Pagination {
        &mut self.pagination
    }
}

/// A member of a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupMember(pub User);

impl Deref for GroupMember {
    type Target = User;

    fn deref(&self) -> &User {
        &self.0
    }
}

/// Payload to create or edit a group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupParams {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default)]
    pub member_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occ_token: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Current group data, as needed to build an edit.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupForEdit {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub members: Vec<User>,
    #[serde(default)]
    pub tags: Option<Value>,
    #[serde(flatten)]
    pub group: GroupParams,
}

impl GroupForEdit {
    /// Turn the current data into an edit payload.
    ///
    /// The member list is rebuilt from the current members.
    pub fn into_params(self) -> GroupParams {
        let member_ids = self.members.iter().map(|m| m.id).collect();
        GroupParams {
            member_ids,
            ..self.group
        }
    }
}

/// Answer to a group creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCreated {
    pub id: u64,
    #[serde(default)]
    pub next_occ_token: Option<i64>,
}

/// Answer to a group edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupEdited {
    #[serde(default)]
    pub next_occ_token: Option<i64>,
}

#[async_trait]
impl List for Group {
    type Scope = ();
    type Query = GroupListQuery;

    #[tracing::instrument(skip(client, query))]
    async fn list_page(
        client: &InteractaClient,
        _scope: (),
        query: &Self::Query,
    ) -> Result<ApiResponse<Page<Self>>> {
        client.post(&external_path("admin/data/groups"), query).await
    }
}

#[async_trait]
impl Create for Group {
    type Scope = ();
    type Params = GroupParams;
    type Output = ApiResponse<GroupCreated>;

    #[tracing::instrument(skip(client, params))]
    async fn create(
        client: &InteractaClient,
        _scope: (),
        params: &GroupParams,
    ) -> Result<Self::Output> {
        client.post(&external_path("admin/manage/groups"), params).await
    }
}

#[async_trait]
impl List for GroupMember {
    /// Group id.
    type Scope = u64;
    type Query = Pagination;

    #[tracing::instrument(skip(client, query))]
    async fn list_page(
        client: &InteractaClient,
        group_id: u64,
        query: &Pagination,
    ) -> Result<ApiResponse<Page<Self>>> {
        let path = format!("admin/data/groups/{group_id}/members");
        client.post(&external_path(&path), query).await
    }
}

#[async_trait]
impl Get for GroupForEdit {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &InteractaClient, group_id: u64) -> Result<ApiResponse<Self>> {
        let path = format!("admin/manage/groups/{group_id}/edit");
        client.get(&external_path(&path)).await
    }
}

#[async_trait]
impl Update for Group {
    type Id = u64;
    type Params = GroupParams;
    type Output = ApiResponse<GroupEdited>;

    #[tracing::instrument(skip(client, params))]
    async fn update(
        client: &InteractaClient,
        group_id: u64,
        params: &GroupParams,
    ) -> Result<Self::Output> {
        let path = format!("admin/manage/groups/{group_id}");
        client.put(&external_path(&path), params).await
    }
}

#[async_trait]
impl Delete for Group {
    type Id = u64;
    type Output = RawResponse;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &InteractaClient, group_id: u64) -> Result<RawResponse> {
        let path = format!("admin/manage/groups/{group_id}");
        client.delete(&external_path(&path)).await
    }
}

/// Find the single group named exactly `name`.
///
/// Without a query, the first [`FIND_GROUP_PAGE_SIZE`] groups that are not
/// deleted and match `name` in full text are searched. A given query keeps
/// its filters and gets `name` as full-text filter.
#[tracing::instrument(skip(client, query))]
pub async fn find_group_by_name(
    client: &InteractaClient,
    name: &str,
    query: Option<GroupListQuery>,
) -> Result<Group> {
    let query = match query {
        Some(query) => GroupListQuery {
            full_text_filter: Some(name.to_string()),
            ..query
        },
        None => GroupListQuery {
            pagination: Pagination::with_page_size(FIND_GROUP_PAGE_SIZE),
            full_text_filter: Some(name.to_string()),
            status_filter: Some(vec![0]),
            ..Default::default()
        },
    };

    let page = Group::list_page(client, (), &query).await?.into_inner();
    let groups = page.into_iter().filter(|g| g.name == name).collect();
    exactly_one(groups, &format!("group with name '{name}'"))
}
