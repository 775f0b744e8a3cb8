//! Users: system user listing, admin management and login statistics.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{serde_as, DefaultOnNull};

use crate::client::InteractaClient;
use crate::error::Result;
use crate::models::common::{exactly_one, external_path, IdRef, NamedRef};
use crate::pagination::{Page, PageRequest, Pagination};
use crate::response::{ApiResponse, RawResponse};
use crate::traits::{Create, Delete, Get, List, Update};

/// Page size used when collecting every user.
pub const ALL_USERS_PAGE_SIZE: u32 = 100;

/// Identity provider a user can log in with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoginProvider {
    Google,
    Microsoft,
    /// Interacta's own username/password login.
    Custom,
    /// A provider this crate does not know.
    Other(String),
}

impl From<String> for LoginProvider {
    fn from(value: String) -> Self {
        match value.as_str() {
            "google" => Self::Google,
            "microsoft" => Self::Microsoft,
            "custom" => Self::Custom,
            _ => Self::Other(value),
        }
    }
}

impl From<LoginProvider> for String {
    fn from(value: LoginProvider) -> Self {
        value.to_string()
    }
}

impl fmt::Display for LoginProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Google => f.write_str("google"),
            Self::Microsoft => f.write_str("microsoft"),
            Self::Custom => f.write_str("custom"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// A user as embedded in posts, comments and group member lists.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub google_account_id: Option<String>,
    #[serde(default)]
    pub microsoft_account_id: Option<String>,
    #[serde(default)]
    pub account_photo_url: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub deleted: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub external_id: Option<String>,
}

impl User {
    /// "First Last", trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A user as returned by the admin user listing.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemUser {
    pub id: u64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub google_account_id: Option<String>,
    #[serde(default)]
    pub microsoft_account_id: Option<String>,
    /// Providers the user can log in with.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub login_providers: Vec<LoginProvider>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub deleted: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub last_access_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub business_unit: Option<NamedRef>,
    #[serde(default)]
    pub area: Option<NamedRef>,
}

impl SystemUser {
    /// Neither deleted nor blocked.
    pub fn is_active(&self) -> bool {
        !self.deleted && !self.blocked
    }

    /// Whether the user can log in through `provider`.
    pub fn has_provider(&self, provider: &LoginProvider) -> bool {
        self.login_providers.contains(provider)
    }

    /// The account id the user has with an external provider.
    pub fn provider_account_id(&self, provider: &LoginProvider) -> Option<&str> {
        match provider {
            LoginProvider::Google => self.google_account_id.as_deref(),
            LoginProvider::Microsoft => self.microsoft_account_id.as_deref(),
            _ => None,
        }
    }

    /// External provider accounts that differ from the contact e-mail.
    pub fn divergent_provider_accounts(&self) -> Vec<(LoginProvider, &str)> {
        [LoginProvider::Google, LoginProvider::Microsoft]
            .into_iter()
            .filter_map(|p| {
                let account = self.provider_account_id(&p)?;
                (Some(account) != self.contact_email.as_deref()).then_some((p, account))
            })
            .collect()
    }
}

/// Filters for the admin user listing.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Full-text search on first name, last name and e-mail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_text_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name_prefix_full_text_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name_prefix_full_text_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_prefix_full_text_filter: Option<String>,
    /// Search on the e-mail used with external login providers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_auth_service_email_full_text_filter: Option<String>,
    /// User status; `[0]` keeps only active users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_filter: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_provider_filter: Option<Vec<LoginProvider>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_unit_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_type_id: Option<String>,
}

impl PageRequest for UserListQuery {
    fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    fn pagination_mut(&mut self) -> &mut Pagination {
        &mut self.pagination
    }
}

/// Contact and organisation data of a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<IdRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_unit: Option<IdRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<IdRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Payload to create or edit a user.
///
/// Fields the crate does not model are kept in `extra` so that data read
/// with [`UserForEdit`] goes back unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserParams {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfo>,
    /// Login provider configuration, e.g. `{"google": {"googleAccountId": ..., "enabled": true}}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_credentials_configuration: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_settings: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occ_token: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Current user data, as needed to build an edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserForEdit {
    #[serde(flatten)]
    pub user: UserParams,
}

impl UserForEdit {
    /// Turn the current data into an edit payload.
    pub fn into_params(self) -> UserParams {
        self.user
    }
}

/// Answer to a user creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreated {
    pub user_id: u64,
    #[serde(default)]
    pub next_occ_token: Option<i64>,
}

/// Answer to a user edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEdited {
    #[serde(default)]
    pub next_occ_token: Option<i64>,
}

#[async_trait]
impl List for SystemUser {
    type Scope = ();
    type Query = UserListQuery;

    #[tracing::instrument(skip(client, query))]
    async fn list_page(
        client: &InteractaClient,
        _scope: (),
        query: &Self::Query,
    ) -> Result<ApiResponse<Page<Self>>> {
        client.post(&external_path("admin/data/users"), query).await
    }
}

#[async_trait]
impl Create for SystemUser {
    type Scope = ();
    type Params = UserParams;
    type Output = ApiResponse<UserCreated>;

    #[tracing::instrument(skip(client, params))]
    async fn create(
        client: &InteractaClient,
        _scope: (),
        params: &Self::Params,
    ) -> Result<Self::Output> {
        client.post(&external_path("admin/manage/users"), params).await
    }
}

#[async_trait]
impl Get for UserForEdit {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &InteractaClient, user_id: u64) -> Result<ApiResponse<Self>> {
        client
            .get(&external_path(&format!("admin/manage/users/{user_id}/edit")))
            .await
    }
}

#[async_trait]
impl Update for SystemUser {
    type Id = u64;
    type Params = UserParams;
    type Output = ApiResponse<UserEdited>;

    #[tracing::instrument(skip(client, params))]
    async fn update(
        client: &InteractaClient,
        user_id: u64,
        params: &Self::Params,
    ) -> Result<Self::Output> {
        client
            .put(&external_path(&format!("admin/manage/users/{user_id}")), params)
            .await
    }
}

#[async_trait]
impl Delete for SystemUser {
    type Id = u64;
    type Output = RawResponse;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &InteractaClient, user_id: u64) -> Result<RawResponse> {
        client
            .delete(&external_path(&format!("admin/manage/users/{user_id}")))
            .await
    }
}

/// List the business units; the body is returned unparsed.
#[tracing::instrument(skip(client))]
pub async fn list_business_units(client: &InteractaClient) -> Result<RawResponse> {
    client.get(&external_path("admin/data/business-units")).await
}

/// Fetch every user matching `query`.
///
/// Without a query, pages of [`ALL_USERS_PAGE_SIZE`] users are requested.
pub async fn all_users(
    client: &InteractaClient,
    query: Option<UserListQuery>,
) -> Result<Vec<SystemUser>> {
    let query = query.unwrap_or_else(|| UserListQuery {
        pagination: Pagination::with_page_size(ALL_USERS_PAGE_SIZE),
        ..Default::default()
    });
    SystemUser::list_all(client, (), &query).await
}

/// Find the single user matching the filter.
///
/// `external_auth_email` filters on the e-mail used with external login
/// providers. Only the first page of results is considered.
///
/// # Errors
///
/// [`ObjectNotFound`](crate::InteractaError::ObjectNotFound) when nothing
/// matches, [`MultipleObjectsFound`](crate::InteractaError::MultipleObjectsFound)
/// when more than one user does.
#[tracing::instrument(skip(client, query))]
pub async fn find_user(
    client: &InteractaClient,
    external_auth_email: Option<&str>,
    query: Option<UserListQuery>,
) -> Result<SystemUser> {
    let mut query = query.unwrap_or_default();
    if let Some(email) = external_auth_email {
        query.external_auth_service_email_full_text_filter = Some(email.to_string());
    }

    let page = SystemUser::list_page(client, (), &query).await?.into_inner();
    let description = match external_auth_email {
        Some(email) => format!("user with external auth e-mail '{email}'"),
        None => "user matching the filter".to_string(),
    };
    exactly_one(page.items, &description)
}

/// User ids grouped by login provider and status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub ids: Vec<u64>,
    pub provider_custom: Vec<u64>,
    pub provider_google: Vec<u64>,
    pub provider_microsoft: Vec<u64>,
    /// Users without any login provider.
    pub no_provider: Vec<u64>,
    pub deleted: Vec<u64>,
    pub blocked: Vec<u64>,
    pub active: Vec<u64>,
}

impl UserStats {
    /// Tally a user list.
    pub fn from_users(users: &[SystemUser]) -> Self {
        let mut stats = Self::default();
        for user in users {
            stats.ids.push(user.id);
            if user.login_providers.is_empty() {
                stats.no_provider.push(user.id);
            }
            for provider in &user.login_providers {
                match provider {
                    LoginProvider::Custom => stats.provider_custom.push(user.id),
                    LoginProvider::Google => stats.provider_google.push(user.id),
                    LoginProvider::Microsoft => stats.provider_microsoft.push(user.id),
                    LoginProvider::Other(_) => {}
                }
            }
            if user.deleted {
                stats.deleted.push(user.id);
            }
            if user.blocked {
                stats.blocked.push(user.id);
            }
            if user.is_active() {
                stats.active.push(user.id);
            }
        }
        stats
    }

    /// Whether `user_id` was counted as active.
    pub fn is_active(&self, user_id: u64) -> bool {
        self.active.contains(&user_id)
    }

    /// Size of each group, in display order.
    pub fn counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("ids", self.ids.len()),
            ("provider_custom", self.provider_custom.len()),
            ("provider_google", self.provider_google.len()),
            ("provider_microsoft", self.provider_microsoft.len()),
            ("no_provider", self.no_provider.len()),
            ("deleted", self.deleted.len()),
            ("blocked", self.blocked.len()),
            ("active", self.active.len()),
        ]
    }
}
