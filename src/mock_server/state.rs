//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Interacta API server.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::fixtures::Fixtures;
use crate::{Group, Page, Pagination, PostDetail, PostParams, SystemUser};

/// Username accepted by a fresh state.
pub const MOCK_USERNAME: &str = "admin";
/// Password accepted by a fresh state.
pub const MOCK_PASSWORD: &str = "secret";
/// Access token handed out on login.
pub const MOCK_ACCESS_TOKEN: &str = "mock-access-token";

/// Shared state for the mock server.
///
/// Wrapped in `Arc<RwLock<_>>` for concurrent access by the handlers.
#[derive(Debug)]
pub struct MockState {
    /// Credentials accepted by the credential login.
    pub username: String,
    pub password: String,

    /// Token returned by both logins and required as bearer afterwards.
    pub access_token: String,

    /// Posts indexed by id.
    pub posts: BTreeMap<u64, PostDetail>,

    /// Users indexed by id.
    pub users: BTreeMap<u64, SystemUser>,

    /// Groups indexed by id.
    pub groups: BTreeMap<u64, Group>,

    next_post_id: u64,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            username: MOCK_USERNAME.to_string(),
            password: MOCK_PASSWORD.to_string(),
            access_token: MOCK_ACCESS_TOKEN.to_string(),
            posts: BTreeMap::new(),
            users: BTreeMap::new(),
            groups: BTreeMap::new(),
            next_post_id: 1000,
        }
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a post to the state.
    pub fn with_post(mut self, post: PostDetail) -> Self {
        self.posts.insert(post.id, post);
        self
    }

    /// Add a user to the state.
    pub fn with_user(mut self, user: SystemUser) -> Self {
        self.users.insert(user.id, user);
        self
    }

    /// Add a group to the state.
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.insert(group.id, group);
        self
    }

    /// Replace the accepted credentials.
    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.username = username.to_string();
        self.password = password.to_string();
        self
    }

    /// Whether `header` is the bearer authorization for the handed-out token.
    pub fn is_authorized(&self, header: Option<&str>) -> bool {
        header
            .and_then(|h| h.strip_prefix("Bearer "))
            .is_some_and(|token| token == self.access_token)
    }

    /// Posts of a community whose title contains `title`, ignoring case.
    pub fn list_posts(&self, community_id: u64, title: Option<&str>) -> Vec<PostDetail> {
        let needle = title.map(str::to_lowercase);
        self.posts
            .values()
            .filter(|p| p.community_id == community_id)
            .filter(|p| {
                needle
                    .as_deref()
                    .map(|t| p.title.to_lowercase().contains(t))
                    .unwrap_or(true)
            })
            .cloned()
            .collect()
    }

    /// Users matching a full-text filter; status `0` keeps active users only.
    pub fn list_users(&self, full_text: Option<&str>, status: Option<&[i32]>) -> Vec<SystemUser> {
        let needle = full_text.map(str::to_lowercase);
        let active_only = status.is_some_and(|s| s.contains(&0));
        self.users
            .values()
            .filter(|u| !active_only || u.is_active())
            .filter(|u| {
                needle
                    .as_deref()
                    .map(|t| {
                        [
                            Some(u.first_name.as_str()),
                            Some(u.last_name.as_str()),
                            u.contact_email.as_deref(),
                        ]
                        .into_iter()
                        .flatten()
                        .any(|field| field.to_lowercase().contains(t))
                    })
                    .unwrap_or(true)
            })
            .cloned()
            .collect()
    }

    /// Groups matching a name filter; status `0` hides deleted groups.
    pub fn list_groups(&self, full_text: Option<&str>, status: Option<&[i32]>) -> Vec<Group> {
        let needle = full_text.map(str::to_lowercase);
        let live_only = status.is_some_and(|s| s.contains(&0));
        self.groups
            .values()
            .filter(|g| !live_only || !g.deleted)
            .filter(|g| {
                needle
                    .as_deref()
                    .map(|t| g.name.to_lowercase().contains(t))
                    .unwrap_or(true)
            })
            .cloned()
            .collect()
    }

    /// Store a new post and return it.
    pub fn create_post(&mut self, community_id: u64, params: PostParams) -> PostDetail {
        let id = self.next_post_id;
        self.next_post_id += 1;

        let mut post = Fixtures::minimal_post(id, community_id, &params.title);
        post.post.description_plain_text = params.description;
        post.post.custom_data = params.custom_data;
        post.post.visibility = params.visibility.or(post.post.visibility);
        self.posts.insert(id, post.clone());
        post
    }

    /// Remove a post, returning it if it existed.
    pub fn delete_post(&mut self, post_id: u64) -> Option<PostDetail> {
        self.posts.remove(&post_id)
    }
}

/// Slice `items` the way the server pages: the token is the offset of the
/// next page, and no token is handed out after the last one.
pub fn paginate<T>(items: Vec<T>, pagination: &Pagination) -> Page<T> {
    let total = items.len();
    let start = pagination
        .page_token
        .as_deref()
        .and_then(|t| t.parse::<usize>().ok())
        .unwrap_or(0)
        .min(total);
    let size = pagination.page_size.max(1) as usize;
    let end = start.saturating_add(size).min(total);

    let next_page_token = (end < total).then(|| end.to_string());
    let total_items_count = pagination
        .calculate_total_items_count
        .then_some(total as u64);
    let items = items.into_iter().skip(start).take(end - start).collect();

    Page::new(items, next_page_token, total_items_count)
}
