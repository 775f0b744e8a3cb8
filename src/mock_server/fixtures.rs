//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use crate::{Group, LoginProvider, Post, PostDetail, SystemUser};

/// Community used by the default scenario.
pub const DEFAULT_COMMUNITY_ID: u64 = 1142;

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// Data loaded into a server started with [`super::MockServer::start`].
pub struct DefaultScenario {
    pub posts: Vec<PostDetail>,
    pub users: Vec<SystemUser>,
    pub groups: Vec<Group>,
}

impl Fixtures {
    // =========================================================================
    // Post Fixtures
    // =========================================================================

    /// Create a post with a title and nothing else.
    pub fn minimal_post(id: u64, community_id: u64, title: &str) -> PostDetail {
        PostDetail {
            post: Post {
                id,
                community_id,
                custom_id: None,
                title: title.to_string(),
                description_plain_text: None,
                visibility: Some(0),
                announcement: Some(false),
                workflow_state_description: None,
                custom_data: None,
                creator_user: None,
                creation_timestamp: None,
                last_modify_user: None,
                last_modify_timestamp: None,
                watchers_count: None,
                comments_count: Some(0),
                likes_count: Some(0),
                views_count: Some(0),
            },
            current_workflow_state: None,
            current_workflow_screen_data: None,
            watcher_users: vec![],
            hashtags: vec![],
            attachments_count: Some(0),
        }
    }

    /// Create a post with a description and a workflow state.
    pub fn ticket(id: u64, community_id: u64, title: &str, state: &str) -> PostDetail {
        let mut post = Self::minimal_post(id, community_id, title);
        post.post.description_plain_text = Some(format!("{title}: please take a look."));
        post.post.workflow_state_description = Some(state.to_string());
        post
    }

    // =========================================================================
    // User Fixtures
    // =========================================================================

    /// Create an active user logging in with Interacta credentials.
    pub fn user(id: u64, first_name: &str, last_name: &str, email: &str) -> SystemUser {
        SystemUser {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            contact_email: Some(email.to_string()),
            google_account_id: None,
            microsoft_account_id: None,
            login_providers: vec![LoginProvider::Custom],
            deleted: false,
            blocked: false,
            external_id: None,
            last_access_timestamp: None,
            business_unit: None,
            area: None,
        }
    }

    /// Create a user logging in with Google.
    pub fn google_user(id: u64, first_name: &str, last_name: &str, email: &str) -> SystemUser {
        let mut user = Self::user(id, first_name, last_name, email);
        user.login_providers = vec![LoginProvider::Google];
        user.google_account_id = Some(email.to_string());
        user
    }

    // =========================================================================
    // Group Fixtures
    // =========================================================================

    /// Create a visible group.
    pub fn group(id: u64, name: &str, members_count: u32) -> Group {
        Group {
            id,
            name: name.to_string(),
            email: None,
            visible: Some(true),
            deleted: false,
            external_id: None,
            members_count: Some(members_count),
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// A community with a handful of tickets, users of every kind and groups.
    pub fn default_scenario() -> DefaultScenario {
        let posts = vec![
            Self::ticket(1, DEFAULT_COMMUNITY_ID, "Printer broken on floor 2", "Open"),
            Self::ticket(2, DEFAULT_COMMUNITY_ID, "VPN access request", "In progress"),
            Self::ticket(3, DEFAULT_COMMUNITY_ID, "New laptop for Mario", "Closed"),
            Self::minimal_post(4, 2001, "Welcome to the news community"),
        ];

        let mut blocked = Self::user(13, "Carla", "Neri", "carla.neri@example.org");
        blocked.blocked = true;
        let mut deleted = Self::user(14, "Dario", "Gialli", "dario.gialli@example.org");
        deleted.deleted = true;
        let mut divergent = Self::google_user(15, "Elena", "Blu", "elena.blu@example.org");
        divergent.google_account_id = Some("elena@personal.example.com".to_string());

        let users = vec![
            Self::user(11, "Anna", "Rossi", "anna.rossi@example.org"),
            Self::google_user(12, "Bruno", "Verdi", "bruno.verdi@example.org"),
            blocked,
            deleted,
            divergent,
        ];

        let mut old_group = Self::group(23, "Old Office", 0);
        old_group.deleted = true;
        let groups = vec![
            Self::group(21, "Help Desk", 2),
            Self::group(22, "Administration", 3),
            old_group,
        ];

        DefaultScenario {
            posts,
            users,
            groups,
        }
    }
}
