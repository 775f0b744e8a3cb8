//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{PostDefinition, PostDetail, Settings, SystemUser};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

impl PrettyPrint for PostDetail {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Post #{}", self.id));
        lines.push(format!("Title:          {}", self.title));
        lines.push(format!("Community:      {}", self.community_id));

        if let Some(ref custom_id) = self.custom_id {
            lines.push(format!("Custom Id:      {}", custom_id));
        }

        if let Some(ref creator) = self.creator_user {
            lines.push(format!("Author:         {}", creator.full_name()));
        }

        if let Some(ref created) = self.creation_timestamp {
            lines.push(format!("Created:        {}", created.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        if let Some(ref state) = self.workflow_state_description {
            lines.push(format!("State:          {}", state));
        }

        if !self.hashtags.is_empty() {
            let names: Vec<&str> = self.hashtags.iter().map(|h| h.name.as_str()).collect();
            lines.push(format!("Hashtags:       {}", names.join(", ")));
        }

        if let Some(ref text) = self.description_plain_text {
            lines.push(String::new());
            lines.push(text.trim().to_string());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for SystemUser {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!(
            "User #{}: {} {}",
            self.id, self.first_name, self.last_name
        ));

        if let Some(ref email) = self.contact_email {
            lines.push(format!("Email:          {}", email));
        }

        let providers: Vec<String> = self.login_providers.iter().map(|p| p.to_string()).collect();
        lines.push(format!("Login:          {}", providers.join(", ")));

        let status = if self.is_active() { "active" } else { "not active" };
        lines.push(format!("Status:         {}", status));

        if let Some(ref last) = self.last_access_timestamp {
            lines.push(format!("Last Access:    {}", last.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for PostDefinition {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Post definition of community {}", self.community_id));

        for field in &self.field_definitions {
            let field_type = field
                .field_type
                .map(|t| t.to_string())
                .unwrap_or_default();
            lines.push(format!(
                "{:<8} {:<30} {}",
                field.id,
                field.label.as_deref().unwrap_or(""),
                field_type
            ));
        }

        if let Some(ref workflow) = self.workflow_definition {
            lines.push(format!(
                "Workflow screen fields: {}",
                workflow.screen_field_metadatas.len()
            ));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Settings {
    fn pretty_print(&self) -> String {
        let mut lines = header("Interacta settings".to_string());
        lines.push(format!("Base URL:       {}", self.base_url));

        let login = match (&self.service_account, &self.username) {
            (Some(account), _) => format!("service account (client {})", account.client_id),
            (None, Some(username)) => format!("credentials ({username}, password ********)"),
            (None, None) => "not configured".to_string(),
        };
        lines.push(format!("Login:          {}", login));
        lines.push(format!("Log API calls:  {}", self.log_api_calls));
        lines.push(format!("Timeout:        {}s", self.timeout.as_secs()));

        for (name, community) in &self.communities {
            lines.push(format!("Community:      {} = {}", name, community.community_id));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_detail_pretty_print_format() {
        let post: PostDetail = serde_json::from_value(serde_json::json!({
            "id": 42,
            "communityId": 1142,
            "title": "Printer broken",
            "hashtags": [{"id": 1, "name": "urgent"}]
        }))
        .unwrap();

        let output = post.pretty_print();
        assert!(output.starts_with("Post #42"));
        assert!(output.contains("Title:          Printer broken"));
        assert!(output.contains("urgent"));
    }

    #[test]
    fn test_settings_pretty_print_hides_password() {
        let settings = Settings::new("https://example.org").with_credentials("user", "hunter2");
        let output = settings.pretty_print();
        assert!(output.contains("https://example.org"));
        assert!(output.contains("user"));
        assert!(!output.contains("hunter2"));
    }
}
