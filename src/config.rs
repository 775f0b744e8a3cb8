//! Client settings.
//!
//! Settings are resolved once, from the environment or from a TOML file, and
//! handed to [`InteractaClient`](crate::InteractaClient). The client never
//! reads the environment itself.

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::ServiceAccount;
use crate::error::{InteractaError, Result};

/// Environment variable holding the portal base URL.
pub const ENV_BASE_URL: &str = "INTERACTA_BASE_URL";
/// Environment variable holding the login username.
pub const ENV_USERNAME: &str = "INTERACTA_USERNAME";
/// Environment variable holding the login password.
pub const ENV_PASSWORD: &str = "INTERACTA_PASSWORD";
/// Environment variable pointing at a service-account JSON file.
pub const ENV_SERVICE_ACCOUNT_FILE: &str = "INTERACTA_SERVICE_ACCOUNT_FILE";
/// Environment variable enabling per-call logging.
pub const ENV_LOG_API_CALLS: &str = "INTERACTA_LOG_API_CALLS";

/// Default transport timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Per-community settings from the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunitySettings {
    /// Community id.
    pub community_id: u64,
    /// Custom field aliases, name to field id.
    #[serde(default)]
    pub custom_fields: BTreeMap<String, u64>,
}

/// Connection and login settings.
#[derive(Clone)]
pub struct Settings {
    /// Portal base URL, e.g. `https://acme.interacta.space`.
    pub base_url: String,
    /// Username for credentials login.
    pub username: Option<String>,
    /// Password for credentials login.
    pub password: Option<String>,
    /// Service account; takes precedence over username/password.
    pub service_account: Option<ServiceAccount>,
    /// Log every API call at `info` level instead of `debug`.
    pub log_api_calls: bool,
    /// Transport timeout.
    pub timeout: Duration,
    /// Named communities.
    pub communities: BTreeMap<String, CommunitySettings>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("service_account", &self.service_account)
            .field("log_api_calls", &self.log_api_calls)
            .field("timeout", &self.timeout)
            .field("communities", &self.communities)
            .finish()
    }
}

/// Layout of the TOML configuration file.
#[derive(Debug, Deserialize)]
struct SettingsFile {
    interacta: InteractaSection,
}

#[derive(Debug, Deserialize)]
struct InteractaSection {
    base_url: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    service_account_file: Option<PathBuf>,
    #[serde(default)]
    log_api_calls: bool,
    #[serde(default)]
    timeout_secs: Option<u64>,
    #[serde(default)]
    communities: BTreeMap<String, CommunitySettings>,
}

impl Settings {
    /// Settings with only a base URL; add a login mode before calling login.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            username: None,
            password: None,
            service_account: None,
            log_api_calls: false,
            timeout: DEFAULT_TIMEOUT,
            communities: BTreeMap::new(),
        }
    }

    /// Set username and password.
    #[must_use]
    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.username = Some(username.to_string());
        self.password = Some(password.to_string());
        self
    }

    /// Set the service account.
    #[must_use]
    pub fn with_service_account(mut self, account: ServiceAccount) -> Self {
        self.service_account = Some(account);
        self
    }

    /// Enable or disable per-call logging.
    #[must_use]
    pub fn with_log_api_calls(mut self, enabled: bool) -> Self {
        self.log_api_calls = enabled;
        self
    }

    /// Load settings from `INTERACTA_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`InteractaError::Config`] if `INTERACTA_BASE_URL` is not set
    /// or the service-account file cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup(ENV_BASE_URL).ok_or_else(|| {
            InteractaError::Config(format!("{ENV_BASE_URL} environment variable not set"))
        })?;

        let service_account = lookup(ENV_SERVICE_ACCOUNT_FILE)
            .filter(|p| !p.is_empty())
            .map(ServiceAccount::from_file)
            .transpose()?;

        let log_api_calls = lookup(ENV_LOG_API_CALLS)
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            username: lookup(ENV_USERNAME),
            password: lookup(ENV_PASSWORD),
            service_account,
            log_api_calls,
            ..Self::new(&base_url)
        })
    }

    /// Load settings from a TOML file with an `[interacta]` table.
    ///
    /// A relative `service_account_file` is resolved against the directory
    /// of the TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`InteractaError::Config`] if the file cannot be read or parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            InteractaError::Config(format!("cannot read settings file '{}': {e}", path.display()))
        })?;
        Self::from_toml_str(&content, path.parent())
    }

    /// Parse settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`InteractaError::Config`] on invalid TOML or an unreadable
    /// service-account file.
    pub fn from_toml_str(content: &str, base_dir: Option<&Path>) -> Result<Self> {
        let file: SettingsFile = toml::from_str(content)
            .map_err(|e| InteractaError::Config(format!("invalid settings file: {e}")))?;
        let section = file.interacta;

        let service_account = section
            .service_account_file
            .map(|p| match base_dir {
                Some(dir) if p.is_relative() => dir.join(p),
                _ => p,
            })
            .map(ServiceAccount::from_file)
            .transpose()?;

        Ok(Self {
            base_url: section.base_url,
            username: section.username,
            password: section.password,
            service_account,
            log_api_calls: section.log_api_calls,
            timeout: section
                .timeout_secs
                .map_or(DEFAULT_TIMEOUT, Duration::from_secs),
            communities: section.communities,
        })
    }

    /// Look up a named community.
    pub fn community(&self, name: &str) -> Option<&CommunitySettings> {
        self.communities.get(name)
    }
}
