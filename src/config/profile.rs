//! JIRA profile configuration.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{ConfigError, Result};

/// How requests for a profile are authenticated.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    /// HTTP Basic with the profile's username and the keyring token.
    #[default]
    Basic,
    /// Bearer personal access token from the keyring.
    Bearer,
    /// Session cookie whose value is stored in the keyring.
    Cookie,
    /// No credentials.
    Anonymous,
}

/// A JIRA profile configuration.
///
/// Profiles store connection details for a JIRA instance.
/// Tokens are stored separately in the OS keychain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// The name of this profile.
    ///
    /// Must be non-empty and unique across all profiles.
    pub name: String,

    /// The JIRA instance URL (e.g., "https://jira.example.com").
    pub url: String,

    /// The login name used for Basic authentication.
    #[serde(default)]
    pub username: String,

    /// The authentication scheme.
    #[serde(default)]
    pub auth: AuthScheme,
}

impl Profile {
    /// Create a new profile using Basic authentication.
    pub fn new(name: String, url: String, username: String) -> Self {
        Self {
            name,
            url,
            username,
            auth: AuthScheme::Basic,
        }
    }

    /// Validate this profile.
    ///
    /// Checks that:
    /// - The name is non-empty and has no whitespace
    /// - The URL is non-empty and uses http or https
    /// - A username is present when Basic authentication is used
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "profile name cannot be empty".to_string(),
            ));
        }

        if self.name.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "profile name '{}' cannot contain whitespace",
                self.name
            )));
        }

        if self.url.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': URL cannot be empty",
                self.name
            )));
        }

        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': URL must start with http:// or https://",
                self.name
            )));
        }

        if self.auth == AuthScheme::Basic && self.username.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': username cannot be empty with basic auth",
                self.name
            )));
        }

        Ok(())
    }

    /// Build the REST base URI from the instance URL and an API path
    /// such as `rest/api/2/`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` if the result is not a valid URL.
    pub fn rest_base_uri(&self, api_path: &str) -> Result<Url> {
        let joined = format!(
            "{}/{}/",
            self.url.trim_end_matches('/'),
            api_path.trim_matches('/')
        );
        Url::parse(&joined).map_err(|e| {
            ConfigError::ValidationError(format!(
                "profile '{}': invalid URL '{}': {}",
                self.name, joined, e
            ))
        })
    }
}
