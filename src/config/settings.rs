//! Client-wide settings.

use serde::{Deserialize, Serialize};

/// Default REST API path relative to the instance URL.
pub const DEFAULT_API_PATH: &str = "rest/api/2/";

/// Settings shared by all profiles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// The name of the default profile to use.
    pub default_profile: Option<String>,
    /// The REST API path appended to every profile URL.
    pub api_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_profile: None,
            api_path: DEFAULT_API_PATH.to_string(),
        }
    }
}
