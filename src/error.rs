//! Centralized error types for jira-rest.
//!
//! Transport failures ([`RestError`]) and configuration failures
//! ([`ConfigError`]) are aggregated here together with the failures raised
//! by the entity layer.

use thiserror::Error;

use crate::api::RestError;
use crate::config::ConfigError;

/// The main error type.
#[derive(Debug, Error)]
pub enum JiraError {
    /// The REST transport failed.
    #[error(transparent)]
    Rest(#[from] RestError),

    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// The response JSON was present but not of the expected shape.
    #[error("JSON payload is malformed: {0}")]
    MalformedPayload(String),

    /// An entity could not be retrieved.
    #[error("Failed to retrieve {}", describe(.entity, .key))]
    Retrieval {
        /// The kind of entity, e.g. "project".
        entity: &'static str,
        /// The lookup key, or `None` when listing all entities.
        key: Option<String>,
        /// The underlying failure.
        #[source]
        source: Box<JiraError>,
    },

    /// A mutation call on an entity failed.
    #[error("Failed to {action}")]
    Operation {
        /// What was being attempted.
        action: String,
        /// The underlying transport failure.
        #[source]
        source: RestError,
    },
}

fn describe(entity: &str, key: &Option<String>) -> String {
    match key {
        Some(key) => format!("{} {}", entity, key),
        None => format!("{} list", entity),
    }
}

impl JiraError {
    /// Wrap a failure as a retrieval failure for `entity` and `key`.
    pub fn retrieval(entity: &'static str, key: Option<&str>, source: JiraError) -> Self {
        JiraError::Retrieval {
            entity,
            key: key.map(str::to_string),
            source: Box::new(source),
        }
    }

    /// Find the transport error at the root of this error, if any.
    pub fn rest_error(&self) -> Option<&RestError> {
        match self {
            JiraError::Rest(e) => Some(e),
            JiraError::Operation { source, .. } => Some(source),
            JiraError::Retrieval { source, .. } => source.rest_error(),
            _ => None,
        }
    }

    /// The HTTP status code behind this error, or 0 if there is none.
    pub fn status(&self) -> u16 {
        self.rest_error().map_or(0, RestError::status)
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            JiraError::Retrieval {
                entity,
                key,
                source,
            } if source.status() == 404 => {
                format!("{} was not found.", capitalize(&describe(entity, key)))
            }
            JiraError::Retrieval { source, .. } => {
                format!("{}: {}", self, source.user_message())
            }
            JiraError::Rest(e) => match e {
                RestError::Http { status: 401, .. } => {
                    "Authentication failed. Please check your username and API token.".to_string()
                }
                RestError::Http { status: 403, .. } => {
                    "Access denied. You don't have permission to access this resource.".to_string()
                }
                RestError::Http { status, .. } if *status >= 500 => {
                    "JIRA server error. Please try again later.".to_string()
                }
                RestError::Http { .. } => {
                    let messages = e.error_messages();
                    if messages.is_empty() {
                        e.to_string()
                    } else {
                        messages.join(", ")
                    }
                }
                RestError::Network(_) => {
                    "Connection failed. Please check your network and JIRA URL.".to_string()
                }
                RestError::MalformedBody(_) | RestError::InvalidUrl(_) | RestError::File { .. } => {
                    e.to_string()
                }
                RestError::Keyring(_) => {
                    "Could not access secure storage. Please store the token again.".to_string()
                }
            },
            JiraError::Config(e) => e.to_string(),
            JiraError::MalformedPayload(_) => {
                "Unexpected response from JIRA. Please try again.".to_string()
            }
            JiraError::Operation { action, source } => {
                format!("Failed to {}: {}", action, source)
            }
        }
    }

    /// Check if this error is recoverable.
    ///
    /// Recoverable errors may succeed if the call is made again later.
    pub fn is_recoverable(&self) -> bool {
        match self {
            JiraError::Rest(RestError::Network(_)) => true,
            JiraError::Retrieval { source, .. } => source.is_recoverable(),
            _ => matches!(self.status(), 429 | 500..=599),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Result type for jira-rest operations.
pub type Result<T> = std::result::Result<T, JiraError>;
