//! Transport error types for the REST client.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised by the REST transport.
///
/// HTTP-level failures and failures to execute the request at all surface
/// through the same type; [`RestError::status`] tells them apart.
#[derive(Debug, Error)]
pub enum RestError {
    /// The server answered with a status code of 300 or above.
    #[error("HTTP {status} {reason}")]
    Http {
        /// The numeric status code.
        status: u16,
        /// The reason phrase for the status code.
        reason: String,
        /// The raw response body, kept for diagnostics.
        body: String,
    },

    /// Network or protocol error while sending the request or reading the body.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    /// The target could not be turned into a URI.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A file to upload could not be read.
    #[error("Cannot read {}: {source}", path.display())]
    File {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Keyring error when storing/retrieving tokens.
    #[error("Keyring error: {0}")]
    Keyring(String),
}

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, RestError>;

impl RestError {
    /// Create an error from an HTTP status code and the raw response body,
    /// using the standard reason phrase for the code.
    pub fn from_status(status: StatusCode, body: impl Into<String>) -> Self {
        Self::from_response(status, None, body)
    }

    /// Create an error from the status line the server sent.
    ///
    /// `reason` is the server's own phrase. When it is missing or blank the
    /// standard phrase for the code is used, and `"Unknown"` for codes that
    /// have none.
    pub fn from_response(status: StatusCode, reason: Option<&str>, body: impl Into<String>) -> Self {
        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .or_else(|| status.canonical_reason())
            .unwrap_or("Unknown");

        RestError::Http {
            status: status.as_u16(),
            reason: reason.to_string(),
            body: body.into(),
        }
    }

    /// The HTTP status code, or 0 when the failure happened below HTTP.
    pub fn status(&self) -> u16 {
        match self {
            RestError::Http { status, .. } => *status,
            _ => 0,
        }
    }

    /// The reason phrase for HTTP failures.
    pub fn reason(&self) -> Option<&str> {
        match self {
            RestError::Http { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// The raw response body for HTTP failures.
    pub fn body(&self) -> Option<&str> {
        match self {
            RestError::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Check if the server rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == 401
    }

    /// Check if the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == 404
    }

    /// Extract JIRA's error messages from an HTTP failure body.
    ///
    /// JIRA reports failures as `{"errorMessages": [...], "errors": {...}}`.
    /// Returns an empty list when the body carries neither.
    pub fn error_messages(&self) -> Vec<String> {
        let Some(body) = self.body() else {
            return Vec::new();
        };
        let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
            return Vec::new();
        };

        let mut messages: Vec<String> = json
            .get("errorMessages")
            .and_then(|m| m.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if let Some(errors) = json.get("errors").and_then(|e| e.as_object()) {
            messages.extend(errors.iter().map(|(k, v)| match v.as_str() {
                Some(s) => format!("{}: {}", k, s),
                None => format!("{}: {}", k, v),
            }));
        }

        messages
    }
}
