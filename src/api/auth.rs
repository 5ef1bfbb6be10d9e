//! Credential providers for JIRA requests.
//!
//! A [`Credentials`] value is handed every outgoing request and attaches
//! whatever authentication data the server expects. Tokens can be kept in
//! the OS keyring instead of the configuration file.

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::{header, RequestBuilder};

use super::error::{RestError, Result};

/// The keyring service name for jira-rest tokens.
const KEYRING_SERVICE: &str = "jira-rest";

/// Attaches authentication data to an outgoing request.
pub trait Credentials: Send + Sync + fmt::Debug {
    /// Add headers, cookies or anything else the server needs to identify the caller.
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder;
}

/// HTTP Basic credentials (username or email plus password or API token).
#[derive(Clone)]
pub struct BasicCredentials {
    /// The login name.
    username: String,
    /// The Base64-encoded authorization header value.
    auth_header: String,
}

impl BasicCredentials {
    /// Create credentials from a username and token.
    ///
    /// The token is immediately encoded and the raw token is not stored.
    pub fn new(username: &str, token: &str) -> Self {
        Self {
            username: username.to_string(),
            auth_header: build_basic_header(username, token),
        }
    }

    /// Create credentials using the token stored in the OS keyring for a profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be retrieved from the keyring.
    pub fn from_keyring(profile_name: &str, username: &str) -> Result<Self> {
        let token = get_token(profile_name)?;
        Ok(Self::new(username, &token))
    }

    /// Get the complete "Basic ..." header value.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }

    /// Get the login name.
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("auth_header", &"<redacted>")
            .finish()
    }
}

impl Credentials for BasicCredentials {
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(header::AUTHORIZATION, &self.auth_header)
    }
}

/// Bearer token credentials (personal access tokens).
#[derive(Clone)]
pub struct BearerCredentials {
    token: String,
}

impl BearerCredentials {
    /// Create bearer credentials from a token.
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

impl fmt::Debug for BearerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerCredentials(<redacted>)")
    }
}

impl Credentials for BearerCredentials {
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }
}

/// Session cookie credentials, e.g. a `JSESSIONID` obtained from a login call.
#[derive(Clone)]
pub struct CookieCredentials {
    name: String,
    value: String,
}

impl CookieCredentials {
    /// Create cookie credentials.
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

impl fmt::Debug for CookieCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieCredentials")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

impl Credentials for CookieCredentials {
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(header::COOKIE, format!("{}={}", self.name, self.value))
    }
}

/// Build the Basic Auth header value.
///
/// Encodes "username:token" in Base64 and prepends "Basic ".
fn build_basic_header(username: &str, token: &str) -> String {
    let credentials = format!("{}:{}", username, token);
    let encoded = BASE64.encode(credentials.as_bytes());
    format!("Basic {}", encoded)
}

/// Store an API token in the OS keyring.
///
/// # Errors
///
/// Returns an error if the token cannot be stored in the keyring.
pub fn store_token(profile_name: &str, token: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, profile_name)
        .map_err(|e| RestError::Keyring(format!("failed to create keyring entry: {}", e)))?;

    entry
        .set_password(token)
        .map_err(|e| RestError::Keyring(format!("failed to store token: {}", e)))?;

    Ok(())
}

/// Retrieve an API token from the OS keyring.
///
/// # Errors
///
/// Returns an error if the token cannot be retrieved from the keyring.
pub fn get_token(profile_name: &str) -> Result<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, profile_name)
        .map_err(|e| RestError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .get_password()
        .map_err(|e| RestError::Keyring(format!("failed to retrieve token: {}", e)))
}

/// Delete an API token from the OS keyring.
///
/// # Errors
///
/// Returns an error if the token cannot be deleted from the keyring.
pub fn delete_token(profile_name: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, profile_name)
        .map_err(|e| RestError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .delete_password()
        .map_err(|e| RestError::Keyring(format!("failed to delete token: {}", e)))?;

    Ok(())
}
