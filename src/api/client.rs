//! JIRA REST transport.
//!
//! [`RestClient`] turns a method, a target and a payload into an HTTP call
//! against a configured base URI, authenticates it, and normalizes the
//! response body into an optional JSON object. Entities in
//! [`crate::resources`] are built on top of it.

use std::path::PathBuf;
use std::sync::Arc;

use hyper::ext::ReasonPhrase;
use indexmap::IndexMap;
use reqwest::multipart::{Form, Part};
use reqwest::{header, Client, Method, RequestBuilder};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};
use url::Url;

use super::auth::{BasicCredentials, BearerCredentials, CookieCredentials, Credentials};
use super::error::{RestError, Result};
use crate::config::{AuthScheme, Profile, Settings};

/// Header that tells JIRA to skip its XSRF token check on attachment uploads.
const XSRF_HEADER: &str = "X-Atlassian-Token";

/// Session cookie name used by JIRA server.
const SESSION_COOKIE: &str = "JSESSIONID";

/// Key under which a top-level JSON array response is stored.
pub const ARRAY_KEY: &str = "array";

/// Query parameters, sent in insertion order. Inserting a key twice keeps
/// its first position and the last value.
pub type QueryParams = IndexMap<String, String>;

/// The body of an outgoing request.
#[derive(Debug, Clone, Default)]
pub enum Payload {
    /// No body.
    #[default]
    Empty,
    /// A JSON document sent as `application/json`.
    Json(Value),
    /// A raw string, sent wrapped in double quotes.
    ///
    /// Some JIRA endpoints expect a bare JSON string rather than a JSON
    /// value, and accept it without escaping. The string is quoted verbatim;
    /// pass only values that are safe to embed between quotes. An empty
    /// string is sent as no body at all.
    Raw(String),
    /// A file uploaded as the single `file` field of a multipart form.
    File(PathBuf),
}

/// The JIRA REST transport.
///
/// Holds the base URI every relative path is resolved against, the HTTP
/// client, and optional credentials. Cloning is cheap and clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct RestClient {
    /// The HTTP client.
    http: Client,
    /// The base URI, e.g. `https://jira.example.com/rest/api/2/`.
    base_uri: Url,
    /// Credentials applied to every request.
    credentials: Option<Arc<dyn Credentials>>,
}

impl RestClient {
    /// Create an anonymous client for the given base URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URI cannot be parsed.
    pub fn new(base_uri: &str) -> Result<Self> {
        Ok(Self::with_http_client(
            Client::new(),
            parse_base_uri(base_uri)?,
            None,
        ))
    }

    /// Create a client that authenticates every request with `credentials`.
    pub fn with_credentials(
        base_uri: &str,
        credentials: impl Credentials + 'static,
    ) -> Result<Self> {
        Ok(Self::with_http_client(
            Client::new(),
            parse_base_uri(base_uri)?,
            Some(Arc::new(credentials)),
        ))
    }

    /// Create a client around an existing HTTP client.
    pub fn with_http_client(
        http: Client,
        base_uri: Url,
        credentials: Option<Arc<dyn Credentials>>,
    ) -> Self {
        Self {
            http,
            base_uri,
            credentials,
        }
    }

    /// Create a client from a configuration profile.
    ///
    /// Tokens for `basic` and `bearer` profiles are read from the OS keyring.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is invalid or its token cannot be
    /// retrieved from the keyring.
    #[instrument(skip(profile, settings), fields(profile_name = %profile.name))]
    pub fn from_profile(profile: &Profile, settings: &Settings) -> crate::Result<Self> {
        profile.validate()?;
        let base_uri = profile.rest_base_uri(&settings.api_path)?;

        let credentials: Option<Arc<dyn Credentials>> = match profile.auth {
            AuthScheme::Basic => Some(Arc::new(BasicCredentials::from_keyring(
                &profile.name,
                &profile.username,
            )?)),
            AuthScheme::Bearer => Some(Arc::new(BearerCredentials::new(
                &super::auth::get_token(&profile.name)?,
            ))),
            AuthScheme::Cookie => Some(Arc::new(CookieCredentials::new(
                SESSION_COOKIE,
                &super::auth::get_token(&profile.name)?,
            ))),
            AuthScheme::Anonymous => None,
        };

        debug!(base_uri = %base_uri, "Created REST client for profile");
        Ok(Self::with_http_client(Client::new(), base_uri, credentials))
    }

    /// Get the base URI.
    pub fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    /// Check whether requests are authenticated.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Build a full URI from a path and optional query parameters.
    ///
    /// Absolute `http://` or `https://` targets are used as given. Relative
    /// paths are appended to the base URI's path. A query string already in
    /// the path is kept, and `params` are appended after it, percent-encoded.
    pub fn build_uri(&self, path: &str, params: Option<&QueryParams>) -> Result<Url> {
        let mut uri = if is_absolute(path) {
            Url::parse(path).map_err(|e| RestError::InvalidUrl(format!("{}: {}", path, e)))?
        } else {
            let (path, query) = match path.split_once('?') {
                Some((p, q)) => (p, Some(q)),
                None => (path, None),
            };
            let mut uri = self.base_uri.clone();
            uri.set_path(&join_path(self.base_uri.path(), path));
            uri.set_query(query);
            uri.set_fragment(None);
            uri
        };

        if let Some(params) = params.filter(|p| !p.is_empty()) {
            let mut pairs = uri.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }

        Ok(uri)
    }

    /// Execute a request and parse the response.
    ///
    /// Returns `None` when the response has no JSON object or array body.
    /// A top-level JSON array is returned as `{"array": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] for any status code of 300 or above, and
    /// other variants when the request cannot be built, sent or parsed.
    #[instrument(skip_all, fields(method = %method, target = %target))]
    pub async fn execute(
        &self,
        method: Method,
        target: &str,
        params: Option<&QueryParams>,
        payload: Payload,
    ) -> Result<Option<Value>> {
        let uri = self.build_uri(target, params)?;
        debug!(uri = %uri, "Sending request");

        let request = self
            .http
            .request(method, uri)
            .header(header::ACCEPT, "application/json");
        let request = attach_payload(request, payload).await?;
        let request = match &self.credentials {
            Some(credentials) => credentials.authenticate(request),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        // hyper only records the phrase when it differs from the standard one.
        let reason = response
            .extensions()
            .get::<ReasonPhrase>()
            .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
            .map(str::to_string);
        let body = response.text().await?;

        if status.as_u16() >= 300 {
            debug!(status = status.as_u16(), "Error response body: {}", body);
            return Err(RestError::from_response(status, reason.as_deref(), body));
        }

        parse_body(&body)
    }

    /// Perform a GET request.
    pub async fn get(&self, path: &str) -> Result<Option<Value>> {
        self.execute(Method::GET, path, None, Payload::Empty).await
    }

    /// Perform a GET request with query parameters.
    pub async fn get_with_params(
        &self,
        path: &str,
        params: Option<&QueryParams>,
    ) -> Result<Option<Value>> {
        self.execute(Method::GET, path, params, Payload::Empty).await
    }

    /// Perform a POST request with a JSON body.
    pub async fn post(&self, path: &str, payload: &Value) -> Result<Option<Value>> {
        self.execute(Method::POST, path, None, Payload::Json(payload.clone()))
            .await
    }

    /// Perform a POST request whose body is a quoted raw string.
    ///
    /// See [`Payload::Raw`]. Only use this for endpoints that expect a bare
    /// string instead of proper JSON.
    pub async fn post_raw(&self, path: &str, payload: &str) -> Result<Option<Value>> {
        self.execute(Method::POST, path, None, Payload::Raw(payload.to_string()))
            .await
    }

    /// Upload a file as a multipart POST.
    pub async fn post_file(&self, path: &str, file: impl Into<PathBuf>) -> Result<Option<Value>> {
        self.execute(Method::POST, path, None, Payload::File(file.into()))
            .await
    }

    /// Perform a PUT request with a JSON body.
    pub async fn put(&self, path: &str, payload: &Value) -> Result<Option<Value>> {
        self.execute(Method::PUT, path, None, Payload::Json(payload.clone()))
            .await
    }

    /// Perform a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<Option<Value>> {
        self.execute(Method::DELETE, path, None, Payload::Empty).await
    }
}

/// Parse and validate a base URI.
fn parse_base_uri(base_uri: &str) -> Result<Url> {
    let uri =
        Url::parse(base_uri).map_err(|e| RestError::InvalidUrl(format!("{}: {}", base_uri, e)))?;

    if uri.cannot_be_a_base() {
        return Err(RestError::InvalidUrl(format!(
            "{}: not usable as a base URI",
            base_uri
        )));
    }

    // Warn if not HTTPS (but don't enforce for local testing)
    let local = matches!(uri.host_str(), Some("localhost") | Some("127.0.0.1"));
    if uri.scheme() != "https" && !local {
        warn!(
            "URL does not use HTTPS: {}. This is insecure for production use.",
            base_uri
        );
    }

    Ok(uri)
}

fn is_absolute(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

/// Join a base path and a relative path with exactly one slash between them.
fn join_path(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

/// Attach the request body and the headers it requires.
async fn attach_payload(request: RequestBuilder, payload: Payload) -> Result<RequestBuilder> {
    let request = match payload {
        Payload::Empty => request,
        Payload::Json(json) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(json.to_string()),
        Payload::Raw(raw) if raw.is_empty() => request,
        Payload::Raw(raw) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(format!("\"{}\"", raw)),
        Payload::File(path) => {
            let file_error = |source: std::io::Error| RestError::File {
                path: path.clone(),
                source,
            };
            let file = tokio::fs::File::open(&path).await.map_err(file_error)?;
            let size = file.metadata().await.map_err(file_error)?.len();
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "file".to_string());
            debug!(file = %file_name, size, "Attaching multipart file");

            let part = Part::stream_with_length(file, size).file_name(file_name);
            let form = Form::new().part("file", part);
            request.header(XSRF_HEADER, "nocheck").multipart(form)
        }
    };
    Ok(request)
}

/// Normalize a response body.
///
/// Empty bodies and JSON scalars yield `None`, objects are returned as-is,
/// and arrays are wrapped as `{"array": [...]}`.
pub(crate) fn parse_body(body: &str) -> Result<Option<Value>> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    let json: Value =
        serde_json::from_str(body).map_err(|e| RestError::MalformedBody(e.to_string()))?;

    match json {
        Value::Object(_) => Ok(Some(json)),
        Value::Array(items) => {
            let mut wrapper = Map::new();
            wrapper.insert(ARRAY_KEY.to_string(), Value::Array(items));
            Ok(Some(Value::Object(wrapper)))
        }
        other => {
            debug!("Ignoring non-object response body: {}", other);
            Ok(None)
        }
    }
}
