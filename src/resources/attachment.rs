//! Issue attachments.

use std::fmt;
use std::path::Path;

use serde_json::Value;
use tracing::{info, instrument};

use super::User;
use crate::api::field::{self, Timestamp};
use crate::api::resource::{fetch_one, require_array, segment, Identity, Resource};
use crate::api::RestClient;
use crate::error::{JiraError, Result};

/// A file attached to an issue.
#[derive(Debug, Clone)]
pub struct Attachment {
    identity: Identity,
    client: RestClient,
    filename: String,
    author: Option<User>,
    created: Option<Timestamp>,
    size: i64,
    mime_type: String,
    content_url: String,
}

impl Attachment {
    /// Retrieve attachment metadata by ID.
    ///
    /// Calls `GET attachment/{id}`.
    pub async fn get(client: &RestClient, id: &str) -> Result<Self> {
        fetch_one(client, &format!("attachment/{}", segment(id)), None, "attachment", id).await
    }

    /// Upload a file to an issue.
    ///
    /// Calls `POST issue/{issue}/attachments` with a multipart body and
    /// returns the attachments the server created.
    #[instrument(skip_all, fields(issue = %issue))]
    pub async fn upload(
        client: &RestClient,
        issue: &str,
        file: impl AsRef<Path>,
    ) -> Result<Vec<Self>> {
        let path = format!("issue/{}/attachments", segment(issue));
        let result = client
            .post_file(&path, file.as_ref())
            .await
            .map_err(|source| JiraError::Operation {
                action: format!("upload attachment to issue {}", issue),
                source,
            })?;

        let items = require_array(result)?;
        let attachments: Vec<Self> = field::get_resource_array(Some(&items), client);
        info!(count = attachments.len(), "Uploaded attachment");
        Ok(attachments)
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn author(&self) -> Option<&User> {
        self.author.as_ref()
    }

    pub fn created(&self) -> Option<&Timestamp> {
        self.created.as_ref()
    }

    /// Size in bytes.
    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// URL of the file contents.
    pub fn content_url(&self) -> &str {
        &self.content_url
    }
}

impl Resource for Attachment {
    fn from_json(client: &RestClient, json: &Value) -> Self {
        Self {
            identity: Identity::from_json(json),
            client: client.clone(),
            filename: field::get_string(json.get("filename")),
            author: field::get_resource(json.get("author"), client),
            created: field::get_date(json.get("created")),
            size: field::get_integer(json.get("size")),
            mime_type: field::get_string(json.get("mimeType")),
            content_url: field::get_string(json.get("content")),
        }
    }

    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn client(&self) -> &RestClient {
        &self.client
    }
}

impl fmt::Display for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filename)
    }
}
