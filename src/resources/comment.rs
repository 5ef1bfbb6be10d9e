//! Issue comments.

use std::fmt;

use serde_json::Value;

use super::User;
use crate::api::field::{self, Timestamp};
use crate::api::resource::{fetch_one, segment, Identity, Resource};
use crate::api::RestClient;
use crate::error::Result;

/// A comment on an issue.
#[derive(Debug, Clone)]
pub struct Comment {
    identity: Identity,
    client: RestClient,
    author: Option<User>,
    body: String,
    created: Option<Timestamp>,
    updated: Option<Timestamp>,
    update_author: Option<User>,
}

impl Comment {
    /// Retrieve a comment.
    ///
    /// Calls `GET issue/{issue}/comment/{id}`.
    pub async fn get(client: &RestClient, issue: &str, id: &str) -> Result<Self> {
        let path = format!("issue/{}/comment/{}", segment(issue), segment(id));
        let key = format!("{} on issue {}", id, issue);
        fetch_one(client, &path, None, "comment", &key).await
    }

    pub fn author(&self) -> Option<&User> {
        self.author.as_ref()
    }

    /// The comment text in wiki markup.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn created(&self) -> Option<&Timestamp> {
        self.created.as_ref()
    }

    pub fn updated(&self) -> Option<&Timestamp> {
        self.updated.as_ref()
    }

    /// The user who last edited the comment.
    pub fn update_author(&self) -> Option<&User> {
        self.update_author.as_ref()
    }
}

impl Resource for Comment {
    fn from_json(client: &RestClient, json: &Value) -> Self {
        Self {
            identity: Identity::from_json(json),
            client: client.clone(),
            author: field::get_resource(json.get("author"), client),
            body: field::get_string(json.get("body")),
            created: field::get_date(json.get("created")),
            updated: field::get_date(json.get("updated")),
            // Some servers spell it `updatedAuthor`.
            update_author: field::get_resource(
                json.get("updateAuthor").or_else(|| json.get("updatedAuthor")),
                client,
            ),
        }
    }

    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn client(&self) -> &RestClient {
        &self.client
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::fmt_created_by(f, self.created.as_ref(), self.author.as_ref())
    }
}
