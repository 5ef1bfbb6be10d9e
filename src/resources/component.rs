//! Project components.

use std::fmt;

use serde_json::Value;

use crate::api::field;
use crate::api::resource::{fetch_one, segment, Identity, Resource};
use crate::api::RestClient;
use crate::error::Result;

/// A project component.
#[derive(Debug, Clone)]
pub struct Component {
    identity: Identity,
    client: RestClient,
    name: String,
    description: String,
    assignee_type_valid: bool,
}

impl Component {
    /// Retrieve a component by ID.
    ///
    /// Calls `GET component/{id}`.
    pub async fn get(client: &RestClient, id: &str) -> Result<Self> {
        fetch_one(client, &format!("component/{}", segment(id)), None, "component", id).await
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_assignee_type_valid(&self) -> bool {
        self.assignee_type_valid
    }
}

impl Resource for Component {
    fn from_json(client: &RestClient, json: &Value) -> Self {
        Self {
            identity: Identity::from_json(json),
            client: client.clone(),
            name: field::get_string(json.get("name")),
            description: field::get_string(json.get("description")),
            assignee_type_valid: field::get_bool(json.get("isAssigneeTypeValid")),
        }
    }

    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn client(&self) -> &RestClient {
        &self.client
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
