//! Issue link types.

use std::fmt;

use serde_json::Value;

use crate::api::field;
use crate::api::resource::{fetch_one, require_object, segment, Identity, Resource};
use crate::api::RestClient;
use crate::error::{JiraError, Result};

/// A kind of link between two issues, e.g. "Blocks".
#[derive(Debug, Clone)]
pub struct LinkType {
    identity: Identity,
    client: RestClient,
    name: String,
    inward: String,
    outward: String,
}

impl LinkType {
    /// Retrieve an issue link type by ID.
    ///
    /// Calls `GET issueLinkType/{id}`.
    pub async fn get(client: &RestClient, id: &str) -> Result<Self> {
        let path = format!("issueLinkType/{}", segment(id));
        fetch_one(client, &path, None, "issue link type", id).await
    }

    /// Retrieve all issue link types.
    ///
    /// Calls `GET issueLinkType`, which answers `{"issueLinkTypes": [...]}`.
    pub async fn get_all(client: &RestClient) -> Result<Vec<Self>> {
        let json = client
            .get("issueLinkType")
            .await
            .map_err(JiraError::from)
            .and_then(require_object)
            .map_err(|e| JiraError::retrieval("issue link type", None, e))?;

        Ok(field::get_resource_array(json.get("issueLinkTypes"), client))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description from the target's side, e.g. "is blocked by".
    pub fn inward(&self) -> &str {
        &self.inward
    }

    /// Description from the source's side, e.g. "blocks".
    pub fn outward(&self) -> &str {
        &self.outward
    }
}

impl Resource for LinkType {
    fn from_json(client: &RestClient, json: &Value) -> Self {
        Self {
            identity: Identity::from_json(json),
            client: client.clone(),
            name: field::get_string(json.get("name")),
            inward: field::get_string(json.get("inward")),
            outward: field::get_string(json.get("outward")),
        }
    }

    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn client(&self) -> &RestClient {
        &self.client
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
