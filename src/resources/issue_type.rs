//! Issue types.

use std::fmt;

use serde_json::Value;

use crate::api::field;
use crate::api::resource::{fetch_one, segment, Identity, Resource};
use crate::api::RestClient;
use crate::error::Result;

/// An issue type (Bug, Story, Task, ...).
#[derive(Debug, Clone)]
pub struct IssueType {
    identity: Identity,
    client: RestClient,
    name: String,
    description: String,
    icon_url: String,
    subtask: bool,
}

impl IssueType {
    /// Retrieve an issue type by ID.
    ///
    /// Calls `GET issuetype/{id}`.
    pub async fn get(client: &RestClient, id: &str) -> Result<Self> {
        fetch_one(client, &format!("issuetype/{}", segment(id)), None, "issue type", id).await
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn icon_url(&self) -> &str {
        &self.icon_url
    }

    /// Whether issues of this type are sub-tasks.
    pub fn is_subtask(&self) -> bool {
        self.subtask
    }
}

impl Resource for IssueType {
    fn from_json(client: &RestClient, json: &Value) -> Self {
        Self {
            identity: Identity::from_json(json),
            client: client.clone(),
            name: field::get_string(json.get("name")),
            description: field::get_string(json.get("description")),
            icon_url: field::get_string(json.get("iconUrl")),
            subtask: field::get_bool(json.get("subtask")),
        }
    }

    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn client(&self) -> &RestClient {
        &self.client
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_issue_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/issuetype/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "5",
                "name": "Sub-task",
                "description": "The sub-task of the issue",
                "iconUrl": "https://jira.example.com/images/icons/issuetypes/subtask.png",
                "subtask": true
            })))
            .mount(&server)
            .await;

        let client = RestClient::new(&format!("{}/rest/api/2/", server.uri())).unwrap();
        let issue_type = IssueType::get(&client, "5").await.unwrap();
        assert_eq!(issue_type.name(), "Sub-task");
        assert!(issue_type.is_subtask());
        assert!(issue_type.icon_url().ends_with("subtask.png"));
        assert_eq!(issue_type.to_string(), "Sub-task");
    }
}
