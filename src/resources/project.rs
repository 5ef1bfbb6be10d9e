//! JIRA projects.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use super::{Component, IssueType, User, Version};
use crate::api::field;
use crate::api::resource::{fetch_all, fetch_one, segment, Identity, Resource};
use crate::api::RestClient;
use crate::error::Result;

/// A JIRA project.
///
/// The lead, components, issue types and versions embedded in the project
/// payload are built as entities of their own without further requests.
#[derive(Debug, Clone)]
pub struct Project {
    identity: Identity,
    client: RestClient,
    avatar_urls: HashMap<String, String>,
    key: String,
    name: String,
    description: String,
    lead: Option<User>,
    assignee_type: String,
    components: Vec<Component>,
    issue_types: Vec<IssueType>,
    versions: Vec<Version>,
    roles: HashMap<String, String>,
}

impl Project {
    /// Retrieve a project by key (e.g., "PROJ") or ID.
    ///
    /// Calls `GET project/{key}`.
    pub async fn get(client: &RestClient, key: &str) -> Result<Self> {
        fetch_one(client, &format!("project/{}", segment(key)), None, "project", key).await
    }

    /// Retrieve all projects visible to the current user.
    ///
    /// Calls `GET project`.
    pub async fn get_all(client: &RestClient) -> Result<Vec<Self>> {
        fetch_all(client, "project", "project").await
    }

    /// Avatar URLs keyed by size, e.g. `48x48`.
    pub fn avatar_urls(&self) -> &HashMap<String, String> {
        &self.avatar_urls
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The project lead, if the payload included one.
    pub fn lead(&self) -> Option<&User> {
        self.lead.as_ref()
    }

    pub fn assignee_type(&self) -> &str {
        &self.assignee_type
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn issue_types(&self) -> &[IssueType] {
        &self.issue_types
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    /// Role names mapped to their REST URIs.
    pub fn roles(&self) -> &HashMap<String, String> {
        &self.roles
    }
}

impl Resource for Project {
    fn from_json(client: &RestClient, json: &Value) -> Self {
        let issue_types = json.get("issueTypes").or_else(|| json.get("issuetypes"));

        Self {
            identity: Identity::from_json(json),
            client: client.clone(),
            avatar_urls: field::get_map(json.get("avatarUrls")),
            key: field::get_string(json.get("key")),
            name: field::get_string(json.get("name")),
            description: field::get_string(json.get("description")),
            lead: field::get_resource(json.get("lead"), client),
            assignee_type: field::get_string(json.get("assigneeType")),
            components: field::get_resource_array(json.get("components"), client),
            issue_types: field::get_resource_array(issue_types, client),
            versions: field::get_resource_array(json.get("versions"), client),
            roles: field::get_map(json.get("roles")),
        }
    }

    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn client(&self) -> &RestClient {
        &self.client
    }
}

impl fmt::Display for Project {
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

    use crate::api::RestError;
    use crate::error::JiraError;

    fn client_for(server: &MockServer) -> RestClient {
        RestClient::new(&format!("{}/rest/api/2/", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_get_project_with_versions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/project/ABC"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "key": "ABC",
                "name": "Alpha",
                "versions": [{"name": "1.0", "archived": false, "released": true}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let project = Project::get(&client_for(&server), "ABC").await.unwrap();
        assert_eq!(project.key(), "ABC");
        assert_eq!(project.name(), "Alpha");
        assert_eq!(project.versions().len(), 1);
        assert_eq!(project.versions()[0].name(), "1.0");
        assert!(project.versions()[0].is_released());
        assert!(project.lead().is_none());
    }

    #[tokio::test]
    async fn test_nested_lead_needs_no_second_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/project/ABC"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "10000",
                "key": "ABC",
                "name": "Alpha",
                "lead": {
                    "self": "https://jira.example.com/rest/api/2/user?username=alice",
                    "name": "alice",
                    "displayName": "Alice Example",
                    "active": true
                },
                "components": [{"id": "1", "name": "Backend"}],
                "issueTypes": [{"id": "3", "name": "Task", "subtask": false}],
                "roles": {"Developers": "https://jira.example.com/rest/api/2/project/ABC/role/10001"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let project = Project::get(&client_for(&server), "ABC").await.unwrap();
        let lead = project.lead().unwrap();
        assert_eq!(lead.name(), "alice");
        assert_eq!(lead.display_name(), "Alice Example");
        assert!(lead.is_active());
        assert_eq!(project.components()[0].name(), "Backend");
        assert_eq!(project.issue_types()[0].name(), "Task");
        assert!(project.roles().contains_key("Developers"));
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[test]
    fn test_lowercase_issuetypes_key() {
        let client = RestClient::new("https://jira.example.com/rest/api/2/").unwrap();
        let project = Project::from_json(
            &client,
            &json!({"issuetypes": [{"name": "Bug"}, {"name": "Story"}]}),
        );
        assert_eq!(project.issue_types().len(), 2);
    }

    #[test]
    fn test_empty_payload_gives_defaults() {
        let client = RestClient::new("https://jira.example.com/rest/api/2/").unwrap();
        let project = Project::from_json(&client, &json!({}));
        assert_eq!(project.key(), "");
        assert_eq!(project.description(), "");
        assert!(project.lead().is_none());
        assert!(project.components().is_empty());
        assert!(project.versions().is_empty());
        assert!(project.roles().is_empty());
        assert!(project.avatar_urls().is_empty());
    }

    #[tokio::test]
    async fn test_get_all_unwraps_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/project"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"key": "ABC", "name": "Alpha"},
                {"key": "DEF", "name": "Delta"},
                {"key": "GHI", "name": "Gamma"}
            ])))
            .mount(&server)
            .await;

        let projects = Project::get_all(&client_for(&server)).await.unwrap();
        let keys: Vec<&str> = projects.iter().map(|p| p.key()).collect();
        assert_eq!(keys, vec!["ABC", "DEF", "GHI"]);
    }

    #[tokio::test]
    async fn test_get_all_rejects_object_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/project"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"key": "ABC"})))
            .mount(&server)
            .await;

        let err = Project::get_all(&client_for(&server)).await.unwrap_err();
        match err {
            JiraError::Retrieval { entity, key, source } => {
                assert_eq!(entity, "project");
                assert!(key.is_none());
                assert!(matches!(*source, JiraError::MalformedPayload(_)));
            }
            other => panic!("Expected Retrieval error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_project_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/project/ABC"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let err = Project::get(&client_for(&server), "ABC").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to retrieve project ABC");
        let rest = err.rest_error().unwrap();
        assert_eq!(rest.status(), 500);
        assert_eq!(rest.body(), Some("oops"));
    }

    #[tokio::test]
    async fn test_get_project_without_content_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/project/ABC"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let err = Project::get(&client_for(&server), "ABC").await.unwrap_err();
        assert!(matches!(
            err,
            JiraError::Retrieval { ref source, .. } if matches!(**source, JiraError::MalformedPayload(_))
        ));
    }

    #[tokio::test]
    async fn test_get_project_unreachable_server() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let client = RestClient::new(&format!("http://{}/rest/api/2/", addr)).unwrap();

        let err = Project::get(&client, "ABC").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to retrieve project ABC");
        assert_eq!(err.status(), 0);
        assert!(err.is_recoverable());
        assert!(matches!(
            err,
            JiraError::Retrieval { ref source, .. }
                if matches!(**source, JiraError::Rest(RestError::Network(_)))
        ));
    }
}
