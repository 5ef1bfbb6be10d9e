//! Project versions (releases).

use std::fmt;

use serde_json::{json, Value};
use tracing::{debug, instrument};

use super::Project;
use crate::api::field;
use crate::api::resource::{fetch_one, segment, Identity, Resource};
use crate::api::RestClient;
use crate::error::{JiraError, Result};

/// A product version.
#[derive(Debug, Clone)]
pub struct Version {
    identity: Identity,
    client: RestClient,
    name: String,
    archived: bool,
    released: bool,
    release_date: String,
    description: String,
}

impl Version {
    /// Retrieve a version by its internal ID.
    ///
    /// Calls `GET version/{id}`.
    pub async fn get(client: &RestClient, id: &str) -> Result<Self> {
        fetch_one(client, &format!("version/{}", segment(id)), None, "version", id).await
    }

    /// Overwrite this version on the server with the attributes of `other`.
    ///
    /// Calls `PUT version/{id}`. This snapshot is not updated; fetch the
    /// version again to see the result.
    #[instrument(skip_all, fields(version_id = %self.id()))]
    pub async fn merge_with(&self, other: &Version) -> Result<()> {
        let payload = other.payload();
        self.client
            .put(&format!("version/{}", segment(self.id())), &payload)
            .await
            .map_err(|source| JiraError::Operation {
                action: format!("merge version {}", self.id()),
                source,
            })?;

        debug!("Merged version");
        Ok(())
    }

    /// Create a copy of this version in another project.
    ///
    /// Calls `POST version/`.
    #[instrument(skip_all, fields(version_id = %self.id(), project = %project.key()))]
    pub async fn copy_to(&self, project: &Project) -> Result<()> {
        let mut payload = self.payload();
        payload["project"] = json!(project.key());
        payload["projectId"] = json!(project.id());

        self.client
            .post("version/", &payload)
            .await
            .map_err(|source| JiraError::Operation {
                action: format!("copy version to project '{}'", project.key()),
                source,
            })?;

        debug!("Copied version");
        Ok(())
    }

    /// The writable attributes as a request body. An empty release date is left out.
    fn payload(&self) -> Value {
        let mut payload = json!({
            "description": self.description,
            "name": self.name,
            "archived": self.archived,
            "released": self.released,
        });
        if !self.release_date.is_empty() {
            payload["releaseDate"] = json!(self.release_date);
        }
        payload
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_archived(&self) -> bool {
        self.archived
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// The release date as sent by the server, e.g. `2014-03-01`.
    pub fn release_date(&self) -> &str {
        &self.release_date
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Resource for Version {
    fn from_json(client: &RestClient, json: &Value) -> Self {
        Self {
            identity: Identity::from_json(json),
            client: client.clone(),
            name: field::get_string(json.get("name")),
            archived: field::get_bool(json.get("archived")),
            released: field::get_bool(json.get("released")),
            release_date: field::get_string(json.get("releaseDate")),
            description: field::get_string(json.get("description")),
        }
    }

    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn client(&self) -> &RestClient {
        &self.client
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> RestClient {
        RestClient::new(&format!("{}/rest/api/2/", server.uri())).unwrap()
    }

    #[test]
    fn test_parse_version() {
        let client = RestClient::new("https://jira.example.com/rest/api/2/").unwrap();
        let version = Version::from_json(
            &client,
            &json!({"name": "3.0", "archived": false, "released": true}),
        );
        assert_eq!(version.name(), "3.0");
        assert!(!version.is_archived());
        assert!(version.is_released());
        assert_eq!(version.release_date(), "");
        assert_eq!(version.to_string(), "3.0");
    }

    #[test]
    fn test_payload_skips_empty_release_date() {
        let client = RestClient::new("https://jira.example.com/rest/api/2/").unwrap();
        let version = Version::from_json(&client, &json!({"name": "1.0"}));
        assert!(version.payload().get("releaseDate").is_none());

        let version = Version::from_json(
            &client,
            &json!({"name": "1.0", "releaseDate": "2014-03-01"}),
        );
        assert_eq!(version.payload()["releaseDate"], "2014-03-01");
    }

    #[tokio::test]
    async fn test_get_version() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/version/10200"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "self": "https://jira.example.com/rest/api/2/version/10200",
                "id": "10200",
                "description": "First release",
                "name": "1.0",
                "archived": false,
                "released": true,
                "releaseDate": "2014-03-01"
            })))
            .mount(&server)
            .await;

        let version = Version::get(&client_for(&server), "10200").await.unwrap();
        assert_eq!(version.id(), "10200");
        assert_eq!(version.description(), "First release");
        assert_eq!(version.release_date(), "2014-03-01");
    }

    #[tokio::test]
    async fn test_merge_with_puts_other_attributes() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/rest/api/2/version/10"))
            .and(body_json(json!({
                "description": "renamed",
                "name": "1.1",
                "archived": true,
                "released": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "10"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let current = Version::from_json(&client, &json!({"id": "10", "name": "1.0"}));
        let other = Version::from_json(
            &client,
            &json!({"name": "1.1", "description": "renamed", "archived": true}),
        );
        current.merge_with(&other).await.unwrap();
        assert_eq!(current.name(), "1.0");
    }

    #[tokio::test]
    async fn test_copy_to_posts_with_project() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/api/2/version/"))
            .and(body_json(json!({
                "description": "",
                "name": "2.0",
                "archived": false,
                "released": true,
                "project": "DEST",
                "projectId": "10001"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "11"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let version = Version::from_json(&client, &json!({"name": "2.0", "released": true}));
        let project = Project::from_json(&client, &json!({"id": "10001", "key": "DEST"}));
        version.copy_to(&project).await.unwrap();
    }

    #[tokio::test]
    async fn test_merge_failure_is_operation_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/rest/api/2/version/10"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let current = Version::from_json(&client, &json!({"id": "10"}));
        let err = current.merge_with(&current).await.unwrap_err();
        assert!(matches!(err, JiraError::Operation { .. }));
        assert_eq!(err.to_string(), "Failed to merge version 10");
        assert_eq!(err.status(), 400);
    }
}
