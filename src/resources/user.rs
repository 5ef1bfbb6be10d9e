//! JIRA users.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::api::field;
use crate::api::resource::{fetch_one, Identity, Resource};
use crate::api::{QueryParams, RestClient};
use crate::error::Result;

/// A JIRA user.
#[derive(Debug, Clone)]
pub struct User {
    identity: Identity,
    client: RestClient,
    active: bool,
    avatar_urls: HashMap<String, String>,
    display_name: String,
    email: String,
    name: String,
}

impl User {
    /// Retrieve a user by login name.
    ///
    /// Calls `GET user?username={username}`.
    pub async fn get(client: &RestClient, username: &str) -> Result<Self> {
        let mut params = QueryParams::new();
        params.insert("username".to_string(), username.to_string());
        fetch_one(client, "user", Some(&params), "user", username).await
    }

    /// Whether the account is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Avatar URLs keyed by size, e.g. `48x48`.
    pub fn avatar_urls(&self) -> &HashMap<String, String> {
        &self.avatar_urls
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// The login name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Resource for User {
    fn from_json(client: &RestClient, json: &Value) -> Self {
        // Older servers send `email`, newer ones `emailAddress`.
        let email = match json.get("email") {
            Some(email) => field::get_string(Some(email)),
            None => field::get_string(json.get("emailAddress")),
        };

        Self {
            identity: Identity::from_json(json),
            client: client.clone(),
            active: field::get_bool(json.get("active")),
            avatar_urls: field::get_map(json.get("avatarUrls")),
            display_name: field::get_string(json.get("displayName")),
            email,
            name: field::get_string(json.get("name")),
        }
    }

    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn client(&self) -> &RestClient {
        &self.client
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> RestClient {
        RestClient::new("https://jira.example.com/rest/api/2/").unwrap()
    }

    #[test]
    fn test_parse_user() {
        let user = User::from_json(
            &client(),
            &json!({
                "self": "https://jira.example.com/rest/api/2/user?username=alice",
                "name": "alice",
                "emailAddress": "alice@example.com",
                "avatarUrls": {"48x48": "https://jira.example.com/a48.png"},
                "displayName": "Alice Example",
                "active": true
            }),
        );
        assert_eq!(user.name(), "alice");
        assert_eq!(user.email(), "alice@example.com");
        assert_eq!(user.display_name(), "Alice Example");
        assert!(user.is_active());
        assert_eq!(user.avatar_urls()["48x48"], "https://jira.example.com/a48.png");
        assert_eq!(
            user.self_uri(),
            "https://jira.example.com/rest/api/2/user?username=alice"
        );
        assert_eq!(user.to_string(), "alice");
    }

    #[test]
    fn test_email_key_takes_precedence() {
        let user = User::from_json(
            &client(),
            &json!({"email": "old@example.com", "emailAddress": "new@example.com"}),
        );
        assert_eq!(user.email(), "old@example.com");
    }

    #[test]
    fn test_parse_null_user() {
        let user = User::from_json(&client(), &Value::Null);
        assert_eq!(user.name(), "");
        assert_eq!(user.id(), "");
        assert!(!user.is_active());
        assert!(user.avatar_urls().is_empty());
    }

    #[tokio::test]
    async fn test_get_user_by_username() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/user"))
            .and(query_param("username", "bob smith"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"name": "bob smith", "displayName": "Bob"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = RestClient::new(&format!("{}/rest/api/2/", server.uri())).unwrap();
        let user = User::get(&client, "bob smith").await.unwrap();
        assert_eq!(user.display_name(), "Bob");
    }

    #[tokio::test]
    async fn test_get_missing_user_names_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/user"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = RestClient::new(&format!("{}/rest/api/2/", server.uri())).unwrap();
        let err = User::get(&client, "ghost").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to retrieve user ghost");
        assert_eq!(err.status(), 404);
    }
}
