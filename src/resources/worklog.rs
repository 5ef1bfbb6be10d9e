//! Issue work logs.

use std::fmt;

use serde_json::Value;

use super::User;
use crate::api::field::{self, Timestamp};
use crate::api::resource::{fetch_one, segment, Identity, Resource};
use crate::api::RestClient;
use crate::error::Result;

/// Time logged against an issue.
#[derive(Debug, Clone)]
pub struct WorkLog {
    identity: Identity,
    client: RestClient,
    author: Option<User>,
    comment: String,
    created: Option<Timestamp>,
    updated: Option<Timestamp>,
    update_author: Option<User>,
    started: Option<Timestamp>,
    time_spent: String,
    time_spent_seconds: i64,
}

impl WorkLog {
    /// Retrieve a work log entry.
    ///
    /// Calls `GET issue/{issue}/worklog/{id}`.
    pub async fn get(client: &RestClient, issue: &str, id: &str) -> Result<Self> {
        let path = format!("issue/{}/worklog/{}", segment(issue), segment(id));
        let key = format!("{} on issue {}", id, issue);
        fetch_one(client, &path, None, "work log", &key).await
    }

    pub fn author(&self) -> Option<&User> {
        self.author.as_ref()
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn created(&self) -> Option<&Timestamp> {
        self.created.as_ref()
    }

    pub fn updated(&self) -> Option<&Timestamp> {
        self.updated.as_ref()
    }

    pub fn update_author(&self) -> Option<&User> {
        self.update_author.as_ref()
    }

    /// When the logged work started.
    pub fn started(&self) -> Option<&Timestamp> {
        self.started.as_ref()
    }

    /// Logged time in JIRA's duration notation, e.g. `3h 20m`.
    pub fn time_spent(&self) -> &str {
        &self.time_spent
    }

    pub fn time_spent_seconds(&self) -> i64 {
        self.time_spent_seconds
    }
}

impl Resource for WorkLog {
    fn from_json(client: &RestClient, json: &Value) -> Self {
        Self {
            identity: Identity::from_json(json),
            client: client.clone(),
            author: field::get_resource(json.get("author"), client),
            comment: field::get_string(json.get("comment")),
            created: field::get_date(json.get("created")),
            updated: field::get_date(json.get("updated")),
            // Some servers spell it `updatedAuthor`.
            update_author: field::get_resource(
                json.get("updateAuthor").or_else(|| json.get("updatedAuthor")),
                client,
            ),
            started: field::get_date(json.get("started")),
            time_spent: field::get_string(json.get("timeSpent")),
            time_spent_seconds: field::get_integer(json.get("timeSpentSeconds")),
        }
    }

    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn client(&self) -> &RestClient {
        &self.client
    }
}

impl fmt::Display for WorkLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::fmt_created_by(f, self.created.as_ref(), self.author.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_worklog() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/issue/ABC-1/worklog/100028"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "self": "https://jira.example.com/rest/api/2/issue/10010/worklog/100028",
                "id": "100028",
                "author": {"name": "alice"},
                "updateAuthor": {"name": "alice"},
                "comment": "I did some work here.",
                "created": "2013-10-02T10:00:00.000+0000",
                "updated": "2013-10-02T10:05:00.000+0000",
                "started": "2013-10-02T09:00:00.000+0000",
                "timeSpent": "3h 20m",
                "timeSpentSeconds": 12000
            })))
            .mount(&server)
            .await;

        let client = RestClient::new(&format!("{}/rest/api/2/", server.uri())).unwrap();
        let worklog = WorkLog::get(&client, "ABC-1", "100028").await.unwrap();
        assert_eq!(worklog.comment(), "I did some work here.");
        assert_eq!(worklog.time_spent(), "3h 20m");
        assert_eq!(worklog.time_spent_seconds(), 12000);
        assert_eq!(worklog.started().unwrap().hour(), 9);
        assert_eq!(worklog.author().unwrap().name(), "alice");
        assert_eq!(worklog.update_author().unwrap().name(), "alice");
        assert!(worklog.updated().is_some());
    }

    #[test]
    fn test_worklog_defaults() {
        let client = RestClient::new("https://jira.example.com/rest/api/2/").unwrap();
        let worklog = WorkLog::from_json(&client, &json!({"author": {}}));
        assert!(worklog.author().is_none());
        assert_eq!(worklog.time_spent_seconds(), 0);
        assert_eq!(worklog.comment(), "");
        assert_eq!(worklog.to_string(), " by ");
    }

    #[test]
    fn test_worklog_reads_updated_author_spelling() {
        let client = RestClient::new("https://jira.example.com/rest/api/2/").unwrap();
        let worklog = WorkLog::from_json(
            &client,
            &json!({"id": "7", "updatedAuthor": {"name": "carol"}}),
        );
        assert_eq!(worklog.update_author().unwrap().name(), "carol");

        let worklog = WorkLog::from_json(
            &client,
            &json!({"updateAuthor": {"name": "dave"}, "updatedAuthor": {"name": "carol"}}),
        );
        assert_eq!(worklog.update_author().unwrap().name(), "dave");
    }
}
