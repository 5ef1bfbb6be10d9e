//! # jira-rest
//!
//! A client library for the JIRA REST API.
//!
//! The crate is built around two layers that every entity shares:
//!
//! - [`RestClient`] issues authenticated GET/POST/PUT/DELETE requests
//!   (including multipart uploads) against a configured base URI and
//!   normalizes responses into optional JSON objects.
//! - [`api::field`] pulls typed values, nested entities, lists and maps out
//!   of that JSON, falling back to defaults instead of failing.
//!
//! Entities such as [`Project`], [`User`] and [`Version`] live in
//! [`resources`] and are immutable snapshots of one server response.
//!
//! ## Runtime
//!
//! Every network call is an `async fn` built on `reqwest`, so callers need a
//! [tokio](https://docs.rs/tokio) runtime. Each call completes before its
//! future resolves; the crate spawns no background tasks. Callers without an
//! async context can drive a call with
//! `tokio::runtime::Runtime::block_on`.
//!
//! ## Example
//!
//! ```no_run
//! use jira_rest::{BasicCredentials, Project, RestClient};
//!
//! #[tokio::main]
//! async fn main() -> jira_rest::Result<()> {
//!     let client = RestClient::with_credentials(
//!         "https://jira.example.com/rest/api/2/",
//!         BasicCredentials::new("alice", "api-token"),
//!     )?;
//!
//!     let project = Project::get(&client, "ABC").await?;
//!     for version in project.versions() {
//!         println!("{}: released={}", version.name(), version.is_released());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Logging is left to the application. See [`logging`] for an optional
//! rotated-file layer.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod resources;

pub use api::resource::{Identity, Resource};
pub use api::{
    BasicCredentials, BearerCredentials, CookieCredentials, Credentials, Payload, QueryParams,
    RestClient, RestError,
};
pub use error::{JiraError, Result};
pub use resources::{
    Attachment, Comment, Component, IssueType, LinkType, Project, TimeTracking, User, Version,
    WorkLog,
};
