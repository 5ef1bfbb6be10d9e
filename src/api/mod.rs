//! JIRA REST transport and JSON marshalling.
//!
//! This module provides the HTTP layer shared by every entity, the
//! credential providers it authenticates with, and the field extractors
//! entities are deserialized through.

mod auth;
mod client;
mod error;
pub mod field;
pub mod resource;

pub use auth::{
    delete_token, get_token, store_token, BasicCredentials, BearerCredentials, CookieCredentials,
    Credentials,
};
pub use client::{Payload, QueryParams, RestClient, ARRAY_KEY};
pub use error::RestError;
