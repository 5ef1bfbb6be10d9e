//! Shared identity and retrieval plumbing for JIRA entities.

use serde_json::Value;
use tracing::debug;

use super::client::{QueryParams, RestClient, ARRAY_KEY};
use super::field;
use crate::error::{JiraError, Result};

/// The identity every JIRA entity carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    /// Canonical URI of the resource (`self`).
    pub self_uri: String,
    /// Provider-assigned identifier, unique within its resource type.
    pub id: String,
}

impl Identity {
    /// Read `self` and `id` from a JSON object.
    pub fn from_json(json: &Value) -> Self {
        Self {
            self_uri: field::get_string(json.get("self")),
            id: field::get_string(json.get("id")),
        }
    }
}

/// An entity deserialized from a JSON payload.
///
/// Construction never fails: `null` or an empty object yields an entity
/// with default field values.
pub trait Resource: Sized {
    /// Build the entity from JSON, keeping `client` for later calls.
    fn from_json(client: &RestClient, json: &Value) -> Self;

    /// The entity's identity.
    fn identity(&self) -> &Identity;

    /// The client this entity was loaded with.
    fn client(&self) -> &RestClient;

    /// The provider-assigned identifier.
    fn id(&self) -> &str {
        &self.identity().id
    }

    /// The canonical resource URI.
    fn self_uri(&self) -> &str {
        &self.identity().self_uri
    }
}

/// Percent-encode a key for use as a single path segment.
pub(crate) fn segment(key: &str) -> String {
    urlencoding::encode(key).into_owned()
}

/// Require a transport result to be a JSON object.
pub(crate) fn require_object(result: Option<Value>) -> Result<Value> {
    match result {
        Some(json) if json.is_object() => Ok(json),
        Some(_) => Err(JiraError::MalformedPayload("expected a JSON object".to_string())),
        None => Err(JiraError::MalformedPayload("response has no content".to_string())),
    }
}

/// Require a transport result to be a wrapped JSON array and return its items.
pub(crate) fn require_array(result: Option<Value>) -> Result<Value> {
    match result {
        Some(Value::Object(mut wrapper)) => match wrapper.remove(ARRAY_KEY) {
            Some(items @ Value::Array(_)) => Ok(items),
            _ => Err(JiraError::MalformedPayload("expected a JSON array".to_string())),
        },
        _ => Err(JiraError::MalformedPayload("expected a JSON array".to_string())),
    }
}

/// GET a single entity.
///
/// Any transport or payload failure is reported as a retrieval failure
/// naming `entity` and `key`.
pub(crate) async fn fetch_one<T: Resource>(
    client: &RestClient,
    path: &str,
    params: Option<&QueryParams>,
    entity: &'static str,
    key: &str,
) -> Result<T> {
    debug!(entity, key, "Fetching entity");

    let json = client
        .get_with_params(path, params)
        .await
        .map_err(JiraError::from)
        .and_then(require_object)
        .map_err(|e| JiraError::retrieval(entity, Some(key), e))?;

    Ok(T::from_json(client, &json))
}

/// GET a list of entities from an endpoint that returns a JSON array.
pub(crate) async fn fetch_all<T: Resource>(
    client: &RestClient,
    path: &str,
    entity: &'static str,
) -> Result<Vec<T>> {
    debug!(entity, "Fetching all entities");

    let items = client
        .get(path)
        .await
        .map_err(JiraError::from)
        .and_then(require_array)
        .map_err(|e| JiraError::retrieval(entity, None, e))?;

    let resources: Vec<T> = field::get_resource_array(Some(&items), client);
    debug!(entity, count = resources.len(), "Fetched entities");
    Ok(resources)
}
