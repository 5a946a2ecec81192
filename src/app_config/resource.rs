//! Resource abstraction over the App Configuration collections

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{IbmError, Result};
use crate::service::query::encode_segment;
use crate::service::{Resource, Validate};

/// Where a collection lives inside the service instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Instance-level collections (environments, collections, segments, git configs)
    Instance,
    /// Collections nested under an environment (features, properties)
    Environment(String),
}

impl Scope {
    pub fn environment(environment_id: impl Into<String>) -> Self {
        Scope::Environment(environment_id.into())
    }
}

/// An App Configuration resource type addressable through the generic client operations
pub trait AppConfigResource: Resource + DeserializeOwned + Serialize + Send + Sync {
    /// Request body accepted by create and update
    type Prototype: Serialize + Validate + Sync;

    /// Singular name for messages ("feature")
    const KIND: &'static str;

    /// Path segment of the collection ("features")
    const COLLECTION: &'static str;

    /// Key of the item array in list responses
    const LIST_KEY: &'static str;

    /// Whether the collection is nested under an environment
    const ENVIRONMENT_SCOPED: bool = false;

    /// Whether updates use PATCH instead of PUT
    const UPDATE_WITH_PATCH: bool = false;

    /// Path of the collection relative to the instance URL
    fn collection_path(scope: &Scope) -> Result<String> {
        match (Self::ENVIRONMENT_SCOPED, scope) {
            (false, _) => Ok(format!("/{}", Self::COLLECTION)),
            (true, Scope::Environment(env)) => Ok(format!(
                "/environments/{}/{}",
                encode_segment(env),
                Self::COLLECTION
            )),
            (true, Scope::Instance) => Err(IbmError::Config(format!(
                "{} are scoped to an environment; an environment ID is required",
                Self::COLLECTION
            ))),
        }
    }

    /// Path of a single item relative to the instance URL
    fn item_path(scope: &Scope, id: &str) -> Result<String> {
        Ok(format!(
            "{}/{}",
            Self::collection_path(scope)?,
            encode_segment(id)
        ))
    }
}
