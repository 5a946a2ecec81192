//! Collection data models

use serde::{Deserialize, Serialize};

use super::common::{FeatureRef, PropertyRef};
use crate::app_config::resource::AppConfigResource;
use crate::service::{Resource, Validate};

/// Group of features and properties
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Collection {
    pub name: String,
    pub collection_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<FeatureRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties_count: Option<u32>,
}

impl Collection {
    pub fn new(name: &str, collection_id: &str) -> Self {
        Self {
            name: name.to_string(),
            collection_id: collection_id.to_string(),
            description: None,
            tags: None,
            created_time: None,
            updated_time: None,
            href: None,
            features: Vec::new(),
            properties: Vec::new(),
            features_count: None,
            properties_count: None,
        }
    }

    /// Feature count as reported, falling back to the expanded list
    pub fn feature_count(&self) -> u32 {
        self.features_count
            .unwrap_or(self.features.len() as u32)
    }

    pub fn property_count(&self) -> u32 {
        self.properties_count
            .unwrap_or(self.properties.len() as u32)
    }
}

impl Resource for Collection {
    fn id(&self) -> &str {
        &self.collection_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for Collection {}

impl AppConfigResource for Collection {
    type Prototype = Collection;
    const KIND: &'static str = "collection";
    const COLLECTION: &'static str = "collections";
    const LIST_KEY: &'static str = "collections";
}
