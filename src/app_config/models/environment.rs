//! Environment data models

use serde::{Deserialize, Serialize};

use super::common::{FeatureRef, PropertyRef};
use crate::app_config::resource::AppConfigResource;
use crate::service::{Resource, Validate};

/// Environment of an App Configuration instance
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Environment {
    pub name: String,
    pub environment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Comma-separated tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Present when listed with `expand=true`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<FeatureRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyRef>,
}

impl Environment {
    pub fn new(name: &str, environment_id: &str) -> Self {
        Self {
            name: name.to_string(),
            environment_id: environment_id.to_string(),
            description: None,
            tags: None,
            color_code: None,
            created_time: None,
            updated_time: None,
            href: None,
            features: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

impl Resource for Environment {
    fn id(&self) -> &str {
        &self.environment_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for Environment {}

impl AppConfigResource for Environment {
    type Prototype = Environment;
    const KIND: &'static str = "environment";
    const COLLECTION: &'static str = "environments";
    const LIST_KEY: &'static str = "environments";
}
