//! Property data models

use serde::{Deserialize, Serialize};

use super::common::{
    check_segment_rules, check_value, CollectionRef, ConfigValue, SegmentRule, ValueFormat,
    ValueType,
};
use crate::app_config::resource::AppConfigResource;
use crate::error::Result;
use crate::service::{Resource, Validate};

/// Configuration property within an environment
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub property_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,
    pub value: ConfigValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segment_rules: Vec<SegmentRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_exists: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collections: Vec<CollectionRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Property {
    pub fn new(name: &str, property_id: &str, value_type: ValueType, value: ConfigValue) -> Self {
        Self {
            name: name.to_string(),
            property_id: property_id.to_string(),
            description: None,
            value_type,
            format: None,
            value,
            tags: None,
            segment_rules: Vec::new(),
            segment_exists: None,
            collections: Vec::new(),
            created_time: None,
            updated_time: None,
            evaluation_time: None,
            href: None,
        }
    }
}

impl Resource for Property {
    fn id(&self) -> &str {
        &self.property_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for Property {
    fn validate(&self) -> Result<()> {
        check_value("value", &self.value, self.value_type, self.format)?;
        check_segment_rules(&self.segment_rules, self.value_type, self.format)
    }
}

impl AppConfigResource for Property {
    type Prototype = Property;
    const KIND: &'static str = "property";
    const COLLECTION: &'static str = "properties";
    const LIST_KEY: &'static str = "properties";
    const ENVIRONMENT_SCOPED: bool = true;
}
