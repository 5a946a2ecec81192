//! Segment data models

use serde::{Deserialize, Serialize};

use super::common::{FeatureRef, PropertyRef};
use crate::app_config::resource::AppConfigResource;
use crate::error::{IbmError, Result};
use crate::service::{Resource, Validate};

/// Comparison applied to a user attribute
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SegmentOperator {
    Is,
    Contains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LesserThan,
    GreaterThanEquals,
    LesserThanEquals,
}

/// One attribute condition of a segment
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SegmentCondition {
    pub attribute_name: String,
    pub operator: SegmentOperator,
    pub values: Vec<String>,
}

/// Group of users selected by attribute conditions
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Segment {
    pub name: String,
    pub segment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    pub rules: Vec<SegmentCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Present when requested with `include=features`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<FeatureRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyRef>,
}

impl Segment {
    pub fn new(name: &str, segment_id: &str, rules: Vec<SegmentCondition>) -> Self {
        Self {
            name: name.to_string(),
            segment_id: segment_id.to_string(),
            description: None,
            tags: None,
            rules,
            created_time: None,
            updated_time: None,
            href: None,
            features: Vec::new(),
            properties: Vec::new(),
        }
    }
}

impl Resource for Segment {
    fn id(&self) -> &str {
        &self.segment_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for Segment {
    fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(IbmError::Validation(format!(
                "segment '{}' needs at least one rule",
                self.segment_id
            )));
        }
        if let Some(rule) = self.rules.iter().find(|r| r.values.is_empty()) {
            return Err(IbmError::Validation(format!(
                "rule on attribute '{}' has no values",
                rule.attribute_name
            )));
        }
        Ok(())
    }
}

impl AppConfigResource for Segment {
    type Prototype = Segment;
    const KIND: &'static str = "segment";
    const COLLECTION: &'static str = "segments";
    const LIST_KEY: &'static str = "segments";
}
