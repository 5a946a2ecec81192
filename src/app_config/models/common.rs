//! Value types shared by App Configuration resources

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{IbmError, Result};

/// Data type of a feature or property value
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    Boolean,
    String,
    Numeric,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Boolean => write!(f, "BOOLEAN"),
            ValueType::String => write!(f, "STRING"),
            ValueType::Numeric => write!(f, "NUMERIC"),
        }
    }
}

/// Format of a STRING value
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueFormat {
    Text,
    Json,
    Yaml,
}

/// A feature or property value: boolean, number, string or JSON document
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ConfigValue {
    Boolean(bool),
    Numeric(serde_json::Number),
    Text(String),
    Document(Value),
}

impl ConfigValue {
    /// Marker used in segment rules to inherit the resource's own value
    pub const DEFAULT_MARKER: &'static str = "$default";

    pub fn is_default_marker(&self) -> bool {
        matches!(self, ConfigValue::Text(s) if s == Self::DEFAULT_MARKER)
    }

    /// Whether the value is acceptable for a resource of the given type and format
    pub fn conforms_to(&self, value_type: ValueType, format: Option<ValueFormat>) -> bool {
        match (value_type, self) {
            (ValueType::Boolean, ConfigValue::Boolean(_)) => true,
            (ValueType::Numeric, ConfigValue::Numeric(_)) => true,
            (ValueType::String, ConfigValue::Text(_)) => true,
            (ValueType::String, ConfigValue::Document(_)) => {
                matches!(format, Some(ValueFormat::Json | ValueFormat::Yaml))
            }
            _ => false,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Boolean(b) => write!(f, "{}", b),
            ConfigValue::Numeric(n) => write!(f, "{}", n),
            ConfigValue::Text(s) => write!(f, "{}", s),
            ConfigValue::Document(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Boolean(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Numeric(value.into())
    }
}

/// Rollout percentage of a segment rule: a number or `$default`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum RolloutPercentage {
    Percent(u32),
    Default(String),
}

impl RolloutPercentage {
    fn validate(&self) -> Result<()> {
        match self {
            RolloutPercentage::Percent(p) if *p > 100 => Err(IbmError::Validation(format!(
                "rollout_percentage {} exceeds 100",
                p
            ))),
            RolloutPercentage::Default(s) if s != ConfigValue::DEFAULT_MARKER => {
                Err(IbmError::Validation(format!(
                    "rollout_percentage must be a number or '{}', got '{}'",
                    ConfigValue::DEFAULT_MARKER,
                    s
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Segments a rule applies to
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TargetSegments {
    pub segments: Vec<String>,
}

/// Value override for a set of segments
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SegmentRule {
    pub rules: Vec<TargetSegments>,
    pub value: ConfigValue,
    pub order: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollout_percentage: Option<RolloutPercentage>,
}

/// Collection reference embedded in features, properties and git configs
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CollectionRef {
    pub collection_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CollectionRef {
    pub fn new(collection_id: &str) -> Self {
        Self {
            collection_id: collection_id.to_string(),
            name: None,
        }
    }
}

/// Environment reference embedded in git configs
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EnvironmentRef {
    pub environment_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FeatureRef {
    pub feature_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PropertyRef {
    pub property_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Check a value against the owning resource's type
pub(crate) fn check_value(
    label: &str,
    value: &ConfigValue,
    value_type: ValueType,
    format: Option<ValueFormat>,
) -> Result<()> {
    if value.conforms_to(value_type, format) {
        Ok(())
    } else {
        Err(IbmError::Validation(format!(
            "{} '{}' does not match type {}",
            label, value, value_type
        )))
    }
}

/// Check segment rule values and rollout percentages
pub(crate) fn check_segment_rules(
    rules: &[SegmentRule],
    value_type: ValueType,
    format: Option<ValueFormat>,
) -> Result<()> {
    for rule in rules {
        if rule.rules.iter().all(|r| r.segments.is_empty()) {
            return Err(IbmError::Validation(format!(
                "segment rule with order {} targets no segments",
                rule.order
            )));
        }
        if !rule.value.is_default_marker() {
            check_value("segment rule value", &rule.value, value_type, format)?;
        }
        if let Some(rollout) = &rule.rollout_percentage {
            rollout.validate()?;
        }
    }
    Ok(())
}
