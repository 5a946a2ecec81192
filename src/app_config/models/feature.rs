//! Feature flag data models

use serde::{Deserialize, Serialize};

use super::common::{
    check_segment_rules, check_value, CollectionRef, ConfigValue, SegmentRule, ValueFormat,
    ValueType,
};
use crate::app_config::resource::AppConfigResource;
use crate::error::{IbmError, Result};
use crate::service::{Resource, Validate};

/// Feature flag within an environment
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
    pub feature_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,
    pub enabled_value: ConfigValue,
    pub disabled_value: ConfigValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollout_percentage: Option<u32>,
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

impl Feature {
    pub fn new(
        name: &str,
        feature_id: &str,
        value_type: ValueType,
        enabled_value: ConfigValue,
        disabled_value: ConfigValue,
    ) -> Self {
        Self {
            name: name.to_string(),
            feature_id: feature_id.to_string(),
            description: None,
            value_type,
            format: None,
            enabled_value,
            disabled_value,
            enabled: None,
            rollout_percentage: None,
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

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }

    /// Value currently served to users outside any segment
    pub fn current_value(&self) -> &ConfigValue {
        if self.is_enabled() {
            &self.enabled_value
        } else {
            &self.disabled_value
        }
    }

    pub fn collection_ids(&self) -> Vec<&str> {
        self.collections
            .iter()
            .map(|c| c.collection_id.as_str())
            .collect()
    }
}

impl Resource for Feature {
    fn id(&self) -> &str {
        &self.feature_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for Feature {
    fn validate(&self) -> Result<()> {
        check_value("enabled_value", &self.enabled_value, self.value_type, self.format)?;
        check_value("disabled_value", &self.disabled_value, self.value_type, self.format)?;
        if let Some(pct) = self.rollout_percentage {
            if pct > 100 {
                return Err(IbmError::Validation(format!(
                    "rollout_percentage {} exceeds 100",
                    pct
                )));
            }
        }
        check_segment_rules(&self.segment_rules, self.value_type, self.format)
    }
}

impl AppConfigResource for Feature {
    type Prototype = Feature;
    const KIND: &'static str = "feature";
    const COLLECTION: &'static str = "features";
    const LIST_KEY: &'static str = "features";
    const ENVIRONMENT_SCOPED: bool = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::models::common::{RolloutPercentage, TargetSegments};

    fn feature_json() -> &'static str {
        r#"{
            "name": "Dark Mode",
            "feature_id": "dark-mode",
            "type": "BOOLEAN",
            "enabled_value": true,
            "disabled_value": false,
            "enabled": true,
            "rollout_percentage": 100,
            "segment_rules": [{
                "rules": [{"segments": ["beta-users"]}],
                "value": "$default",
                "order": 1,
                "rollout_percentage": "$default"
            }],
            "segment_exists": true,
            "collections": [{"collection_id": "web-app", "name": "Web App"}]
        }"#
    }

    #[test]
    fn test_feature_deserialization() {
        let f: Feature = serde_json::from_str(feature_json()).unwrap();
        assert_eq!(f.id(), "dark-mode");
        assert_eq!(f.value_type, ValueType::Boolean);
        assert!(f.is_enabled());
        assert_eq!(f.current_value(), &ConfigValue::Boolean(true));
        assert_eq!(f.collection_ids(), vec!["web-app"]);
        assert_eq!(
            f.segment_rules[0].rollout_percentage,
            Some(RolloutPercentage::Default("$default".to_string()))
        );
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_disabled_feature_current_value() {
        let f = Feature::new(
            "Limit",
            "limit",
            ValueType::Numeric,
            ConfigValue::from(10i64),
            ConfigValue::from(1i64),
        );
        assert!(!f.is_enabled());
        assert_eq!(f.current_value().to_string(), "1");
    }

    #[test]
    fn test_validate_rejects_type_mismatch() {
        let f = Feature::new(
            "Flag",
            "flag",
            ValueType::Boolean,
            ConfigValue::from("yes"),
            ConfigValue::from(false),
        );
        match f.validate().unwrap_err() {
            IbmError::Validation(msg) => assert!(msg.contains("enabled_value")),
            other => panic!("Expected IbmError::Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_rollout_over_100() {
        let mut f = Feature::new(
            "Flag",
            "flag",
            ValueType::Boolean,
            ConfigValue::from(true),
            ConfigValue::from(false),
        );
        f.rollout_percentage = Some(150);
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_validate_json_string_feature() {
        let mut f = Feature::new(
            "Theme",
            "theme",
            ValueType::String,
            ConfigValue::Document(serde_json::json!({"color": "dark"})),
            ConfigValue::Document(serde_json::json!({"color": "light"})),
        );
        assert!(f.validate().is_err());

        f.format = Some(ValueFormat::Json);
        f.segment_rules.push(SegmentRule {
            rules: vec![TargetSegments {
                segments: vec!["designers".to_string()],
            }],
            value: ConfigValue::Document(serde_json::json!({"color": "pink"})),
            order: 1,
            rollout_percentage: None,
        });
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_validate_yaml_string_feature() {
        let mut f = Feature::new(
            "Routes",
            "routes",
            ValueType::String,
            ConfigValue::Document(serde_json::json!({"primary": "eu-de"})),
            ConfigValue::Document(serde_json::json!({"primary": "us-south"})),
        );
        f.format = Some(ValueFormat::Text);
        assert!(f.validate().is_err());

        f.format = Some(ValueFormat::Yaml);
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_request_body_uses_type_key() {
        let f = Feature::new(
            "Flag",
            "flag",
            ValueType::Boolean,
            ConfigValue::from(true),
            ConfigValue::from(false),
        );
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["type"], "BOOLEAN");
        assert!(json.get("value_type").is_none());
        assert!(json.get("segment_rules").is_none());
    }
}
