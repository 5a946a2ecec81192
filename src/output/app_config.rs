//! Table rows for App Configuration resources

use super::table::Tabular;
use crate::app_config::models::{Collection, Environment, Feature, GitConfig, Property, Segment};

fn or_empty(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

impl Tabular for Environment {
    const HEADERS: &'static [&'static str] =
        &["Name", "Environment ID", "Description", "Tags", "Color", "Updated"];

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.environment_id.clone(),
            self.description().to_string(),
            or_empty(self.tags.as_ref()),
            or_empty(self.color_code.as_ref()),
            or_empty(self.updated_time.as_ref()),
        ]
    }
}

impl Tabular for Collection {
    const HEADERS: &'static [&'static str] =
        &["Name", "Collection ID", "Features", "Properties", "Tags"];

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.collection_id.clone(),
            self.feature_count().to_string(),
            self.property_count().to_string(),
            or_empty(self.tags.as_ref()),
        ]
    }
}

impl Tabular for Feature {
    const HEADERS: &'static [&'static str] = &[
        "Name",
        "Feature ID",
        "Type",
        "Enabled",
        "Value",
        "Rollout",
        "Segment Rules",
        "Collections",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.feature_id.clone(),
            self.value_type.to_string(),
            if self.is_enabled() { "Yes" } else { "No" }.to_string(),
            self.current_value().to_string(),
            self.rollout_percentage
                .map(|p| format!("{}%", p))
                .unwrap_or_default(),
            self.segment_rules.len().to_string(),
            self.collection_ids().join(", "),
        ]
    }
}

impl Tabular for Property {
    const HEADERS: &'static [&'static str] = &[
        "Name",
        "Property ID",
        "Type",
        "Value",
        "Segment Rules",
        "Collections",
    ];

    fn row(&self) -> Vec<String> {
        let collections: Vec<&str> = self
            .collections
            .iter()
            .map(|c| c.collection_id.as_str())
            .collect();
        vec![
            self.name.clone(),
            self.property_id.clone(),
            self.value_type.to_string(),
            self.value.to_string(),
            self.segment_rules.len().to_string(),
            collections.join(", "),
        ]
    }
}

impl Tabular for Segment {
    const HEADERS: &'static [&'static str] = &["Name", "Segment ID", "Attributes", "Tags"];

    fn row(&self) -> Vec<String> {
        let attributes: Vec<&str> = self
            .rules
            .iter()
            .map(|r| r.attribute_name.as_str())
            .collect();
        vec![
            self.name.clone(),
            self.segment_id.clone(),
            attributes.join(", "),
            or_empty(self.tags.as_ref()),
        ]
    }
}

impl Tabular for GitConfig {
    const HEADERS: &'static [&'static str] = &[
        "Name",
        "Git Config ID",
        "Collection",
        "Environment",
        "Branch",
        "File Path",
        "Last Sync",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.git_config_name.clone(),
            self.git_config_id.clone(),
            self.collection_id().to_string(),
            self.environment_id().to_string(),
            or_empty(self.git_branch.as_ref()),
            or_empty(self.git_file_path.as_ref()),
            or_empty(self.last_sync_time.as_ref()),
        ]
    }
}
