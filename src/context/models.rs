//! Context configuration data models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contents of the context file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ContextConfig {
    /// Name of the active context
    #[serde(rename = "current-context", skip_serializing_if = "Option::is_none")]
    pub current_context: Option<String>,
    #[serde(default)]
    pub contexts: BTreeMap<String, Context>,
}

impl ContextConfig {
    /// Comma-separated context names, for error messages
    pub fn available(&self) -> String {
        if self.contexts.is_empty() {
            return "<none>".to_string();
        }
        self.contexts.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Named bundle of the identifiers needed to reach an instance
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Context {
    /// App Configuration region (e.g. `us-south`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// App Configuration instance GUID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    /// CIS instance CRN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
    /// CIS zone identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apikey: Option<String>,
}

impl Context {
    /// Overwrite the fields that are given, keep the rest
    pub fn merge(&mut self, other: Context) {
        if other.region.is_some() {
            self.region = other.region;
        }
        if other.guid.is_some() {
            self.guid = other.guid;
        }
        if other.crn.is_some() {
            self.crn = other.crn;
        }
        if other.zone.is_some() {
            self.zone = other.zone;
        }
        if other.apikey.is_some() {
            self.apikey = other.apikey;
        }
    }

    /// Whether the context addresses at least one service instance
    pub fn targets_instance(&self) -> bool {
        self.guid.is_some() || self.crn.is_some()
    }
}
