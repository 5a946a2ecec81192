//! Request options for zone access rule calls

use serde::Serialize;

use super::models::{AccessRuleMode, RuleConfiguration};
use crate::config::api;
use crate::error::{IbmError, Result};
use crate::service::Validate;

/// Filters and paging for listing access rules
#[derive(Debug, Clone, PartialEq)]
pub struct ListAccessRulesOptions {
    pub notes: Option<String>,
    pub mode: Option<AccessRuleMode>,
    pub configuration_target: Option<String>,
    pub configuration_value: Option<String>,
    pub page: Option<u32>,
    pub per_page: u32,
    /// Field to order by: `configuration.target`, `configuration.value` or `mode`
    pub order: Option<String>,
    /// `asc` or `desc`
    pub direction: Option<String>,
    /// `all` or `any`
    pub match_: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl Default for ListAccessRulesOptions {
    fn default() -> Self {
        Self {
            notes: None,
            mode: None,
            configuration_target: None,
            configuration_value: None,
            page: None,
            per_page: api::CIS_PAGE_SIZE,
            order: None,
            direction: None,
            match_: None,
            headers: Vec::new(),
        }
    }
}

impl ListAccessRulesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn mode(mut self, mode: AccessRuleMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn configuration_target(mut self, target: impl Into<String>) -> Self {
        self.configuration_target = Some(target.into());
        self
    }

    pub fn configuration_value(mut self, value: impl Into<String>) -> Self {
        self.configuration_value = Some(value.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    pub fn match_(mut self, value: impl Into<String>) -> Self {
        self.match_ = Some(value.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub(crate) fn query_pairs(&self, page: Option<u32>) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                pairs.push((key.to_string(), value));
            }
        };
        push("notes", self.notes.clone());
        push("mode", self.mode.map(|m| m.to_string()));
        push("configuration.target", self.configuration_target.clone());
        push("configuration.value", self.configuration_value.clone());
        push("page", page.map(|p| p.to_string()));
        push("per_page", Some(self.per_page.to_string()));
        push("order", self.order.clone());
        push("direction", self.direction.clone());
        push("match", self.match_.clone());
        pairs
    }
}

/// Body of a new access rule
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CreateAccessRuleOptions {
    pub mode: AccessRuleMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub configuration: RuleConfiguration,
    #[serde(skip)]
    pub headers: Vec<(String, String)>,
}

impl CreateAccessRuleOptions {
    pub fn new(mode: AccessRuleMode, configuration: RuleConfiguration) -> Self {
        Self {
            mode,
            notes: None,
            configuration,
            headers: Vec::new(),
        }
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl Validate for CreateAccessRuleOptions {
    fn validate(&self) -> Result<()> {
        self.configuration.validate()
    }
}

/// Changes to an existing access rule
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct UpdateAccessRuleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<AccessRuleMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip)]
    pub headers: Vec<(String, String)>,
}

impl Validate for UpdateAccessRuleOptions {
    fn validate(&self) -> Result<()> {
        if self.mode.is_none() && self.notes.is_none() {
            return Err(IbmError::Validation(
                "an update needs a mode or notes".to_string(),
            ));
        }
        Ok(())
    }
}
