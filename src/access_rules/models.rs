//! Zone firewall access rule data models

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{IbmError, Result};
use crate::service::{PaginatedResponse, Resource, Validate};

/// Action taken for matching requests
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccessRuleMode {
    Block,
    Challenge,
    Whitelist,
    JsChallenge,
}

impl AccessRuleMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessRuleMode::Block => "block",
            AccessRuleMode::Challenge => "challenge",
            AccessRuleMode::Whitelist => "whitelist",
            AccessRuleMode::JsChallenge => "js_challenge",
        }
    }
}

impl fmt::Display for AccessRuleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccessRuleMode {
    type Err = IbmError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "block" => Ok(AccessRuleMode::Block),
            "challenge" => Ok(AccessRuleMode::Challenge),
            "whitelist" => Ok(AccessRuleMode::Whitelist),
            "js_challenge" => Ok(AccessRuleMode::JsChallenge),
            other => Err(IbmError::Validation(format!(
                "unknown access rule mode '{}' (expected block, challenge, whitelist or js_challenge)",
                other
            ))),
        }
    }
}

/// What a rule matches on
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "target", content = "value", rename_all = "snake_case")]
pub enum RuleConfiguration {
    Ip(String),
    IpRange(String),
    Asn(String),
    Country(String),
}

impl RuleConfiguration {
    /// Build a configuration from a target name and value
    pub fn new(target: &str, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        match target {
            "ip" => Ok(RuleConfiguration::Ip(value)),
            "ip_range" => Ok(RuleConfiguration::IpRange(value)),
            "asn" => Ok(RuleConfiguration::Asn(value)),
            "country" => Ok(RuleConfiguration::Country(value)),
            other => Err(IbmError::Validation(format!(
                "unknown configuration target '{}' (expected ip, ip_range, asn or country)",
                other
            ))),
        }
    }

    pub fn target(&self) -> &'static str {
        match self {
            RuleConfiguration::Ip(_) => "ip",
            RuleConfiguration::IpRange(_) => "ip_range",
            RuleConfiguration::Asn(_) => "asn",
            RuleConfiguration::Country(_) => "country",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            RuleConfiguration::Ip(v)
            | RuleConfiguration::IpRange(v)
            | RuleConfiguration::Asn(v)
            | RuleConfiguration::Country(v) => v,
        }
    }
}

impl Validate for RuleConfiguration {
    fn validate(&self) -> Result<()> {
        let valid = match self {
            RuleConfiguration::Ip(v) => v.parse::<IpAddr>().is_ok(),
            RuleConfiguration::IpRange(v) => is_allowed_cidr(v),
            RuleConfiguration::Asn(v) => v
                .strip_prefix("AS")
                .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit())),
            RuleConfiguration::Country(v) => {
                v.len() == 2 && v.chars().all(|c| c.is_ascii_uppercase())
            }
        };

        if valid {
            Ok(())
        } else {
            Err(IbmError::Validation(format!(
                "'{}' is not a valid {} value",
                self.value(),
                self.target()
            )))
        }
    }
}

/// Zone rules accept IPv4 /16 and /24 or IPv6 /32, /48 and /64 ranges
fn is_allowed_cidr(value: &str) -> bool {
    let Some((addr, prefix)) = value.split_once('/') else {
        return false;
    };
    let Ok(prefix) = prefix.parse::<u8>() else {
        return false;
    };
    match addr.parse::<IpAddr>() {
        Ok(IpAddr::V4(_)) => matches!(prefix, 16 | 24),
        Ok(IpAddr::V6(_)) => matches!(prefix, 32 | 48 | 64),
        Err(_) => false,
    }
}

/// Level the rule was defined at
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AccessRuleScope {
    #[serde(rename = "type")]
    pub scope_type: String,
}

/// Zone firewall access rule
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AccessRule {
    pub id: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub allowed_modes: Vec<AccessRuleMode>,
    pub mode: AccessRuleMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<AccessRuleScope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<String>,
    pub configuration: RuleConfiguration,
}

impl AccessRule {
    pub fn scope_type(&self) -> &str {
        self.scope.as_ref().map(|s| s.scope_type.as_str()).unwrap_or("")
    }
}

impl Resource for AccessRule {
    fn id(&self) -> &str {
        &self.id
    }

    /// Rules have no name; the matched value stands in for one
    fn name(&self) -> &str {
        self.configuration.value()
    }
}

/// Deleted rule identifier
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DeletedRule {
    pub id: String,
}

/// Pagination block of a CIS list response
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultInfo {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub total_count: u32,
}

impl ResultInfo {
    /// Number of pages needed for `total_count` items
    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 {
            return 1;
        }
        self.total_count.div_ceil(self.per_page).max(1)
    }
}

/// Standard CIS response envelope
#[derive(Deserialize, Debug, Clone)]
pub struct CisResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<Value>,
    #[serde(default)]
    pub messages: Vec<Value>,
    pub result: Option<T>,
    #[serde(default)]
    pub result_info: Option<ResultInfo>,
}

impl<T> CisResponse<T> {
    /// A `success: false` envelope is an API error even with a 2xx status
    pub fn ensure_success(&self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(IbmError::Api {
                status: 200,
                message: envelope_message(&self.errors),
            })
        }
    }

    /// Unwrap the result of a successful envelope
    pub fn into_result(self) -> Result<T> {
        self.ensure_success()?;
        self.result
            .ok_or_else(|| IbmError::Json("response envelope has no result".to_string()))
    }
}

impl<T> PaginatedResponse<T> for CisResponse<Vec<T>> {
    fn into_data(self) -> Vec<T> {
        self.result.unwrap_or_default()
    }

    fn total_count(&self) -> Option<u32> {
        self.result_info.map(|info| info.total_count)
    }
}

/// One page of a rule listing
#[derive(Debug, Clone, PartialEq)]
pub struct CisPage<T> {
    pub items: Vec<T>,
    pub result_info: Option<ResultInfo>,
}

fn envelope_message(errors: &[Value]) -> String {
    match errors.first() {
        Some(err) => err
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string()),
        None => "request reported success=false".to_string(),
    }
}
