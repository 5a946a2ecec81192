//! CIS zone firewall access rules
//!
//! Rules live under a CIS instance CRN and a zone. List responses carry
//! page-number pagination in `result_info`, so full listings fetch every
//! page after the first in parallel.

mod client;
pub mod commands;
pub mod models;
pub mod options;

pub use client::ZoneFirewallClient;
pub use models::{AccessRule, AccessRuleMode, CisPage, ResultInfo, RuleConfiguration};
pub use options::{CreateAccessRuleOptions, ListAccessRulesOptions, UpdateAccessRuleOptions};
