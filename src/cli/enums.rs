//! Value enums for CLI arguments

use clap::ValueEnum;

use crate::access_rules::AccessRuleMode;

/// Action applied by an access rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RuleModeArg {
    Block,
    Challenge,
    Whitelist,
    JsChallenge,
}

impl From<RuleModeArg> for AccessRuleMode {
    fn from(mode: RuleModeArg) -> Self {
        match mode {
            RuleModeArg::Block => AccessRuleMode::Block,
            RuleModeArg::Challenge => AccessRuleMode::Challenge,
            RuleModeArg::Whitelist => AccessRuleMode::Whitelist,
            RuleModeArg::JsChallenge => AccessRuleMode::JsChallenge,
        }
    }
}

/// What an access rule matches on
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RuleTargetArg {
    Ip,
    IpRange,
    Asn,
    Country,
}

impl RuleTargetArg {
    /// Name used by the API for `configuration.target`
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleTargetArg::Ip => "ip",
            RuleTargetArg::IpRange => "ip_range",
            RuleTargetArg::Asn => "asn",
            RuleTargetArg::Country => "country",
        }
    }
}
