//! Access rule write commands

use clap::{Parser, Subcommand};

use super::enums::{RuleModeArg, RuleTargetArg};

/// Subcommands of 'rule'
#[derive(Subcommand, Debug)]
pub enum RuleAction {
    /// Create an access rule in the zone
    Create(RuleCreateArgs),

    /// Change the mode or notes of an access rule
    Update(RuleUpdateArgs),
}

/// Arguments for 'rule create'
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
        ibmctl rule create --mode block --target ip --value 198.51.100.4\n  \
        ibmctl rule create --mode challenge --target country --value CN --notes 'geo'\n  \
        ibmctl rule create --mode whitelist --target ip-range --value 203.0.113.0/24")]
pub struct RuleCreateArgs {
    /// Action taken when the rule matches
    #[arg(long, value_enum)]
    pub mode: RuleModeArg,

    /// What the rule matches on
    #[arg(long, value_enum)]
    pub target: RuleTargetArg,

    /// IP, CIDR range, ASN (AS1234) or two-letter country code
    #[arg(long)]
    pub value: String,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

/// Arguments for 'rule update'
#[derive(Parser, Debug)]
pub struct RuleUpdateArgs {
    /// Access rule ID
    pub id: String,

    /// New mode
    #[arg(long, value_enum)]
    pub mode: Option<RuleModeArg>,

    /// New notes
    #[arg(long)]
    pub notes: Option<String>,
}
