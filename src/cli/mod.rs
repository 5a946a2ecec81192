//! CLI argument parsing

mod common;
mod context;
mod delete;
mod enums;
mod get;
mod git;
mod rule;
mod toggle;

use clap::{Parser, Subcommand};

use crate::config::defaults;
use crate::context::Context;

pub use common::OutputFormat;
pub use context::{ConfigAction, ContextNameArgs, SetContextArgs};
pub use delete::{DeleteArgs, DeleteResource, DeleteScopedArgs};
pub use enums::{RuleModeArg, RuleTargetArg};
pub use get::{EnvScopedArgs, GetResource, GitConfigArgs, ListArgs, RuleArgs};
pub use git::{GitAction, GitPromoteArgs, GitRestoreArgs};
pub use rule::{RuleAction, RuleCreateArgs, RuleUpdateArgs};
pub use toggle::ToggleArgs;

/// Manage IBM Cloud App Configuration and CIS firewall access rules
#[derive(Parser, Debug)]
#[command(name = "ibmctl")]
#[command(version)]
#[command(about = "Manage IBM Cloud App Configuration and CIS firewall access rules", long_about = None)]
#[command(after_help = "EXAMPLES:\n  \
        ibmctl config set-context prod --region us-south --guid <GUID>\n  \
        ibmctl get features --env dev\n  \
        ibmctl toggle dark-mode --env dev --on\n  \
        ibmctl get rules --mode block -o json")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Named context to use (overrides IBMCTL_CONTEXT and current-context)
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// IBM Cloud API key (overrides env vars and the context)
    #[arg(long, global = true)]
    pub apikey: Option<String>,

    /// App Configuration region
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// App Configuration instance GUID
    #[arg(long, global = true)]
    pub guid: Option<String>,

    /// CIS instance CRN
    #[arg(long, global = true)]
    pub crn: Option<String>,

    /// CIS zone identifier
    #[arg(long, global = true)]
    pub zone: Option<String>,

    /// Retry throttled and failed requests up to N times
    #[arg(long, global = true, default_value_t = 0)]
    pub retries: u32,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Batch mode: no spinners, no interactive prompts
    #[arg(long, global = true, default_value_t = false)]
    pub batch: bool,

    /// Omit headers and totals from table and CSV output
    #[arg(long, global = true, default_value_t = false)]
    pub no_header: bool,
}

impl Cli {
    /// Connection fields given on the command line
    pub fn overrides(&self) -> Context {
        Context {
            region: self.region.clone(),
            guid: self.guid.clone(),
            crn: self.crn.clone(),
            zone: self.zone.clone(),
            apikey: None,
        }
    }

    /// Whether the command talks to the CIS API instead of App Configuration
    pub fn targets_cis(&self) -> bool {
        matches!(
            self.command,
            Command::Get {
                resource: GetResource::Rule(_)
            } | Command::Delete {
                resource: DeleteResource::Rule(_)
            } | Command::Rule { .. }
        )
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List resources or show a single one
    Get {
        #[command(subcommand)]
        resource: GetResource,
    },

    /// Delete a resource
    Delete {
        #[command(subcommand)]
        resource: DeleteResource,
    },

    /// Turn a feature flag on or off in an environment
    Toggle(ToggleArgs),

    /// Create or update CIS zone firewall access rules
    Rule {
        #[command(subcommand)]
        action: RuleAction,
    },

    /// Sync git configurations
    Git {
        #[command(subcommand)]
        action: GitAction,
    },

    /// Manage named contexts
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}
