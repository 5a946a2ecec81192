//! Get command resource definitions and arguments

use clap::{Parser, Subcommand};

use super::common::OutputFormat;
use super::enums::{RuleModeArg, RuleTargetArg};

/// Resource types for the 'get' command
#[derive(Subcommand, Debug)]
pub enum GetResource {
    /// Get environments
    #[command(visible_alias = "envs", visible_alias = "environments")]
    Env(ListArgs),

    /// Get collections
    #[command(visible_alias = "colls", visible_alias = "collections")]
    Coll(ListArgs),

    /// Get feature flags of an environment
    #[command(visible_alias = "features", visible_alias = "flags")]
    Feature(EnvScopedArgs),

    /// Get properties of an environment
    #[command(visible_alias = "props", visible_alias = "properties")]
    Prop(EnvScopedArgs),

    /// Get segments
    #[command(visible_alias = "segments")]
    Segment(ListArgs),

    /// Get git configurations
    #[command(visible_alias = "gitconfigs", visible_alias = "git-config")]
    Gitconfig(GitConfigArgs),

    /// Get CIS zone firewall access rules
    #[command(visible_alias = "rules", visible_alias = "access-rules")]
    Rule(RuleArgs),
}

/// Arguments for instance-level App Configuration resources
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// ID or name (if specified, shows that single resource)
    pub id: Option<String>,

    /// Filter by name (substring match)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Only resources carrying these tags (comma-separated)
    #[arg(long)]
    pub tags: Option<String>,

    /// Server-side search on name and tags
    #[arg(long)]
    pub search: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Arguments for features and properties, which live in an environment
#[derive(Parser, Debug)]
pub struct EnvScopedArgs {
    /// ID or name (if specified, shows that single resource)
    pub id: Option<String>,

    /// Environment ID (required)
    #[arg(short, long = "env")]
    pub env: String,

    /// Filter by name (substring match)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Only resources attached to these collection IDs (comma-separated)
    #[arg(long)]
    pub collections: Option<String>,

    /// Only resources targeting these segment IDs (comma-separated)
    #[arg(long)]
    pub segments: Option<String>,

    /// Only resources carrying these tags (comma-separated)
    #[arg(long)]
    pub tags: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Arguments for 'get gitconfig'
#[derive(Parser, Debug)]
pub struct GitConfigArgs {
    /// Git config ID or name
    pub id: Option<String>,

    /// Only git configs bound to this collection ID
    #[arg(long)]
    pub collection: Option<String>,

    /// Only git configs bound to this environment ID
    #[arg(long)]
    pub environment: Option<String>,

    /// Filter by name (substring match)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Arguments for 'get rule'
#[derive(Parser, Debug)]
pub struct RuleArgs {
    /// Access rule ID (if specified, shows that single rule)
    pub id: Option<String>,

    /// Only rules with this mode
    #[arg(long, value_enum)]
    pub mode: Option<RuleModeArg>,

    /// Only rules matching on this target
    #[arg(long, value_enum)]
    pub target: Option<RuleTargetArg>,

    /// Only rules with this configuration value
    #[arg(long)]
    pub value: Option<String>,

    /// Only rules whose notes match
    #[arg(long)]
    pub notes: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}
