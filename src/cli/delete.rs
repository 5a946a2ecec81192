//! Delete command resource definitions and arguments

use clap::{Parser, Subcommand};

/// Resource types for the 'delete' command
#[derive(Subcommand, Debug)]
pub enum DeleteResource {
    /// Delete an environment (and every feature and property in it)
    #[command(visible_alias = "environment")]
    Env(DeleteArgs),

    /// Delete a collection
    #[command(visible_alias = "collection")]
    Coll(DeleteArgs),

    /// Delete a feature flag from an environment
    #[command(visible_alias = "flag")]
    Feature(DeleteScopedArgs),

    /// Delete a property from an environment
    #[command(visible_alias = "property")]
    Prop(DeleteScopedArgs),

    /// Delete a segment
    Segment(DeleteArgs),

    /// Delete a git configuration
    #[command(visible_alias = "git-config")]
    Gitconfig(DeleteArgs),

    /// Delete a CIS zone firewall access rule
    #[command(visible_alias = "access-rule")]
    Rule(DeleteArgs),
}

/// Arguments for deleting an instance-level resource
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// ID (or name) of the resource to delete
    pub id: String,

    /// Skip confirmation prompt
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}

/// Arguments for deleting a feature or property
#[derive(Parser, Debug)]
pub struct DeleteScopedArgs {
    /// ID (or name) of the resource to delete
    pub id: String,

    /// Environment ID (required)
    #[arg(short, long = "env")]
    pub env: String,

    /// Skip confirmation prompt
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}
