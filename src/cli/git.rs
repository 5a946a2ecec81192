//! Git configuration sync commands

use clap::{Parser, Subcommand};

use super::common::OutputFormat;

/// Subcommands of 'git'
#[derive(Subcommand, Debug)]
pub enum GitAction {
    /// Push the configuration of the bound collection and environment to git
    Promote(GitPromoteArgs),

    /// Fetch the configuration stored in git for a git config
    Restore(GitRestoreArgs),
}

/// Arguments for 'git promote'
#[derive(Parser, Debug)]
pub struct GitPromoteArgs {
    /// Git config ID
    pub id: String,

    /// Skip confirmation prompt
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}

/// Arguments for 'git restore'
#[derive(Parser, Debug)]
pub struct GitRestoreArgs {
    /// Git config ID
    pub id: String,

    /// Output format (json or yaml)
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}
