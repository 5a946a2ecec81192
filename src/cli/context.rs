//! Config management CLI arguments (kubectl-style)

use clap::{Parser, Subcommand};

/// Config subcommands for managing named contexts
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create a context or update fields of an existing one
    #[command(name = "set-context")]
    SetContext(SetContextArgs),

    /// Make a context the current one
    #[command(name = "use-context")]
    UseContext(ContextNameArgs),

    /// List all contexts
    #[command(name = "get-contexts")]
    GetContexts,

    /// Show the current context
    #[command(name = "current-context")]
    CurrentContext,

    /// Remove a context from the config file
    #[command(name = "delete-context")]
    DeleteContext(ContextNameArgs),

    /// Print the config file with API keys masked
    View,
}

/// Arguments for 'config set-context'
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
        ibmctl config set-context prod --region eu-de --guid <GUID>\n  \
        ibmctl config set-context edge --crn <CRN> --zone <ZONE_ID> --apikey <KEY>\n  \
        ibmctl config set-context prod --region us-east   # update existing context")]
pub struct SetContextArgs {
    /// Context name
    pub name: String,
    /// App Configuration region
    #[arg(long)]
    pub region: Option<String>,
    /// App Configuration instance GUID
    #[arg(long)]
    pub guid: Option<String>,
    /// CIS instance CRN
    #[arg(long)]
    pub crn: Option<String>,
    /// CIS zone identifier
    #[arg(long)]
    pub zone: Option<String>,
    /// IBM Cloud API key (stored in the config file)
    #[arg(long)]
    pub apikey: Option<String>,
}

/// Context selected by name
#[derive(Parser, Debug)]
pub struct ContextNameArgs {
    /// Context name
    pub name: String,
}
