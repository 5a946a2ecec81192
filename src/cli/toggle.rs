//! Feature toggle arguments

use clap::{ArgGroup, Parser};

/// Arguments for 'toggle'
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("state").required(true).args(["on", "off"])))]
pub struct ToggleArgs {
    /// Feature ID
    pub feature_id: String,

    /// Environment ID (required)
    #[arg(short, long = "env")]
    pub env: String,

    /// Enable the feature
    #[arg(long)]
    pub on: bool,

    /// Disable the feature
    #[arg(long)]
    pub off: bool,
}

impl ToggleArgs {
    /// Requested state; clap guarantees exactly one of the flags
    pub fn enabled(&self) -> bool {
        self.on
    }
}
