//! Context management module
//!
//! Named contexts bundle the region, instance identifiers and API key
//! needed to reach App Configuration and CIS, so switching between
//! accounts is a single `use-context`.

mod commands;
mod models;
mod resolve;
mod store;

pub use commands::{mask_secret, run_context_command, run_context_command_with};
pub use models::{Context, ContextConfig};
pub use resolve::{effective_context, resolve_active_context};
pub use store::ContextStore;
