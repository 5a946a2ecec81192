//! Context resolution from multiple sources

use log::debug;

use crate::config::context as context_config;
use crate::error::{IbmError, Result};

use super::models::{Context, ContextConfig};
use super::store::ContextStore;

/// Pick the active context name:
/// 1. --context CLI flag
/// 2. IBMCTL_CONTEXT env var
/// 3. current-context from the config file
fn pick_context_name(
    cli_context: Option<&str>,
    env_context: Option<String>,
    config: &ContextConfig,
) -> Option<String> {
    if let Some(name) = cli_context {
        debug!("Using context from CLI flag: {}", name);
        return Some(name.to_string());
    }

    if let Some(name) = env_context.filter(|n| !n.is_empty()) {
        debug!(
            "Using context from {} env var: {}",
            context_config::ENV_VAR,
            name
        );
        return Some(name);
    }

    if let Some(name) = &config.current_context {
        debug!("Using context from config file: {}", name);
        return Some(name.clone());
    }

    None
}

/// Load the active context; naming a context that does not exist is an error
pub fn resolve_active_context(
    cli_context: Option<&str>,
    store: &ContextStore,
) -> Result<Option<(String, Context)>> {
    let config = store.load()?;
    let env_context = std::env::var(context_config::ENV_VAR).ok();
    let Some(name) = pick_context_name(cli_context, env_context, &config) else {
        debug!("No active context");
        return Ok(None);
    };

    match config.contexts.get(&name) {
        Some(ctx) => {
            debug!("Resolved context '{}'", name);
            Ok(Some((name, ctx.clone())))
        }
        None => Err(IbmError::Config(format!(
            "Context '{}' not found. Available contexts: {}",
            name,
            config.available()
        ))),
    }
}

/// Overlay command-line connection fields on the active context
pub fn effective_context(overrides: Context, active: Option<Context>) -> Context {
    let mut ctx = active.unwrap_or_default();
    ctx.merge(overrides);
    ctx
}
