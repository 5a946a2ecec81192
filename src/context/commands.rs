//! Context command handlers

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use crate::cli::{ConfigAction, SetContextArgs};
use crate::error::IbmError;

use super::models::{Context, ContextConfig};
use super::store::ContextStore;

const NOT_SET: &str = "<not set>";

/// Dispatch config subcommands against the default store
pub fn run_context_command(action: &ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    run_context_command_with(&ContextStore::new(), action)
}

/// Dispatch config subcommands against a given store
pub fn run_context_command_with(
    store: &ContextStore,
    action: &ConfigAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::GetContexts => run_context_list(store),
        ConfigAction::SetContext(args) => run_context_set(store, args),
        ConfigAction::UseContext(args) => run_context_use(store, &args.name),
        ConfigAction::DeleteContext(args) => run_context_delete(store, &args.name),
        ConfigAction::CurrentContext => run_context_show(store),
        ConfigAction::View => run_config_view(store),
    }
}

fn run_context_list(store: &ContextStore) -> Result<(), Box<dyn std::error::Error>> {
    let config = store.load()?;

    if config.contexts.is_empty() {
        println!("No contexts configured.");
        println!("\nUse 'ibmctl config set-context <name> --guid <GUID>' to create one.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("CURRENT"),
            Cell::new("NAME"),
            Cell::new("REGION"),
            Cell::new("GUID"),
            Cell::new("CRN"),
            Cell::new("ZONE"),
            Cell::new("APIKEY"),
        ]);

    for (name, ctx) in &config.contexts {
        let is_current = config.current_context.as_deref() == Some(name.as_str());
        table.add_row(vec![
            Cell::new(if is_current { "*" } else { "" }),
            Cell::new(name),
            Cell::new(ctx.region.as_deref().unwrap_or(NOT_SET)),
            Cell::new(ctx.guid.as_deref().unwrap_or(NOT_SET)),
            Cell::new(ctx.crn.as_deref().unwrap_or(NOT_SET)),
            Cell::new(ctx.zone.as_deref().unwrap_or(NOT_SET)),
            Cell::new(mask_secret(ctx.apikey.as_deref())),
        ]);
    }

    println!("{table}");
    Ok(())
}

fn run_context_show(store: &ContextStore) -> Result<(), Box<dyn std::error::Error>> {
    let config = store.load()?;

    let current_name = config.current_context.as_ref().ok_or_else(|| {
        IbmError::Config(
            "No current context set. Use 'ibmctl config use-context <name>' to set one."
                .to_string(),
        )
    })?;

    let ctx = config.contexts.get(current_name).ok_or_else(|| {
        IbmError::Config(format!(
            "Current context '{}' not found in config. Available: {}",
            current_name,
            config.available()
        ))
    })?;

    println!("Current context: {}", current_name);
    println!("  Region: {}", ctx.region.as_deref().unwrap_or(NOT_SET));
    println!("  GUID:   {}", ctx.guid.as_deref().unwrap_or(NOT_SET));
    println!("  CRN:    {}", ctx.crn.as_deref().unwrap_or(NOT_SET));
    println!("  Zone:   {}", ctx.zone.as_deref().unwrap_or(NOT_SET));
    println!("  APIKey: {}", mask_secret(ctx.apikey.as_deref()));

    Ok(())
}

fn run_context_set(
    store: &ContextStore,
    args: &SetContextArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = store.load()?;
    let changes = Context {
        region: args.region.clone(),
        guid: args.guid.clone(),
        crn: args.crn.clone(),
        zone: args.zone.clone(),
        apikey: args.apikey.clone(),
    };

    if let Some(existing) = config.contexts.get_mut(&args.name) {
        existing.merge(changes);
        store.save(&config)?;
        println!("✓ Updated context '{}'", args.name);
        return Ok(());
    }

    if !changes.targets_instance() {
        return Err(IbmError::Config(format!(
            "--guid or --crn is required when creating a new context. Usage:\n  \
             ibmctl config set-context {} --guid <GUID> [--region <REGION>] [--apikey <KEY>]\n  \
             ibmctl config set-context {} --crn <CRN> --zone <ZONE_ID> [--apikey <KEY>]",
            args.name, args.name
        ))
        .into());
    }

    config.contexts.insert(args.name.clone(), changes);
    if config.contexts.len() == 1 {
        config.current_context = Some(args.name.clone());
    }

    store.save(&config)?;
    println!("✓ Created context '{}'", args.name);
    Ok(())
}

fn run_context_use(store: &ContextStore, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = store.load()?;
    ensure_exists(&config, name)?;

    config.current_context = Some(name.to_string());
    store.save(&config)?;
    println!("✓ Switched to context '{}'", name);
    Ok(())
}

fn run_context_delete(store: &ContextStore, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = store.load()?;
    ensure_exists(&config, name)?;

    config.contexts.remove(name);
    if config.current_context.as_deref() == Some(name) {
        config.current_context = None;
    }

    store.save(&config)?;
    println!("✓ Deleted context '{}'", name);
    Ok(())
}

fn run_config_view(store: &ContextStore) -> Result<(), Box<dyn std::error::Error>> {
    let config = masked(store.load()?);
    let json = serde_json::to_string_pretty(&config)
        .map_err(|e| IbmError::Config(format!("Failed to serialize config: {}", e)))?;
    println!("{}", json);
    Ok(())
}

fn ensure_exists(config: &ContextConfig, name: &str) -> Result<(), IbmError> {
    if config.contexts.contains_key(name) {
        Ok(())
    } else {
        Err(IbmError::Config(format!(
            "Context '{}' not found. Available contexts: {}",
            name,
            config.available()
        )))
    }
}

/// Copy of the config with every API key masked
fn masked(mut config: ContextConfig) -> ContextConfig {
    for ctx in config.contexts.values_mut() {
        if ctx.apikey.is_some() {
            ctx.apikey = Some(mask_secret(ctx.apikey.as_deref()));
        }
    }
    config
}

/// Mask a secret for display, keeping the last four characters
pub fn mask_secret(secret: Option<&str>) -> String {
    let Some(secret) = secret else {
        return NOT_SET.to_string();
    };
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() < 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ContextNameArgs;
    use tempfile::TempDir;

    fn test_store(dir: &TempDir) -> ContextStore {
        ContextStore::with_path(dir.path().join("config.json"))
    }

    fn set_args(name: &str) -> SetContextArgs {
        SetContextArgs {
            name: name.to_string(),
            region: None,
            guid: None,
            crn: None,
            zone: None,
            apikey: None,
        }
    }

    fn seed(store: &ContextStore, current: Option<&str>, names: &[&str]) {
        let mut config = ContextConfig {
            current_context: current.map(str::to_string),
            ..Default::default()
        };
        for name in names {
            config.contexts.insert(
                name.to_string(),
                Context {
                    guid: Some(format!("{}-guid", name)),
                    ..Default::default()
                },
            );
        }
        store.save(&config).unwrap();
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret(Some("abcdefghijklmnop")), "****mnop");
        assert_eq!(mask_secret(Some("abcd")), "****abcd");
        assert_eq!(mask_secret(Some("ab")), "****");
        assert_eq!(mask_secret(None), "<not set>");
    }

    #[test]
    fn test_mask_secret_multibyte() {
        assert_eq!(mask_secret(Some("clé-ünïcødé")), "****cødé");
    }

    #[test]
    fn test_context_set_new_requires_instance() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let mut args = set_args("test");
        args.region = Some("eu-de".to_string());

        let err = run_context_set(&store, &args).unwrap_err().to_string();
        assert!(err.contains("--guid or --crn is required"));
        assert!(store.load().unwrap().contexts.is_empty());
    }

    #[test]
    fn test_context_set_new_creates_and_becomes_current() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let mut args = set_args("prod");
        args.guid = Some("g-1".to_string());
        args.region = Some("eu-gb".to_string());
        args.apikey = Some("secret-key".to_string());
        run_context_set(&store, &args).unwrap();

        let config = store.load().unwrap();
        let ctx = &config.contexts["prod"];
        assert_eq!(ctx.guid.as_deref(), Some("g-1"));
        assert_eq!(ctx.region.as_deref(), Some("eu-gb"));
        assert_eq!(ctx.apikey.as_deref(), Some("secret-key"));
        assert_eq!(config.current_context.as_deref(), Some("prod"));
    }

    #[test]
    fn test_context_set_update_merges() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        seed(&store, Some("prod"), &["prod"]);

        let mut args = set_args("prod");
        args.zone = Some("zone-1".to_string());
        run_context_set(&store, &args).unwrap();

        let config = store.load().unwrap();
        assert_eq!(config.contexts["prod"].guid.as_deref(), Some("prod-guid"));
        assert_eq!(config.contexts["prod"].zone.as_deref(), Some("zone-1"));
    }

    #[test]
    fn test_context_set_second_does_not_change_current() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        seed(&store, Some("first"), &["first"]);

        let mut args = set_args("second");
        args.crn = Some("crn:v1:bluemix:public:internet-svcs".to_string());
        run_context_set(&store, &args).unwrap();

        let config = store.load().unwrap();
        assert_eq!(config.contexts.len(), 2);
        assert_eq!(config.current_context.as_deref(), Some("first"));
    }

    #[test]
    fn test_context_use_sets_current() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        seed(&store, Some("prod"), &["prod", "dev"]);

        let action = ConfigAction::UseContext(ContextNameArgs {
            name: "dev".to_string(),
        });
        run_context_command_with(&store, &action).unwrap();

        assert_eq!(store.load().unwrap().current_context.as_deref(), Some("dev"));
    }

    #[test]
    fn test_context_use_nonexistent_errors() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let err = run_context_use(&store, "nonexistent").unwrap_err().to_string();
        assert!(err.contains("not found"));
        assert!(err.contains("<none>"));
    }

    #[test]
    fn test_context_delete_clears_current() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        seed(&store, Some("prod"), &["prod"]);

        run_context_delete(&store, "prod").unwrap();

        let config = store.load().unwrap();
        assert!(config.contexts.is_empty());
        assert!(config.current_context.is_none());
    }

    #[test]
    fn test_context_delete_preserves_other_current() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        seed(&store, Some("prod"), &["prod", "dev"]);

        run_context_delete(&store, "dev").unwrap();

        let config = store.load().unwrap();
        assert_eq!(config.current_context.as_deref(), Some("prod"));
        assert_eq!(config.contexts.len(), 1);
    }

    #[test]
    fn test_context_delete_nonexistent_errors() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        assert!(run_context_delete(&store, "nonexistent").is_err());
    }

    #[test]
    fn test_current_context_unset_errors() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        seed(&store, None, &["prod"]);
        let err = run_context_show(&store).unwrap_err().to_string();
        assert!(err.contains("No current context"));
    }

    #[test]
    fn test_view_masks_apikeys() {
        let mut config = ContextConfig::default();
        config.contexts.insert(
            "prod".to_string(),
            Context {
                apikey: Some("very-secret-1234".to_string()),
                ..Default::default()
            },
        );
        config.contexts.insert("dev".to_string(), Context::default());

        let view = masked(config);
        assert_eq!(view.contexts["prod"].apikey.as_deref(), Some("****1234"));
        assert!(view.contexts["dev"].apikey.is_none());
    }
}
