//! App Configuration command handlers

use log::debug;

use crate::cli::{
    Command, DeleteResource, EnvScopedArgs, GetResource, GitAction, GitConfigArgs, ListArgs,
    OutputFormat,
};
use crate::error::IbmError;
use crate::output::{output_list, output_raw, Tabular};
use crate::ui::{confirm_action, create_spinner, finish_spinner_with_status};
use crate::Cli;

use super::models::{Collection, Environment, Feature, GitConfig, Property, Segment};
use super::{AppConfigClient, AppConfigResource, GetOptions, ListOptions, Scope};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Run 'get' for an App Configuration resource
pub async fn run_get_command(client: &AppConfigClient, cli: &Cli) -> CommandResult {
    let Command::Get { resource } = &cli.command else {
        unreachable!()
    };

    match resource {
        GetResource::Env(args) => {
            get_instance_resource::<Environment>(client, cli, args).await
        }
        GetResource::Coll(args) => {
            get_instance_resource::<Collection>(client, cli, args).await
        }
        GetResource::Segment(args) => get_instance_resource::<Segment>(client, cli, args).await,
        GetResource::Feature(args) => get_scoped_resource::<Feature>(client, cli, args).await,
        GetResource::Prop(args) => get_scoped_resource::<Property>(client, cli, args).await,
        GetResource::Gitconfig(args) => get_git_configs(client, cli, args).await,
        GetResource::Rule(_) => unreachable!("access rules are handled by the CIS commands"),
    }
}

async fn get_instance_resource<R: AppConfigResource + Tabular>(
    client: &AppConfigClient,
    cli: &Cli,
    args: &ListArgs,
) -> CommandResult {
    let mut options = ListOptions::new();
    if let Some(tags) = &args.tags {
        options = options.tags(tags);
    }
    if let Some(search) = &args.search {
        options = options.search(search);
    }

    let query = Query {
        scope: Scope::Instance,
        id: args.id.as_deref(),
        filter: args.filter.as_deref(),
        output: args.output,
    };
    show_or_list::<R>(client, cli, query, options).await
}

async fn get_scoped_resource<R: AppConfigResource + Tabular>(
    client: &AppConfigClient,
    cli: &Cli,
    args: &EnvScopedArgs,
) -> CommandResult {
    let mut options = ListOptions::new().include("collections").include("rules");
    if let Some(collections) = &args.collections {
        options = options.filter("collections", collections);
    }
    if let Some(segments) = &args.segments {
        options = options.filter("segments", segments);
    }
    if let Some(tags) = &args.tags {
        options = options.tags(tags);
    }

    let query = Query {
        scope: Scope::environment(&args.env),
        id: args.id.as_deref(),
        filter: args.filter.as_deref(),
        output: args.output,
    };
    show_or_list::<R>(client, cli, query, options).await
}

async fn get_git_configs(
    client: &AppConfigClient,
    cli: &Cli,
    args: &GitConfigArgs,
) -> CommandResult {
    let mut options = ListOptions::new();
    if let Some(collection) = &args.collection {
        options = options.filter("collection_id", collection);
    }
    if let Some(environment) = &args.environment {
        options = options.filter("environment_id", environment);
    }

    let query = Query {
        scope: Scope::Instance,
        id: args.id.as_deref(),
        filter: args.filter.as_deref(),
        output: args.output,
    };
    show_or_list::<GitConfig>(client, cli, query, options).await
}

/// What a 'get' asks for
struct Query<'a> {
    scope: Scope,
    id: Option<&'a str>,
    filter: Option<&'a str>,
    output: OutputFormat,
}

async fn show_or_list<R: AppConfigResource + Tabular>(
    client: &AppConfigClient,
    cli: &Cli,
    query: Query<'_>,
    options: ListOptions,
) -> CommandResult {
    let spinner = create_spinner(&format!("Fetching {}...", R::COLLECTION), cli.batch);

    if let Some(id) = query.id {
        let found = find_one::<R>(client, &query.scope, id, &options).await;
        finish_spinner_with_status(spinner, &found);

        return match found? {
            Some((item, raw)) => show_one(&item, &raw, query.output, cli.no_header),
            None => Err(format!("{} '{}' not found", R::KIND, id).into()),
        };
    }

    let listed = client.list_all::<R>(&query.scope, &options).await;
    finish_spinner_with_status(spinner, &listed);
    let mut items = listed?;

    if let Some(filter) = query.filter {
        items.retain(|item| item.name_contains(filter));
        debug!(
            "Filtered to {} {} matching '{}'",
            items.len(),
            R::COLLECTION,
            filter
        );
    }

    output_list(&items, query.output, cli.no_header, R::COLLECTION)?;
    Ok(())
}

/// Look up by ID, falling back to a listing matched by ID or name
async fn find_one<R: AppConfigResource>(
    client: &AppConfigClient,
    scope: &Scope,
    id: &str,
    options: &ListOptions,
) -> Result<Option<(R, serde_json::Value)>, IbmError> {
    // Direct lookup keeps the raw payload for JSON/YAML output
    if let Some(found) = client.get::<R>(scope, id, &GetOptions::new()).await? {
        return Ok(Some(found));
    }

    let listed = client.list_all::<R>(scope, options).await?;
    match listed.into_iter().find(|item| item.matches(id)) {
        Some(item) => {
            let raw = serde_json::to_value(&item)?;
            Ok(Some((item, raw)))
        }
        None => Ok(None),
    }
}

fn show_one<R: Tabular>(
    item: &R,
    raw: &serde_json::Value,
    output: OutputFormat,
    no_header: bool,
) -> CommandResult {
    if output.is_structured() {
        output_raw(raw, output)?;
    } else {
        output_list(std::slice::from_ref(item), output, no_header, "item")?;
    }
    Ok(())
}

/// Run 'delete' for an App Configuration resource
pub async fn run_delete_command(client: &AppConfigClient, cli: &Cli) -> CommandResult {
    let Command::Delete { resource } = &cli.command else {
        unreachable!()
    };

    match resource {
        DeleteResource::Env(args) => {
            delete_resource::<Environment>(client, cli, Scope::Instance, &args.id, args.yes).await
        }
        DeleteResource::Coll(args) => {
            delete_resource::<Collection>(client, cli, Scope::Instance, &args.id, args.yes).await
        }
        DeleteResource::Segment(args) => {
            delete_resource::<Segment>(client, cli, Scope::Instance, &args.id, args.yes).await
        }
        DeleteResource::Gitconfig(args) => {
            delete_resource::<GitConfig>(client, cli, Scope::Instance, &args.id, args.yes).await
        }
        DeleteResource::Feature(args) => {
            let scope = Scope::environment(&args.env);
            delete_resource::<Feature>(client, cli, scope, &args.id, args.yes).await
        }
        DeleteResource::Prop(args) => {
            let scope = Scope::environment(&args.env);
            delete_resource::<Property>(client, cli, scope, &args.id, args.yes).await
        }
        DeleteResource::Rule(_) => unreachable!("access rules are handled by the CIS commands"),
    }
}

async fn delete_resource<R: AppConfigResource>(
    client: &AppConfigClient,
    cli: &Cli,
    scope: Scope,
    id: &str,
    yes: bool,
) -> CommandResult {
    let spinner = create_spinner(&format!("Looking up {} '{}'...", R::KIND, id), cli.batch);
    let resolved = client.resolve::<R>(&scope, id).await;
    finish_spinner_with_status(spinner, &resolved);

    let item = resolved?.ok_or_else(|| format!("{} '{}' not found", R::KIND, id))?;

    let prompt = format!("Delete {} '{}' ({})?", R::KIND, item.name(), item.id());
    if !confirm_action(&prompt, yes, cli.batch)? {
        println!("Aborted.");
        return Ok(());
    }

    client.delete::<R>(&scope, item.id()).await?;
    println!("✓ Deleted {} '{}'", R::KIND, item.name());
    Ok(())
}

/// Run 'toggle'
pub async fn run_toggle_command(client: &AppConfigClient, cli: &Cli) -> CommandResult {
    let Command::Toggle(args) = &cli.command else {
        unreachable!()
    };

    let enabled = args.enabled();
    let state = if enabled { "on" } else { "off" };
    let spinner = create_spinner(
        &format!("Turning feature '{}' {}...", args.feature_id, state),
        cli.batch,
    );
    let toggled = client
        .toggle_feature(&args.env, &args.feature_id, enabled)
        .await;
    finish_spinner_with_status(spinner, &toggled);

    let feature = match toggled {
        Ok(feature) => feature,
        Err(e) if e.is_not_found() => {
            return Err(format!(
                "Feature '{}' not found in environment '{}'",
                args.feature_id, args.env
            )
            .into())
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "✓ Feature '{}' is {} in environment '{}'",
        feature.name, state, args.env
    );
    Ok(())
}

/// Run 'git promote' / 'git restore'
pub async fn run_git_command(client: &AppConfigClient, cli: &Cli) -> CommandResult {
    let Command::Git { action } = &cli.command else {
        unreachable!()
    };

    match action {
        GitAction::Promote(args) => {
            let prompt = format!(
                "Push the configuration of git config '{}' to its repository?",
                args.id
            );
            if !confirm_action(&prompt, args.yes, cli.batch)? {
                println!("Aborted.");
                return Ok(());
            }

            let spinner = create_spinner("Promoting configuration...", cli.batch);
            let promoted = client.promote_git_config(&args.id).await;
            finish_spinner_with_status(spinner, &promoted);
            let result = promoted?;

            println!(
                "✓ Promoted git config '{}' (commit {})",
                args.id, result.git_commit_id
            );
            if let Some(message) = &result.git_commit_message {
                println!("  {}", message);
            }
        }
        GitAction::Restore(args) => {
            let spinner = create_spinner("Fetching configuration from git...", cli.batch);
            let restored = client.restore_git_config(&args.id).await;
            finish_spinner_with_status(spinner, &restored);
            output_raw(&restored?, args.output)?;
        }
    }
    Ok(())
}
