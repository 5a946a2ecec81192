//! ibmctl - Main entry point

use std::process;
use std::time::Duration;

use clap::Parser;
use log::{debug, info};

use ibmctl::access_rules::commands::{
    run_delete_rule_command, run_get_rules_command, run_rule_command,
};
use ibmctl::app_config::commands::{
    run_delete_command, run_get_command, run_git_command, run_toggle_command,
};
use ibmctl::config::{defaults, retry};
use ibmctl::context::{effective_context, resolve_active_context, run_context_command};
use ibmctl::{
    ApiKeyResolver, AppConfigClient, Authenticator, Cli, Command, Context, ContextStore, IbmError,
    ServiceClient, ZoneFirewallClient,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting ibmctl v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Command::Config { action } = &cli.command {
        return run_context_command(action);
    }

    let active = resolve_active_context(cli.context.as_deref(), &ContextStore::new())?;
    let ctx = match active {
        Some((name, ctx)) => {
            debug!("Active context: {}", name);
            effective_context(cli.overrides(), Some(ctx))
        }
        None => effective_context(cli.overrides(), None),
    };

    if cli.targets_cis() {
        let crn = require(ctx.crn.as_deref(), "CIS instance CRN", "--crn")?;
        let zone = require(ctx.zone.as_deref(), "CIS zone identifier", "--zone")?;
        let mut client = ZoneFirewallClient::new(crn, zone, authenticator(cli, &ctx)?);
        configure_retries(client.service_mut(), cli.retries);

        return match &cli.command {
            Command::Get { .. } => run_get_rules_command(&client, cli).await,
            Command::Delete { .. } => run_delete_rule_command(&client, cli).await,
            _ => run_rule_command(&client, cli).await,
        };
    }

    let guid = require(
        ctx.guid.as_deref(),
        "App Configuration instance GUID",
        "--guid",
    )?;
    let region = ctx.region.as_deref().unwrap_or(defaults::REGION);
    debug!("App Configuration instance {} in {}", guid, region);

    let mut client = AppConfigClient::new(region, guid, authenticator(cli, &ctx)?);
    configure_retries(client.service_mut(), cli.retries);

    match &cli.command {
        Command::Get { .. } => run_get_command(&client, cli).await,
        Command::Delete { .. } => run_delete_command(&client, cli).await,
        Command::Toggle(_) => run_toggle_command(&client, cli).await,
        Command::Git { .. } => run_git_command(&client, cli).await,
        Command::Rule { .. } | Command::Config { .. } => unreachable!(),
    }
}

fn require<'a>(value: Option<&'a str>, what: &str, flag: &str) -> Result<&'a str, IbmError> {
    value.ok_or_else(|| {
        IbmError::Config(format!(
            "No {} given. Pass {} or store it in a context with 'ibmctl config set-context'",
            what, flag
        ))
    })
}

fn authenticator(cli: &Cli, ctx: &Context) -> Result<Authenticator, IbmError> {
    let apikey = ApiKeyResolver::resolve(cli.apikey.as_deref(), ctx.apikey.as_deref())?;
    Ok(Authenticator::iam(apikey))
}

fn configure_retries(service: &mut ServiceClient, retries: u32) {
    if retries > 0 {
        debug!("Retrying failed requests up to {} times", retries);
        service.enable_retries(
            retries,
            Duration::from_secs(retry::DEFAULT_MAX_INTERVAL_SECS),
        );
    }
}
