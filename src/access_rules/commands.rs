//! Access rule command handlers

use log::debug;

use crate::cli::{Command, DeleteResource, GetResource, RuleAction};
use crate::output::{output_list, output_raw};
use crate::ui::{confirm_action, create_spinner, finish_spinner_with_status};
use crate::Cli;

use super::{
    CreateAccessRuleOptions, ListAccessRulesOptions, RuleConfiguration, UpdateAccessRuleOptions,
    ZoneFirewallClient,
};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Run 'get rule'
pub async fn run_get_rules_command(client: &ZoneFirewallClient, cli: &Cli) -> CommandResult {
    let Command::Get {
        resource: GetResource::Rule(args),
    } = &cli.command
    else {
        unreachable!()
    };

    if let Some(id) = &args.id {
        let spinner = create_spinner(&format!("Fetching access rule '{}'...", id), cli.batch);
        let found = client.get_access_rule(id).await;
        finish_spinner_with_status(spinner, &found);

        let Some((rule, raw)) = found? else {
            return Err(format!("Access rule '{}' not found", id).into());
        };
        if args.output.is_structured() {
            output_raw(&raw, args.output)?;
        } else {
            output_list(std::slice::from_ref(&rule), args.output, cli.no_header, "rules")?;
        }
        return Ok(());
    }

    let mut options = ListAccessRulesOptions::new();
    if let Some(mode) = args.mode {
        options = options.mode(mode.into());
    }
    if let Some(target) = args.target {
        options = options.configuration_target(target.as_str());
    }
    if let Some(value) = &args.value {
        options = options.configuration_value(value);
    }
    if let Some(notes) = &args.notes {
        options = options.notes(notes);
    }
    debug!("Listing access rules with {:?}", options);

    let spinner = create_spinner("Fetching access rules...", cli.batch);
    let listed = client.list_all_access_rules(&options).await;
    finish_spinner_with_status(spinner, &listed);
    let rules = listed?;

    output_list(&rules, args.output, cli.no_header, "rules")?;
    Ok(())
}

/// Run 'delete rule'
pub async fn run_delete_rule_command(client: &ZoneFirewallClient, cli: &Cli) -> CommandResult {
    let Command::Delete {
        resource: DeleteResource::Rule(args),
    } = &cli.command
    else {
        unreachable!()
    };

    let spinner = create_spinner(&format!("Looking up access rule '{}'...", args.id), cli.batch);
    let found = client.get_access_rule(&args.id).await;
    finish_spinner_with_status(spinner, &found);

    let Some((rule, _)) = found? else {
        return Err(format!("Access rule '{}' not found", args.id).into());
    };

    let prompt = format!(
        "Delete {} rule for {} '{}' ({})?",
        rule.mode,
        rule.configuration.target(),
        rule.configuration.value(),
        rule.id
    );
    if !confirm_action(&prompt, args.yes, cli.batch)? {
        println!("Aborted.");
        return Ok(());
    }

    let deleted = client.delete_access_rule(&rule.id).await?;
    println!("✓ Deleted access rule '{}'", deleted);
    Ok(())
}

/// Run 'rule create' / 'rule update'
pub async fn run_rule_command(client: &ZoneFirewallClient, cli: &Cli) -> CommandResult {
    let Command::Rule { action } = &cli.command else {
        unreachable!()
    };

    match action {
        RuleAction::Create(args) => {
            let configuration = RuleConfiguration::new(args.target.as_str(), args.value.clone())?;
            let mut options = CreateAccessRuleOptions::new(args.mode.into(), configuration);
            if let Some(notes) = &args.notes {
                options = options.notes(notes);
            }

            let spinner = create_spinner("Creating access rule...", cli.batch);
            let created = client.create_access_rule(&options).await;
            finish_spinner_with_status(spinner, &created);
            let rule = created?;

            println!(
                "✓ Created {} rule '{}' for {} {}",
                rule.mode,
                rule.id,
                rule.configuration.target(),
                rule.configuration.value()
            );
        }
        RuleAction::Update(args) => {
            let options = UpdateAccessRuleOptions {
                mode: args.mode.map(Into::into),
                notes: args.notes.clone(),
                ..Default::default()
            };

            let spinner = create_spinner(&format!("Updating access rule '{}'...", args.id), cli.batch);
            let updated = client.update_access_rule(&args.id, &options).await;
            finish_spinner_with_status(spinner, &updated);
            let rule = updated?;

            println!("✓ Updated access rule '{}' (mode {})", rule.id, rule.mode);
        }
    }
    Ok(())
}
