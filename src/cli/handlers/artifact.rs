// src/cli/handlers/artifact.rs

use crate::{
    cli::handlers::{commons, send},
    core::{
        artifact::{self, ArtifactSpec, SelectedStat},
        interpolator,
    },
    system::settings,
};
use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use dialoguer::{Confirm, theme::ColorfulTheme};
use std::collections::BTreeMap;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Builds the give command for a custom artifact."
)]
struct ArtifactArgs {
    /// Artifact id. Stays a placeholder when omitted.
    artifact_id: Option<String>,

    /// Artifact level, from 0 to 20.
    #[arg(long, short, default_value_t = 1)]
    level: u32,

    /// How many copies to give, from 1 to 999.
    #[arg(long, short = 'n', default_value_t = 1)]
    amount: u32,

    /// Main stat, by name (e.g. "CRIT Rate") or id.
    #[arg(long, short, default_value = "HP")]
    main: String,

    /// Sub-stat by id or name, with an optional roll count: `--stat 501204,3`. Up to 4.
    #[arg(long = "stat", short = 's', value_name = "STAT[,ROLLS]")]
    stats: Vec<String>,

    /// Lists the known sub-stats and main stats instead of building a command.
    #[arg(long)]
    list_stats: bool,

    /// Prompts for the artifact id when it was not given.
    #[arg(long)]
    confirm: bool,

    /// Sends the command for the configured player.
    #[arg(long)]
    send: bool,

    /// With --send, shows what would be sent without running the relay.
    #[arg(long)]
    dry_run: bool,

    /// With --send, skips the final confirmation.
    #[arg(long, short)]
    yes: bool,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let artifact_args = ArtifactArgs::try_parse_from(&args)?;
    if artifact_args.list_stats {
        print_stat_tables();
        return Ok(());
    }

    let stats = artifact_args
        .stats
        .iter()
        .map(|raw| raw.parse::<SelectedStat>())
        .collect::<Result<Vec<_>, _>>()?;
    let spec = ArtifactSpec {
        artifact_id: artifact_args
            .artifact_id
            .unwrap_or_else(|| artifact::ARTIFACT_ID_PLACEHOLDER.to_string()),
        level: artifact_args.level,
        amount: artifact_args.amount,
        main_stat_id: artifact::main_stat_id(&artifact_args.main)?,
        stats,
    };
    let command = spec.command()?;
    print_stats(&spec.stats);

    if !artifact_args.send {
        let output = if artifact_args.confirm {
            commons::complete_command(&command, false)?
        } else {
            interpolator::format_result(&command, &BTreeMap::<String, String>::new())
        };
        println!("{}", output);
        return Ok(());
    }

    let settings = settings::load_settings().context(t!("commons.error.load_settings"))?;
    let final_command = commons::complete_command(&command, true)?;
    println!(
        "\n  {:<12} {}",
        t!("commons.label.command").blue(),
        final_command.green().bold()
    );

    if !artifact_args.yes
        && !artifact_args.dry_run
        && !Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("apply.prompt.confirm"))
            .default(true)
            .interact()?
    {
        println!("{}", t!("common.operation_cancelled"));
        return Ok(());
    }

    send::deliver(&settings, &final_command, artifact_args.dry_run)
}

/// Writes the sub-stat breakdown to stderr so stdout stays the bare command.
fn print_stats(stats: &[SelectedStat]) {
    for stat in stats {
        let name = stat.name();
        let value = stat.value_label();
        let value = if artifact::is_percent_stat(&name) {
            value
        } else {
            format!("+{}", value)
        };
        eprintln!(
            "  {:<24} {:>10}  {}",
            name.cyan(),
            value.green(),
            format!("{},{}", stat.id, stat.rolls).dimmed()
        );
    }
}

fn print_stat_tables() {
    println!("\n--- {} ---", t!("artifact.header.sub_stats").yellow().bold());
    for stat in artifact::ARTIFACT_STATS {
        println!(
            "  {:<8} {:<24} {}",
            stat.id.cyan(),
            stat.display_name(),
            stat.base_label().dimmed()
        );
    }

    println!("\n--- {} ---", t!("artifact.header.main_stats").yellow().bold());
    for (name, id) in artifact::MAIN_STAT_OPTIONS {
        println!("  {:<8} {}", id.to_string().cyan(), name);
    }
}
