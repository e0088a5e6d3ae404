// src/cli/handlers/apply.rs

use crate::{
    cli::handlers::{commons, send},
    core::preview::CommandPreview,
    models::CommandTab,
};
use anyhow::Result;
use clap::Parser;
use colored::*;
use dialoguer::{Confirm, theme::ColorfulTheme};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Fills in a command and sends it to the game server."
)]
struct ApplyArgs {
    id: u32,

    #[arg(long, short, value_parser = commons::parse_tab)]
    tab: Option<CommandTab>,

    /// Selects or types a value for an argument: `--set key=value`. Repeatable.
    #[arg(long = "set", short = 's', value_name = "KEY=VALUE")]
    assignments: Vec<String>,

    /// Shows what would be sent without running the relay.
    #[arg(long)]
    dry_run: bool,

    /// Skips the final confirmation.
    #[arg(long, short)]
    yes: bool,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let apply_args = ApplyArgs::try_parse_from(&args)?;
    let (settings, catalog) = commons::load_catalog_for(apply_args.tab)?;
    let command = catalog.find(apply_args.id)?;
    let selection = commons::selection_from_flags(&apply_args.assignments)?;

    let preview = CommandPreview::build(command, &selection);
    commons::print_issues(&preview.issues);

    let final_command = commons::confirm_command(&preview, true)?;
    println!(
        "\n  {:<12} {}",
        t!("commons.label.command").blue(),
        final_command.green().bold()
    );

    if !apply_args.yes
        && !apply_args.dry_run
        && !Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("apply.prompt.confirm"))
            .default(true)
            .interact()?
    {
        println!("{}", t!("common.operation_cancelled"));
        return Ok(());
    }

    send::deliver(&settings, &final_command, apply_args.dry_run)
}
