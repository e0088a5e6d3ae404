// src/cli/handlers/list.rs

use crate::{cli::handlers::commons, models::CommandTab};
use anyhow::Result;
use clap::Parser;
use colored::*;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Lists the commands of a tab, optionally filtered by a search query."
)]
struct ListArgs {
    /// Words to search for in names, templates, arguments and options.
    query: Vec<String>,

    /// Catalog tab to list (gc, gio or lc). Defaults to the configured tab.
    #[arg(long, short, value_parser = commons::parse_tab)]
    tab: Option<CommandTab>,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let list_args = ListArgs::try_parse_from(&args)?;
    let (_, catalog) = commons::load_catalog_for(list_args.tab)?;

    let query = list_args.query.join(" ");
    let matches = catalog.filter(&query);

    println!(
        "\n--- {} {} ---",
        t!("list.header"),
        catalog.tab.to_string().yellow().bold()
    );

    if matches.is_empty() {
        println!("  {}", t!("list.empty").dimmed());
        return Ok(());
    }

    for command in &matches {
        println!(
            "  {:>4}  {:<32} {}",
            command.id.to_string().cyan(),
            command.name,
            command.command.dimmed()
        );
    }
    println!(
        "\n  {}",
        format!(t!("list.summary"), shown = matches.len(), total = catalog.commands.len())
            .dimmed()
    );
    Ok(())
}
