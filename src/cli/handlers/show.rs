// src/cli/handlers/show.rs

use crate::{
    cli::handlers::commons,
    core::{
        preview::CommandPreview,
        resolver,
        search::SearchRequest,
        selection::SelectionState,
    },
    models::{Argument, ArgumentKind, Command, CommandTab},
};
use anyhow::Result;
use clap::Parser;
use colored::*;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Shows a command's arguments, as they look for the given selection."
)]
struct ShowArgs {
    /// Id of the command inside its tab.
    id: u32,

    #[arg(long, short, value_parser = commons::parse_tab)]
    tab: Option<CommandTab>,

    /// Selects or types a value for an argument: `--set key=value`. Repeatable.
    #[arg(long = "set", short = 's', value_name = "KEY=VALUE")]
    assignments: Vec<String>,

    /// Prints the handbook search request each search argument would send for this query.
    #[arg(long, value_name = "QUERY")]
    lookup: Option<String>,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let show_args = ShowArgs::try_parse_from(&args)?;
    let (_, catalog) = commons::load_catalog_for(show_args.tab)?;
    let command = catalog.find(show_args.id)?;
    let selection = commons::selection_from_flags(&show_args.assignments)?;
    let preview = CommandPreview::build(command, &selection);

    println!(
        "\n--- {} #{} '{}' ({}) ---",
        t!("show.header"),
        command.id,
        command.name.yellow(),
        catalog.tab
    );
    println!(
        "  {:<12} {}",
        t!("show.label.template").blue(),
        command.command
    );

    if preview.visible.is_empty() {
        println!("\n  {}", t!("show.no_arguments").dimmed());
    } else {
        println!("\n  {}:", t!("show.label.arguments").blue());
        for argument in &preview.visible {
            print_argument(command, argument, &selection);
        }
    }

    if let Some(query) = &show_args.lookup {
        print_lookups(&preview.visible, query)?;
    }

    commons::print_rendered(&preview);
    commons::print_issues(&preview.issues);
    Ok(())
}

fn print_argument(command: &Command, argument: &Argument, selection: &SelectionState) {
    let value = selection
        .get(&argument.key)
        .map(|v| format!("= {}", v).green().to_string())
        .unwrap_or_default();
    let label = if argument.name.is_empty() {
        argument.key.as_str()
    } else {
        argument.name.as_str()
    };

    println!(
        "    {} {} [{}] {}",
        format!("<{}>", argument.key).cyan(),
        label,
        argument.kind.type_name().dimmed(),
        value
    );

    let description = resolver::effective_description(command, argument, selection);
    if !description.is_empty() {
        println!("        {}", description.dimmed());
    }

    match &argument.kind {
        ArgumentKind::Select { .. } => {
            let options = resolver::resolve_options(command, argument);
            if options.is_empty() {
                println!("        {}", t!("show.no_options").red());
            }
            for option in options {
                let marker = if selection.get(&argument.key) == Some(option.value.as_str()) {
                    "●".green().to_string()
                } else {
                    "○".dimmed().to_string()
                };
                println!(
                    "        {} {:<16} {}",
                    marker,
                    option.value,
                    option.description.dimmed()
                );
            }
        }
        ArgumentKind::Number { limit } => {
            let widget = if selection.uses_slider(&argument.key) {
                t!("show.widget.slider")
            } else {
                t!("show.widget.input")
            };
            match limit {
                Some(limit) => println!(
                    "        {}",
                    format!(t!("show.number.range"), min = limit.min, max = limit.max, widget = widget)
                        .dimmed()
                ),
                None => println!("        {}", widget.dimmed()),
            }
        }
        ArgumentKind::Search { api: Some(api) } => {
            println!(
                "        {}",
                format!(t!("show.search.game"), game = api.game.code()).dimmed()
            );
        }
        ArgumentKind::Unsupported => {
            println!("        {}", t!("show.unsupported").red());
        }
        ArgumentKind::Search { api: None } | ArgumentKind::Text => {}
    }
}

fn print_lookups(visible: &[Argument], query: &str) -> Result<()> {
    let mut printed = false;
    for argument in visible {
        if let ArgumentKind::Search { api: Some(api) } = &argument.kind {
            let request = SearchRequest::for_argument(api, &argument.key, query);
            println!(
                "\n  {} <{}> ({}): {}",
                t!("show.label.lookup").blue(),
                argument.key,
                request.game.code(),
                request.to_json()?
            );
            printed = true;
        }
    }
    if !printed {
        println!("\n  {}", t!("show.no_search_arguments").dimmed());
    }
    Ok(())
}
