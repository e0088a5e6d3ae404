// src/cli/handlers/render.rs

use crate::{
    cli::handlers::commons,
    core::preview::CommandPreview,
    models::CommandTab,
};
use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Prints a command with the given values filled in."
)]
struct RenderArgs {
    id: u32,

    #[arg(long, short, value_parser = commons::parse_tab)]
    tab: Option<CommandTab>,

    /// Selects or types a value for an argument: `--set key=value`. Repeatable.
    #[arg(long = "set", short = 's', value_name = "KEY=VALUE")]
    assignments: Vec<String>,

    /// Prompts for every placeholder still left before printing.
    #[arg(long)]
    confirm: bool,
}

/// Writes only the command to stdout so the output can be piped.
pub fn handle(args: Vec<String>) -> Result<()> {
    let render_args = RenderArgs::try_parse_from(&args)?;
    let (_, catalog) = commons::load_catalog_for(render_args.tab)?;
    let command = catalog.find(render_args.id)?;
    let selection = commons::selection_from_flags(&render_args.assignments)?;

    let preview = CommandPreview::build(command, &selection);
    commons::print_issues(&preview.issues);

    let output = if render_args.confirm {
        commons::confirm_command(&preview, false)?
    } else {
        preview.rendered
    };
    println!("{}", output);
    Ok(())
}
