// src/cli/handlers/commons.rs

// Shared plumbing for the handlers: loading the catalog, reading `--set`, printing a
// preview and prompting for the fields still left in a command.

use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use dialoguer::{Input, theme::ColorfulTheme};
use std::collections::BTreeMap;

use crate::{
    core::{
        catalog::{self, CommandCatalog},
        interpolator,
        preview::CommandPreview,
        selection::{SelectionIssue, SelectionState},
    },
    models::{CommandTab, Settings},
    system::settings,
};

/// The settings plus the catalog of the requested tab (or the configured default).
pub fn load_catalog_for(tab: Option<CommandTab>) -> Result<(Settings, CommandCatalog)> {
    let settings = settings::load_settings().context(t!("commons.error.load_settings"))?;
    let tab = tab.unwrap_or(settings.default_tab);
    let dir = settings::resolve_commands_dir(&settings)?;
    let catalog = catalog::load_catalog(&dir, tab)
        .with_context(|| format!(t!("commons.error.load_catalog"), tab = tab))?;
    Ok((settings, catalog))
}

/// Builds the selection from repeated `--set key=value` flags.
pub fn selection_from_flags(assignments: &[String]) -> Result<SelectionState> {
    Ok(SelectionState::from_assignments(assignments)?)
}

pub fn print_issues(issues: &[SelectionIssue]) {
    for issue in issues {
        eprintln!("{} {}", t!("commons.label.warning").yellow().bold(), issue);
    }
}

/// Prints the materialized command and the placeholders it still contains.
pub fn print_rendered(preview: &CommandPreview) {
    println!(
        "\n  {:<12} {}",
        t!("commons.label.command").blue(),
        preview.rendered.green().bold()
    );
    if !preview.pending.is_empty() {
        let pending: Vec<String> = preview.pending.iter().map(|p| format!("<{}>", p)).collect();
        println!(
            "  {:<12} {}",
            t!("commons.label.pending").blue(),
            pending.join(" ").dimmed()
        );
    }
}

/// Asks for a value for every pending placeholder. Empty answers leave the token in place.
pub fn prompt_pending(pending: &[String]) -> Result<BTreeMap<String, String>> {
    let mut values = BTreeMap::new();
    if pending.is_empty() {
        return Ok(values);
    }

    println!("\n{}", t!("commons.prompt.header").bold());
    for key in pending {
        let value: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(key)
            .allow_empty(true)
            .interact_text()?;
        values.insert(key.clone(), value.trim().to_string());
    }
    Ok(values)
}

/// Fills the pending fields of `preview` and returns the final command.
///
/// With `require_complete`, a command that still contains a placeholder is an error.
pub fn confirm_command(preview: &CommandPreview, require_complete: bool) -> Result<String> {
    complete_command(&preview.rendered, require_complete)
}

/// Prompts for the placeholders left in an already materialized command and formats it.
pub fn complete_command(rendered: &str, require_complete: bool) -> Result<String> {
    let pending = interpolator::pending_placeholders(rendered);
    let answers = prompt_pending(&pending)?;
    let final_command = interpolator::format_result(rendered, &answers);

    let remaining = interpolator::pending_placeholders(&final_command);
    if require_complete && !remaining.is_empty() {
        return Err(anyhow!(format!(
            t!("commons.error.incomplete"),
            keys = remaining.join(", ")
        )));
    }
    Ok(final_command)
}

/// Parses the `--tab` flag value.
pub fn parse_tab(raw: &str) -> Result<CommandTab, String> {
    raw.parse()
}
