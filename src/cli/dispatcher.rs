use anyhow::{Result, anyhow};

use crate::cli::handlers;

/// A top-level action, its aliases and its handler.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>) -> Result<()>,
}

/// The single source of truth for all actions.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "list",
        aliases: &["ls"],
        handler: handlers::list::handle,
    },
    CommandDefinition {
        name: "show",
        aliases: &["info"],
        handler: handlers::show::handle,
    },
    CommandDefinition {
        name: "render",
        aliases: &[],
        handler: handlers::render::handle,
    },
    CommandDefinition {
        name: "apply",
        aliases: &[],
        handler: handlers::apply::handle,
    },
    CommandDefinition {
        name: "send",
        aliases: &[],
        handler: handlers::send::handle,
    },
    CommandDefinition {
        name: "artifact",
        aliases: &["art"],
        handler: handlers::artifact::handle,
    },
    CommandDefinition {
        name: "settings",
        aliases: &["config"],
        handler: handlers::settings::handle,
    },
];

/// Finds an action in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// Routes `<action> [args...]` to its handler. No arguments lists the default tab.
pub fn dispatch(all_args: Vec<String>) -> Result<()> {
    log::debug!("Dispatching args: {:?}", all_args);

    let Some((action, rest)) = all_args.split_first() else {
        return handlers::list::handle(Vec::new());
    };

    let command = find_command(action)
        .ok_or_else(|| anyhow!(format!(t!("dispatch.error.unknown_action"), action = action)))?;
    (command.handler)(rest.to_vec())
}
