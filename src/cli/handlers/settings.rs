// src/cli/handlers/settings.rs

use crate::{
    cli::handlers::commons,
    core::paths,
    models::{CommandTab, Settings},
    system::settings,
};
use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use dialoguer::{Input, theme::ColorfulTheme};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Shows the settings, or updates the given fields."
)]
struct SettingsArgs {
    /// Player account id.
    #[arg(long)]
    uid: Option<String>,

    /// Player access code.
    #[arg(long)]
    code: Option<String>,

    /// Server id.
    #[arg(long)]
    server: Option<String>,

    /// Relay program line, with `<uid> <code> <server> <command>` tokens.
    #[arg(long)]
    relay: Option<String>,

    /// Directory holding gc.json, gio.json and lc.json.
    #[arg(long)]
    commands_dir: Option<String>,

    /// Tab used when `--tab` is not given.
    #[arg(long, value_parser = commons::parse_tab)]
    default_tab: Option<CommandTab>,

    /// Asks for the player fields one by one.
    #[arg(long, short)]
    interactive: bool,
}

impl SettingsArgs {
    fn has_updates(&self) -> bool {
        self.uid.is_some()
            || self.code.is_some()
            || self.server.is_some()
            || self.relay.is_some()
            || self.commands_dir.is_some()
            || self.default_tab.is_some()
            || self.interactive
    }
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let settings_args = SettingsArgs::try_parse_from(&args)?;
    let path = paths::get_settings_path()?;
    let mut current =
        settings::load_settings_from(&path).context(t!("commons.error.load_settings"))?;

    if settings_args.has_updates() {
        apply_updates(&mut current, settings_args)?;
        settings::save_settings_to(&path, &current)?;
        println!(
            "{}",
            format!(t!("settings.saved"), path = path.display()).green()
        );
    }

    println!("\n--- {} ---", t!("settings.header"));
    println!("  {:<14} {}", t!("settings.label.file").blue(), path.display());
    print_settings(&current);
    Ok(())
}

fn apply_updates(current: &mut Settings, args: SettingsArgs) -> Result<()> {
    if let Some(uid) = args.uid {
        current.player.uid = uid;
    }
    if let Some(code) = args.code {
        current.player.code = code;
    }
    if let Some(server) = args.server {
        current.player.server = server;
    }
    if let Some(relay) = args.relay {
        // An empty value switches the relay off.
        current.transport.relay = Some(relay).filter(|r| !r.trim().is_empty());
    }
    if let Some(dir) = args.commands_dir {
        current.commands_dir = dir;
    }
    if let Some(tab) = args.default_tab {
        current.default_tab = tab;
    }

    if args.interactive {
        let theme = ColorfulTheme::default();
        current.player.uid = Input::with_theme(&theme)
            .with_prompt(t!("settings.prompt.uid"))
            .with_initial_text(current.player.uid.clone())
            .allow_empty(true)
            .interact_text()?;
        current.player.code = Input::with_theme(&theme)
            .with_prompt(t!("settings.prompt.code"))
            .with_initial_text(current.player.code.clone())
            .allow_empty(true)
            .interact_text()?;
        current.player.server = Input::with_theme(&theme)
            .with_prompt(t!("settings.prompt.server"))
            .with_initial_text(current.player.server.clone())
            .allow_empty(true)
            .interact_text()?;
    }
    Ok(())
}

fn print_settings(settings: &Settings) {
    let unset = t!("settings.unset").dimmed().to_string();
    let or_unset = |value: &str| {
        if value.trim().is_empty() {
            unset.clone()
        } else {
            value.to_string()
        }
    };

    println!(
        "  {:<14} {}",
        t!("settings.label.commands_dir").blue(),
        settings.commands_dir
    );
    println!(
        "  {:<14} {}",
        t!("settings.label.default_tab").blue(),
        settings.default_tab
    );
    println!("  {:<14} {}", t!("settings.label.uid").blue(), or_unset(&settings.player.uid));
    // The access code is a credential; only show whether it is set.
    let code = if settings.player.code.trim().is_empty() {
        unset.clone()
    } else {
        "********".to_string()
    };
    println!("  {:<14} {}", t!("settings.label.code").blue(), code);
    println!(
        "  {:<14} {}",
        t!("settings.label.server").blue(),
        or_unset(&settings.player.server)
    );
    println!(
        "  {:<14} {}",
        t!("settings.label.relay").blue(),
        or_unset(settings.transport.relay.as_deref().unwrap_or_default())
    );

    if !settings.player.is_complete() {
        println!("\n  {}", t!("settings.incomplete_player").yellow());
    }
}
