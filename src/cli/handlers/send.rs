// src/cli/handlers/send.rs

use crate::{
    models::{Settings, TransportRequest},
    system::{settings, transport},
};
use anyhow::{Context, Result, anyhow};
use clap::Parser;
use colored::*;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Sends a command typed by hand, exactly as written."
)]
struct SendArgs {
    /// The full command, e.g. `/give 501024 x5`.
    #[arg(required = true)]
    command: Vec<String>,

    /// Shows what would be sent without running the relay.
    #[arg(long)]
    dry_run: bool,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let send_args = SendArgs::try_parse_from(&args)?;
    let command = send_args.command.join(" ");
    if command.trim().is_empty() {
        return Err(anyhow!(t!("send.error.empty")));
    }
    let settings = settings::load_settings().context(t!("commons.error.load_settings"))?;
    deliver(&settings, command.trim(), send_args.dry_run)
}

/// Sends `command` for the configured player and prints the server's reply.
pub fn deliver(settings: &Settings, command: &str, dry_run: bool) -> Result<()> {
    let request = TransportRequest::from_player(&settings.player, command)?;
    let transport = transport::build_transport(&settings.transport, dry_run)?;

    log::debug!("Sending command for uid {}: {}", request.uid, request.command);
    let response = transport.send(&request)?;

    let code = response.code.to_string();
    let code = if matches!(response.code, 0 | 200) {
        code.green()
    } else {
        code.yellow()
    };
    println!(
        "\n  {:<12} {} ({} {})",
        t!("send.label.response").blue(),
        response.message,
        t!("send.label.code"),
        code
    );
    Ok(())
}
