// src/bin/gmh.rs

use clap::Parser;
use colored::*;
use gm_handbook::cli::{Cli, dispatcher};

/// Sets up logging, parses the arguments, dispatches to the handler and reports any error.
fn main() {
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("CLI args parsed: {:?}", cli);

    if let Err(e) = dispatcher::dispatch(cli.args) {
        // Argument errors from a handler's own parser already carry clap's formatting.
        if let Some(clap_err) = e.downcast_ref::<clap::Error>() {
            clap_err.exit();
        }
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}
