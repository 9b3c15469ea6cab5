// src/bin/opie.rs

use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::*;
use opie::{
    cli::{
        Cli,
        dispatcher::{self, UsageError},
    },
    core::config::Config,
    state::AppContext,
};

/// The entry point of `opie`.
/// It sets up logging, parses arguments, dispatches to the command handler
/// and performs centralized error handling.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        if let Some(usage) = e.downcast_ref::<UsageError>() {
            // Usage problems get the help text, like a bare `opie --help`.
            eprintln!("\n  {}\n", usage.to_string().red().bold());
            let _ = Cli::command().print_help();
            std::process::exit(1);
        }

        eprintln!("\n{}: {}\n", opie::t!("error.label").red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    dispatcher::dispatch(cli.args, || {
        let config = Config::load()?;
        AppContext::new(config)
    })
}
