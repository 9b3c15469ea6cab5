// src/cli/handlers/add_stack.rs

use anyhow::Result;
use clap::Parser;
use colored::*;

use crate::{core::actions, state::AppContext};

// --- Command Argument Parsing ---
#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Adds a stack id to the configuration.")]
struct AddStackArgs {
    /// The id of the stack to add.
    stack_id: Option<String>,
}

// --- Main Handler ---
pub fn handle(args: Vec<String>, context: &mut AppContext) -> Result<()> {
    // 1. Parse the id.
    let add_args = AddStackArgs::try_parse_from(&args)?;

    // A missing id is validated like an empty one.
    let stack_id = add_args.stack_id.unwrap_or_default();
    // 2. Validate, append and save. Nothing is appended if the save fails.
    actions::add_stack_id(context.config_mut(), &stack_id)?;

    log::debug!("Config saved to '{}'.", context.config().path().display());
    println!("{}", t!("add_stack.info.added").cyan());
    Ok(())
}
