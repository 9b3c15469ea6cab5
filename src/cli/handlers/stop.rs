// src/cli/handlers/stop.rs

use anyhow::Result;
use clap::Parser;
use colored::*;

use super::commons;
use crate::state::AppContext;

// --- Command Argument Parsing ---
#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Stops an instance.")]
struct StopArgs {
    /// The instance name, optionally followed by the stack name.
    #[arg(required = true)]
    tokens: Vec<String>,
}

// --- Main Handler ---
pub fn handle(args: Vec<String>, context: &mut AppContext) -> Result<()> {
    // 1. Parse the name tokens.
    let stop_args = StopArgs::try_parse_from(&args)?;

    // 2. Aggregate the stacks, resolve one instance and request the stop.
    let (runtime, service) = context.service()?;
    let action = runtime.block_on(service.stop(&stop_args.tokens))?;

    // 3. Report the accepted request. Completion is not awaited.
    println!(
        "{}",
        format!(
            t!("stop.info.stopping"),
            target = commons::describe_target(&action.instance)
        )
        .cyan()
    );
    commons::print_accepted(&action.ack);
    Ok(())
}
