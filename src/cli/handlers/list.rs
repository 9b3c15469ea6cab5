// src/cli/handlers/list.rs

use anyhow::Result;
use clap::Parser;

use crate::{core::stack_display, state::AppContext};

// --- Command Argument Parsing ---
#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Lists the configured stacks.")]
struct ListArgs {}

// --- Main Handler ---
pub fn handle(args: Vec<String>, context: &mut AppContext) -> Result<()> {
    let _list_args = ListArgs::try_parse_from(&args)?;

    // 1. Fetch every configured stack, in configuration order.
    let (runtime, service) = context.service()?;
    let snapshots = runtime.block_on(service.list())?;

    // 2. One table per stack.
    stack_display::print_snapshots(&snapshots);
    Ok(())
}
