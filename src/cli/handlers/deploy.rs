// src/cli/handlers/deploy.rs

use anyhow::Result;
use clap::Parser;
use colored::*;

use super::commons;
use crate::state::AppContext;

// --- Command Argument Parsing ---
#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Deploys an app to an instance.")]
struct DeployArgs {
    /// The app name, the instance name and optionally the stack name, in any order.
    #[arg(required = true)]
    tokens: Vec<String>,

    /// The comment to attach to the deployment.
    #[arg(long, short)]
    comment: Option<String>,
}

// --- Main Handler ---
pub fn handle(args: Vec<String>, context: &mut AppContext) -> Result<()> {
    // 1. Parse the tokens and the optional comment.
    let deploy_args = DeployArgs::try_parse_from(&args)?;

    // 2. Resolve instance and app; both must live in the same stack.
    let (runtime, service) = context.service()?;
    let action = runtime.block_on(
        service.deploy(&deploy_args.tokens, deploy_args.comment.as_deref()),
    )?;

    // 3. Report what was sent.
    println!(
        "{}",
        format!(
            t!("deploy.info.deploying"),
            app = action.app.display_name,
            target = commons::describe_target(&action.instance)
        )
        .cyan()
    );
    if !action.comment.is_empty() {
        println!("  {}", format!(t!("deploy.info.comment"), comment = action.comment).dimmed());
    }
    commons::print_accepted(&action.ack);
    Ok(())
}
