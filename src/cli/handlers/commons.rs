// src/cli/handlers/commons.rs

// Output shared by the state-changing handlers.

use colored::*;

use crate::models::{NamedEntity, OperationAck};

/// Prints the "accepted" line for a request the service took on.
pub fn print_accepted(ack: &OperationAck) {
    if let Some(id) = &ack.deployment_id {
        println!("  {}", format!(t!("common.info.deployment_id"), id = id).dimmed());
    }
    println!("{}", t!("common.success.accepted").green().bold());
}

/// Quoted `"name" on stack "stack"` fragment used by progress lines.
pub fn describe_target(entity: &NamedEntity) -> String {
    format!(
        t!("common.label.on_stack"),
        name = entity.display_name,
        stack = entity.stack_name
    )
}
