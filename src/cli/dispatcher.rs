use anyhow::Result;
use thiserror::Error;

use crate::{cli::handlers, state::AppContext};

/// The invocation could not be mapped to a command.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsageError {
    #[error("You must provide a command!")]
    MissingCommand,
    #[error("Invalid command!    \"{0}\" is not a valid command")]
    UnknownCommand(String),
}

/// Defines a command, its aliases and its handler.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>, &mut AppContext) -> Result<()>,
}

/// The single source of truth for all commands.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "start",
        aliases: &[],
        handler: handlers::start::handle,
    },
    CommandDefinition {
        name: "stop",
        aliases: &[],
        handler: handlers::stop::handle,
    },
    CommandDefinition {
        name: "deploy",
        aliases: &[],
        handler: handlers::deploy::handle,
    },
    CommandDefinition {
        name: "list",
        aliases: &["ls"],
        handler: handlers::list::handle,
    },
    CommandDefinition {
        name: "add-stack",
        aliases: &[],
        handler: handlers::add_stack::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

fn locate(all_args: &[String]) -> Result<(&'static CommandDefinition, Vec<String>), UsageError> {
    let (first, rest) = all_args.split_first().ok_or(UsageError::MissingCommand)?;
    let command =
        find_command(first).ok_or_else(|| UsageError::UnknownCommand(first.to_string()))?;
    Ok((command, rest.to_vec()))
}

/// Routes the invocation to its handler.
///
/// The context is only opened once the command is known, so usage errors
/// never touch the configuration file.
pub fn dispatch<F>(all_args: Vec<String>, open_context: F) -> Result<()>
where
    F: FnOnce() -> Result<AppContext>,
{
    log::debug!("Dispatching args: {:?}", all_args);

    let (command, handler_args) = locate(&all_args)?;

    let mut context = open_context()?;
    (command.handler)(handler_args, &mut context)
}
