// src/cli/handlers/mod.rs

// One module per command.

pub mod add_stack;
pub mod commons;
pub mod deploy;
pub mod list;
pub mod start;
pub mod stop;
