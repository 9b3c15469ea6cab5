// src/core/mod.rs

pub mod actions;
pub mod aggregator;
pub mod config;
pub mod paths;
pub mod resolver;
pub mod stack_display;
