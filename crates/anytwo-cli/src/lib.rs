//! Any-two agreement CLI library.
//!
//! This crate provides the CLI interface for comparing observers' coding sheets.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, InputArgs};
pub use config::Config;
