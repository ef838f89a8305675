//! CLI subcommand implementations.

pub mod check;
pub mod compare;
pub mod report;
