//! CLI layer for scicalc-rs.
//!
//! Provides the command-line interface using clap: one-shot evaluation,
//! key replay, and an interactive line-based session.

pub mod commands;
pub mod keys;
pub mod output;
pub mod parser;

pub use commands::{execute, run_repl};
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
