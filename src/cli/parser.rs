//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::AngleMode;
use crate::error::Result;
use crate::session::SessionConfig;

/// scicalc-rs: scientific calculator engine.
///
/// Evaluates expressions in a sandboxed grammar and replays calculator
/// key presses through a session with memory and history.
#[derive(Parser, Debug)]
#[command(name = "scicalc-rs")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a JSON session configuration file.
    #[arg(short, long, env = "SCICALC_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Maximum history entries kept by the session.
    #[arg(long, env = "SCICALC_HISTORY_LIMIT", global = true)]
    pub history_limit: Option<usize>,

    /// Start in degree mode.
    #[arg(short, long, global = true)]
    pub degrees: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a single expression.
    Eval {
        /// Expression text, e.g. "2^10" or "sin(pi/2)".
        expression: String,
    },

    /// Replay key labels through a fresh session.
    ///
    /// Labels are tokens ("7", "+", "sin", "π") or command keys
    /// ("=", "C", "bs", "+/-", "n!", "1/x", "root", "mode", "MC", "MR",
    /// "M+", "M-", "MS").
    Keys {
        /// Key labels in order.
        #[arg(required = true, allow_hyphen_values = true)]
        keys: Vec<String>,
    },

    /// Interactive session reading key labels from stdin.
    ///
    /// Each line holds whitespace-separated labels. Lines starting with
    /// ':' are meta commands (:history, :memory, :mode, :quit).
    Repl,
}

impl Cli {
    /// Builds the session configuration from the file and flags.
    ///
    /// Flags win over the file, which wins over built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or holds
    /// invalid values.
    pub fn session_config(&self) -> Result<SessionConfig> {
        let mut config = SessionConfig::load_or_default(self.config.as_deref())?;

        if self.degrees {
            config = config.with_angle_mode(AngleMode::Degrees);
        }
        if let Some(limit) = self.history_limit {
            config = config.with_history_limit(Some(limit));
        }

        config.validate()?;
        Ok(config)
    }
}
