//! # scicalc-rs
//!
//! Scientific calculator engine.
//!
//! scicalc-rs turns calculator key presses into an expression, evaluates it
//! against a closed grammar and a fixed whitelist of functions, and keeps
//! the surrounding calculator state. No general-purpose interpreter is ever
//! involved, so nothing typed into the buffer can escape the arithmetic.
//!
//! ## Features
//!
//! - **Expression buffer**: incremental editing with result chaining
//! - **Safe evaluation**: recursive-descent parser and AST interpreter
//! - **Scientific functions**: trig in degrees or radians, logarithms,
//!   exact factorials, gamma for non-integers
//! - **Session state**: memory register, result history, error recovery

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod error;
pub mod eval;
pub mod logging;
pub mod session;

// Re-export commonly used types at crate root
pub use error::{CalcError, Error, Result};

// Re-export core domain types
pub use crate::core::{AngleMode, ExpressionBuffer, HistoryEntry, HistoryLog, MemoryRegister, Token};

// Re-export evaluation types
pub use eval::{Evaluator, Number, SafeEvaluator, evaluate, factorial, reciprocal};

// Re-export session types
pub use session::{
    CalculatorSession, Command, CommandOutcome, Input, SessionConfig, SessionState,
};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
