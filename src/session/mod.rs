//! Calculator session.
//!
//! [`CalculatorSession`] owns the buffer, memory, history and angle mode,
//! and turns key input into [`CommandOutcome`]s. It is a two-state machine:
//!
//! - **Editing**: input edits the buffer normally
//! - **Error**: the buffer shows the error marker; the next key clears it
//!   before it runs, except for the angle mode toggle and MC
//!
//! Every failure is recovered here. Nothing a user types can leave the
//! session unusable.

pub mod config;

pub use config::{DEFAULT_ERROR_MARKER, SessionConfig};

use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::core::{
    AngleMode, ExpressionBuffer, HistoryEntry, HistoryLog, MemoryOp, MemoryRegister, Token,
};
use crate::error::CalcError;
use crate::eval::{CalcResult, Evaluator, Number, SafeEvaluator, factorial, reciprocal};

/// Prefix of notifications for failed memory operations.
const MEMORY_FAILURE_PREFIX: &str = "Memory operation failed: ";

/// Session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Normal input.
    #[default]
    Editing,
    /// The last operation failed and the buffer shows the marker.
    Error,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Editing => "editing",
            Self::Error => "error",
        })
    }
}

/// Non-token keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Command {
    /// Evaluate the buffer.
    Equals,
    /// Empty the buffer.
    Clear,
    /// Delete the last character.
    Backspace,
    /// Flip the leading sign.
    ToggleSign,
    /// Replace the buffer with the factorial of its value.
    Factorial,
    /// Replace the buffer with the reciprocal of its value.
    Reciprocal,
    /// Start an nth root of the buffer.
    NthRoot,
    /// Switch between radians and degrees.
    ToggleAngleMode,
    /// Reset memory.
    MemClear,
    /// Copy memory into the buffer.
    MemRecall,
    /// Add the buffer's value to memory.
    MemAdd,
    /// Subtract the buffer's value from memory.
    MemSubtract,
    /// Store the buffer's value in memory.
    MemStore,
}

impl Command {
    /// Returns `true` for commands that leave the buffer and state alone,
    /// so an error marker stays on display.
    #[must_use]
    pub const fn keeps_error(self) -> bool {
        matches!(self, Self::ToggleAngleMode | Self::MemClear)
    }

    const fn memory_op(self) -> Option<MemoryOp> {
        match self {
            Self::MemClear => Some(MemoryOp::Clear),
            Self::MemRecall => Some(MemoryOp::Recall),
            Self::MemAdd => Some(MemoryOp::Add),
            Self::MemSubtract => Some(MemoryOp::Subtract),
            Self::MemStore => Some(MemoryOp::Store),
            _ => None,
        }
    }
}

/// What the UI should show after an input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    /// Text for the main display.
    pub display_text: String,

    /// Whether the display shows the error marker.
    pub is_error: bool,

    /// Message for a status line or dialog, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<String>,
}

/// A single piece of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A token label, appended to the buffer.
    Token(String),
    /// A command key.
    Command(Command),
}

impl From<Command> for Input {
    fn from(command: Command) -> Self {
        Self::Command(command)
    }
}

impl From<&str> for Input {
    fn from(token: &str) -> Self {
        Self::Token(token.to_string())
    }
}

/// A calculator session.
///
/// # Examples
///
/// ```
/// use scicalc_rs::session::{CalculatorSession, Command};
///
/// let mut session = CalculatorSession::new();
/// for token in ["2", "+", "3"] {
///     session.handle_token(token);
/// }
/// let outcome = session.handle_command(Command::Equals);
/// assert_eq!(outcome.display_text, "5");
/// assert!(!outcome.is_error);
/// ```
#[derive(Debug, Clone)]
pub struct CalculatorSession<E = SafeEvaluator> {
    buffer: ExpressionBuffer,
    memory: MemoryRegister,
    history: HistoryLog,
    angle_mode: AngleMode,
    state: SessionState,
    config: SessionConfig,
    evaluator: E,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorSession {
    /// Creates a session with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Creates a session from `config`.
    #[must_use]
    pub fn with_config(config: SessionConfig) -> Self {
        Self::with_evaluator(config, SafeEvaluator::new())
    }
}

impl<E: Evaluator> CalculatorSession<E> {
    /// Creates a session using a custom evaluator.
    pub fn with_evaluator(config: SessionConfig, evaluator: E) -> Self {
        Self {
            buffer: ExpressionBuffer::new(),
            memory: MemoryRegister::new(),
            history: HistoryLog::with_limit(config.history_limit),
            angle_mode: config.angle_mode,
            state: SessionState::Editing,
            config,
            evaluator,
        }
    }

    /// Appends a token label to the buffer.
    ///
    /// A power operator with nothing to raise puts the session in Error.
    pub fn handle_token(&mut self, token: &str) -> CommandOutcome {
        self.begin_edit();

        let parsed = Token::parse(token);
        if parsed == Token::Operator("**") && !self.buffer.has_power_base() {
            return self.fail(&CalcError::syntax("missing base for power operation"), None);
        }

        if !self.buffer.append(&parsed) {
            debug!(token, "token rejected");
        }
        self.outcome(None)
    }

    /// Runs a command key.
    pub fn handle_command(&mut self, command: Command) -> CommandOutcome {
        debug!(?command, state = %self.state, "command");

        if !command.keeps_error() {
            self.begin_edit();
        }

        match command {
            Command::Equals => self.equals(),
            Command::Clear => {
                self.buffer.clear();
                self.outcome(None)
            }
            Command::Backspace => {
                self.buffer.backspace();
                self.outcome(None)
            }
            Command::ToggleSign => {
                self.buffer.toggle_sign();
                self.outcome(None)
            }
            Command::NthRoot => {
                self.buffer.wrap_nth_root();
                self.outcome(None)
            }
            Command::Factorial => self.replace_with(factorial),
            Command::Reciprocal => self.replace_with(reciprocal),
            Command::ToggleAngleMode => {
                self.angle_mode = self.angle_mode.toggled();
                self.outcome(Some(format!("Mode: {}", self.angle_mode)))
            }
            Command::MemClear
            | Command::MemRecall
            | Command::MemAdd
            | Command::MemSubtract
            | Command::MemStore => self.memory_command(command),
        }
    }

    /// Applies any input.
    pub fn apply(&mut self, input: impl Into<Input>) -> CommandOutcome {
        match input.into() {
            Input::Token(token) => self.handle_token(&token),
            Input::Command(command) => self.handle_command(command),
        }
    }

    /// Current buffer text.
    #[must_use]
    pub fn current_display_text(&self) -> &str {
        self.buffer.as_str()
    }

    /// Up to `n` history entries, most recent first.
    pub fn recent_history(&self, n: usize) -> Vec<&HistoryEntry> {
        self.history.recent(n).collect()
    }

    /// Entries for a history display of the configured size.
    pub fn displayed_history(&self) -> Vec<&HistoryEntry> {
        self.recent_history(self.config.history_display)
    }

    /// Current angle mode.
    #[must_use]
    pub const fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    /// Current memory value.
    #[must_use]
    pub const fn memory_value(&self) -> f64 {
        self.memory.recall()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// The whole history log.
    #[must_use]
    pub const fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn begin_edit(&mut self) {
        if self.state == SessionState::Error {
            debug!("clearing error before edit");
            self.buffer.clear();
            self.state = SessionState::Editing;
        }
    }

    fn equals(&mut self) -> CommandOutcome {
        let expression = self.buffer.as_str().to_string();
        match self.evaluator.evaluate(&expression, self.angle_mode) {
            Ok(result) => {
                let text = result.to_string();
                self.history.append(expression, text.clone());
                self.show_result(text)
            }
            Err(err) => self.fail(&err, None),
        }
    }

    fn replace_with<F>(&mut self, op: F) -> CommandOutcome
    where
        F: FnOnce(f64) -> CalcResult<Number>,
    {
        let result = self
            .evaluator
            .evaluate_f64(self.buffer.as_str(), self.angle_mode)
            .and_then(op);
        match result {
            Ok(number) => self.show_result(number.to_string()),
            Err(err) => self.fail(&err, None),
        }
    }

    fn memory_command(&mut self, command: Command) -> CommandOutcome {
        let Some(op) = command.memory_op() else {
            return self.outcome(None);
        };

        if op == MemoryOp::Recall {
            let text = Number::from_f64(self.memory.recall()).to_string();
            return self.show_result(text);
        }

        let operand = if op.takes_operand() {
            match self.buffer_value() {
                Ok(value) => value,
                Err(err) => return self.fail(&err, Some(MEMORY_FAILURE_PREFIX)),
            }
        } else {
            0.0
        };

        let notification = self.memory.apply(op, operand).map(|event| event.to_string());
        self.outcome(notification)
    }

    /// Value of the buffer for memory operations; empty counts as zero.
    fn buffer_value(&self) -> CalcResult<f64> {
        if self.buffer.is_empty() {
            return Ok(0.0);
        }
        self.evaluator
            .evaluate_f64(self.buffer.as_str(), self.angle_mode)
    }

    fn show_result(&mut self, text: String) -> CommandOutcome {
        self.buffer.set_from_result(text);
        self.state = SessionState::Editing;
        self.outcome(None)
    }

    fn fail(&mut self, err: &CalcError, prefix: Option<&str>) -> CommandOutcome {
        let message = format!("{}{err}", prefix.unwrap_or_default());
        warn!(kind = err.kind(), %message, "operation failed");

        self.state = SessionState::Error;
        self.buffer.set_text(self.config.error_marker.clone());
        self.outcome(Some(message))
    }

    fn outcome(&self, notification: Option<String>) -> CommandOutcome {
        CommandOutcome {
            display_text: self.buffer.as_str().to_string(),
            is_error: self.state == SessionState::Error,
            notification,
        }
    }
}
