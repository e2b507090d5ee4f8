//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use std::fmt::Write as FmtWrite;
use std::io::{self, BufRead, Write as IoWrite};

use tracing::debug;

use crate::cli::keys::{parse_input, split_keys};
use crate::cli::output::{
    OutputFormat, SessionReport, format_history, format_outcome, format_report, format_value,
};
use crate::cli::parser::{Cli, Commands};
use crate::error::{CommandError, Result};
use crate::eval::{Evaluator, Number, SafeEvaluator};
use crate::session::{CalculatorSession, CommandOutcome, SessionConfig};

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, an expression fails to
/// evaluate, or the terminal streams fail.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let config = cli.session_config()?;

    match &cli.command {
        Commands::Eval { expression } => cmd_eval(&config, expression, format),
        Commands::Keys { keys } => cmd_keys(config, keys, format),
        Commands::Repl => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut session = CalculatorSession::with_config(config);
            run_repl(&mut session, stdin.lock(), stdout.lock(), format)?;
            Ok(String::new())
        }
    }
}

fn cmd_eval(config: &SessionConfig, expression: &str, format: OutputFormat) -> Result<String> {
    let value = SafeEvaluator::new().evaluate(expression, config.angle_mode)?;
    Ok(format_value(expression, &value, format))
}

fn cmd_keys(config: SessionConfig, keys: &[String], format: OutputFormat) -> Result<String> {
    let mut session = CalculatorSession::with_config(config);

    let mut last = None;
    let mut notes = Vec::new();
    for key in keys {
        let outcome = session.apply(parse_input(key));
        if let Some(ref note) = outcome.notification {
            notes.push(note.clone());
        }
        last = Some(outcome);
    }

    let Some(last) = last else {
        return Err(CommandError::MissingArgument("KEYS".to_string()).into());
    };

    let outcome = merge_notifications(last, notes);
    let report = SessionReport {
        outcome: &outcome,
        state: session.state(),
        angle_mode: session.angle_mode(),
        memory: Number::from_f64(session.memory_value()),
        history: session.displayed_history(),
    };
    Ok(format_report(&report, format))
}

/// Runs an interactive session over line-based input.
///
/// Each line is split into key labels and applied in order; the final
/// display and every notification raised by the line are printed. Lines
/// starting with `:` are meta commands. Stops at end of input or `:quit`.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub fn run_repl<R, W, E>(
    session: &mut CalculatorSession<E>,
    input: R,
    mut output: W,
    format: OutputFormat,
) -> Result<()>
where
    R: BufRead,
    W: IoWrite,
    E: Evaluator,
{
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = if let Some(meta) = trimmed.strip_prefix(':') {
            match meta_command(session, meta, format) {
                Some(text) => text,
                None => break,
            }
        } else {
            let mut last = None;
            let mut notes = Vec::new();
            for input in split_keys(trimmed) {
                let outcome = session.apply(input);
                if let Some(ref note) = outcome.notification {
                    notes.push(note.clone());
                }
                last = Some(outcome);
            }
            last.map(|outcome| format_outcome(&merge_notifications(outcome, notes), format))
                .unwrap_or_default()
        };

        output.write_all(response.as_bytes())?;
        output.flush()?;
    }

    debug!("repl finished");
    Ok(())
}

/// Handles a `:` command. Returns `None` to stop the loop.
fn meta_command<E: Evaluator>(
    session: &CalculatorSession<E>,
    meta: &str,
    format: OutputFormat,
) -> Option<String> {
    let mut output = String::new();
    match meta.trim() {
        "quit" | "q" | "exit" => return None,
        "history" | "h" => output = format_history(&session.displayed_history(), format),
        "memory" | "m" => {
            let _ = writeln!(output, "{}", Number::from_f64(session.memory_value()));
        }
        "mode" => {
            let _ = writeln!(output, "{}", session.angle_mode());
        }
        other => {
            let _ = writeln!(output, "unknown command: :{other}");
        }
    }
    Some(output)
}

/// Folds the notifications raised by several inputs into the last outcome.
fn merge_notifications(mut outcome: CommandOutcome, notes: Vec<String>) -> CommandOutcome {
    if !notes.is_empty() {
        outcome.notification = Some(notes.join("; "));
    }
    outcome
}
