//! Key label mapping.
//!
//! Turns the labels printed on calculator keys into session input. Command
//! keys become [`Command`]s; every other label is passed on as a token.

use crate::session::{Command, Input};

/// Maps a key label to a command, if it names one.
///
/// # Examples
///
/// ```
/// use scicalc_rs::cli::keys::command_for;
/// use scicalc_rs::session::Command;
///
/// assert_eq!(command_for("="), Some(Command::Equals));
/// assert_eq!(command_for("M+"), Some(Command::MemAdd));
/// assert_eq!(command_for("7"), None);
/// ```
#[must_use]
pub fn command_for(label: &str) -> Option<Command> {
    Some(match label {
        "=" => Command::Equals,
        "C" | "clear" => Command::Clear,
        "⌫" | "bs" | "backspace" => Command::Backspace,
        "+/-" | "±" | "neg" => Command::ToggleSign,
        "n!" | "!" => Command::Factorial,
        "1/x" => Command::Reciprocal,
        "root" | "ʸ√x" => Command::NthRoot,
        "D/R" | "mode" => Command::ToggleAngleMode,
        "MC" => Command::MemClear,
        "MR" => Command::MemRecall,
        "M+" => Command::MemAdd,
        "M-" => Command::MemSubtract,
        "MS" => Command::MemStore,
        _ => return None,
    })
}

/// Maps a key label to session input.
#[must_use]
pub fn parse_input(label: &str) -> Input {
    command_for(label).map_or_else(|| Input::Token(label.to_string()), Input::Command)
}

/// Splits a line into key labels.
pub fn split_keys(line: &str) -> impl Iterator<Item = Input> + '_ {
    line.split_whitespace().map(parse_input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("=", Command::Equals ; "equals")]
    #[test_case("C", Command::Clear ; "clear")]
    #[test_case("⌫", Command::Backspace ; "backspace symbol")]
    #[test_case("bs", Command::Backspace ; "backspace short")]
    #[test_case("+/-", Command::ToggleSign ; "sign")]
    #[test_case("n!", Command::Factorial ; "factorial")]
    #[test_case("1/x", Command::Reciprocal ; "reciprocal")]
    #[test_case("root", Command::NthRoot ; "nth root")]
    #[test_case("D/R", Command::ToggleAngleMode ; "angle mode")]
    #[test_case("MS", Command::MemStore ; "memory store")]
    #[test_case("M-", Command::MemSubtract ; "memory subtract")]
    fn test_command_labels(label: &str, command: Command) {
        assert_eq!(parse_input(label), Input::Command(command));
    }

    #[test_case("7" ; "digit")]
    #[test_case("-" ; "minus")]
    #[test_case("sin" ; "function")]
    #[test_case("π" ; "pi")]
    #[test_case("c" ; "lowercase c")]
    fn test_token_labels(label: &str) {
        assert_eq!(parse_input(label), Input::Token(label.to_string()));
    }

    #[test]
    fn test_split_keys() {
        let inputs: Vec<Input> = split_keys("  2 +  3 = ").collect();
        assert_eq!(
            inputs,
            vec![
                Input::Token("2".to_string()),
                Input::Token("+".to_string()),
                Input::Token("3".to_string()),
                Input::Command(Command::Equals),
            ]
        );
    }
}
