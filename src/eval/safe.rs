//! Sandboxed evaluator over the closed expression grammar.

use tracing::debug;

use super::interpreter::{Interpreter, check_names};
use super::parser::{DEFAULT_MAX_DEPTH, Parser};
use super::traits::Evaluator;
use super::validator::{close_parens, validate};
use super::{CalcResult, Number, normalize};
use crate::core::AngleMode;
use crate::error::CalcError;

/// Sequences that never reach the parser.
const FORBIDDEN_SEQUENCES: &[&str] = &["__", ";"];

/// Evaluator that only understands arithmetic and the whitelisted names.
///
/// Pipeline: normalize, guard, auto-close parentheses, validate, parse,
/// check names, interpret, format.
#[derive(Debug, Clone, Copy)]
pub struct SafeEvaluator {
    max_depth: usize,
}

impl Default for SafeEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl SafeEvaluator {
    /// Creates an evaluator with the default nesting limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Creates an evaluator with a custom nesting limit.
    #[must_use]
    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    fn evaluate_raw(&self, text: &str, mode: AngleMode) -> CalcResult<f64> {
        let normalized = normalize(text);

        if FORBIDDEN_SEQUENCES
            .iter()
            .any(|seq| normalized.contains(seq))
        {
            return Err(CalcError::evaluation("invalid expression"));
        }

        let closed = close_parens(&normalized);
        validate(&closed)?;

        let expr = Parser::with_max_depth(&closed, self.max_depth)?.parse()?;
        check_names(&expr)?;

        let value = Interpreter::new(mode).eval(&expr)?;
        if !value.is_finite() {
            return Err(CalcError::domain("numerical result out of range"));
        }
        Ok(value)
    }
}

impl Evaluator for SafeEvaluator {
    fn evaluate(&self, text: &str, mode: AngleMode) -> CalcResult<Number> {
        let result = self.evaluate_raw(text, mode).map(Number::from_f64);
        debug!(expression = text, %mode, ok = result.is_ok(), "evaluated");
        result
    }

    fn evaluate_f64(&self, text: &str, mode: AngleMode) -> CalcResult<f64> {
        self.evaluate_raw(text, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn eval(text: &str) -> CalcResult<Number> {
        SafeEvaluator::new().evaluate(text, AngleMode::Radians)
    }

    fn shown(text: &str) -> String {
        eval(text).unwrap().to_string()
    }

    #[test_case("2+2", "4" ; "addition")]
    #[test_case("5%2", "1" ; "modulo")]
    #[test_case("2^10", "1024" ; "caret power")]
    #[test_case("6×7", "42" ; "times sign")]
    #[test_case("9÷4", "2.25" ; "divide sign")]
    #[test_case("1/3", "0.3333333333" ; "rounded")]
    #[test_case("sqrt(16", "4" ; "auto closed")]
    #[test_case("2*()", "0" ; "empty parens")]
    #[test_case("(16)**(1/2)", "4" ; "nth root")]
    #[test_case("0.1+0.2", "0.3" ; "float noise")]
    #[test_case("log(100, 10)", "2" ; "log base")]
    fn test_evaluate(text: &str, expected: &str) {
        assert_eq!(shown(text), expected);
    }

    #[test]
    fn test_degrees() {
        let evaluator = SafeEvaluator::new();
        let value = evaluator.evaluate("sin(90)", AngleMode::Degrees).unwrap();
        assert_eq!(value, Number::Integer(1));
        let value = evaluator.evaluate("sin(90)", AngleMode::Radians).unwrap();
        assert_eq!(value.to_string(), "0.8939966636");
    }

    #[test_case("__import__('os')" ; "dunder")]
    #[test_case("1;2" ; "semicolon")]
    fn test_sandbox_guard(text: &str) {
        assert_eq!(eval(text), Err(CalcError::evaluation("invalid expression")));
    }

    #[test]
    fn test_errors_by_kind() {
        assert_eq!(eval(""), Err(CalcError::EmptyExpression));
        assert_eq!(eval("1/0"), Err(CalcError::domain("division by zero")));
        assert_eq!(
            eval("1+2)"),
            Err(CalcError::syntax("unbalanced parentheses"))
        );
        assert_eq!(
            eval("Error"),
            Err(CalcError::DisallowedIdentifier {
                name: "Error".to_string()
            })
        );
    }

    #[test]
    fn test_empty_call_keeps_arity_error() {
        assert!(matches!(eval("sin()"), Err(CalcError::Evaluation { .. })));
    }

    #[test]
    fn test_huge_literal_out_of_range() {
        let digits = "9".repeat(400);
        assert_eq!(
            eval(&digits),
            Err(CalcError::domain("numerical result out of range"))
        );
    }

    #[test]
    fn test_depth_limit() {
        let deep = format!("{}1{}", "(".repeat(30), ")".repeat(30));
        assert!(SafeEvaluator::with_max_depth(10).evaluate(&deep, AngleMode::Radians).is_err());
        assert!(SafeEvaluator::new().evaluate(&deep, AngleMode::Radians).is_ok());
    }

    #[test]
    fn test_result_text_round_trips() {
        for text in ["2/3", "-7/4", "sqrt(2)", "10**15+0.5"] {
            let first = eval(text).unwrap();
            let again = eval(&first.to_string()).unwrap();
            assert_eq!(first, again, "{text}");
        }
    }

    #[test]
    fn test_evaluate_f64_unrounded() {
        let value = SafeEvaluator::new()
            .evaluate_f64("1/3", AngleMode::Radians)
            .unwrap();
        assert!((value - 1.0 / 3.0).abs() < f64::EPSILON);
    }
}
