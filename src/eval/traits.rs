//! Evaluator trait definition.

use super::{CalcResult, Number};
use crate::core::AngleMode;

/// Trait for turning expression text into a [`Number`].
///
/// The same text and mode must always produce the same result.
///
/// # Examples
///
/// ```
/// use scicalc_rs::core::AngleMode;
/// use scicalc_rs::eval::{Evaluator, SafeEvaluator};
///
/// let evaluator = SafeEvaluator::new();
/// let value = evaluator.evaluate("2+2", AngleMode::Radians).unwrap();
/// assert_eq!(value.to_string(), "4");
/// ```
pub trait Evaluator: Send + Sync {
    /// Evaluates `text`, reading trigonometric arguments in `mode`.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::error::CalcError`] describing why the expression
    /// was rejected.
    fn evaluate(&self, text: &str, mode: AngleMode) -> CalcResult<Number>;

    /// Evaluates `text` and returns the raw value.
    ///
    /// Used where the result feeds another computation (factorial, memory).
    fn evaluate_f64(&self, text: &str, mode: AngleMode) -> CalcResult<f64> {
        self.evaluate(text, mode).map(|n| n.as_f64())
    }
}
