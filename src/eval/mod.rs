//! Expression evaluation for scicalc-rs.
//!
//! Text typed into the buffer is evaluated by a small pipeline instead of a
//! general-purpose interpreter:
//!
//! - **Normalization**: display symbols become grammar operators
//! - **Validation**: non-empty, balanced, no adjacent operators
//! - **Parsing**: recursive descent into an [`Expr`] tree
//! - **Name check**: only whitelisted functions and constants survive
//! - **Interpretation**: `f64` arithmetic with explicit domain checks
//! - **Formatting**: [`Number`] applies the integer/10-decimal display policy

pub mod interpreter;
pub mod lexer;
pub mod number;
pub mod parser;
pub mod safe;
pub mod special;
pub mod traits;
pub mod validator;

pub use interpreter::{CONSTANTS, FUNCTIONS, Interpreter, check_names, is_allowed};
pub use number::{DECIMAL_PLACES, Number};
pub use parser::{Expr, Parser, parse};
pub use safe::SafeEvaluator;
pub use special::{factorial, reciprocal};
pub use traits::Evaluator;
pub use validator::{close_parens, validate};

use crate::core::AngleMode;
use crate::error::CalcError;

/// Result type for evaluation steps.
pub type CalcResult<T> = std::result::Result<T, CalcError>;

/// Rewrites display symbols into grammar operators.
///
/// `^` becomes `**`, `×` becomes `*` and `÷` becomes `/`. An empty `()`
/// becomes `0` unless it directly follows a letter, digit or `_`, so a call
/// like `sin()` still reports its arity.
///
/// # Examples
///
/// ```
/// use scicalc_rs::eval::normalize;
///
/// assert_eq!(normalize("2^3×4÷()"), "2**3*4/0");
/// assert_eq!(normalize("sin()"), "sin()");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '^' => out.push_str("**"),
            '×' => out.push('*'),
            '÷' => out.push('/'),
            '(' if chars.peek() == Some(&')') && !ends_with_name_char(&out) => {
                chars.next();
                out.push('0');
            }
            other => out.push(other),
        }
    }

    out
}

fn ends_with_name_char(text: &str) -> bool {
    text.chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Evaluates `text` with a default [`SafeEvaluator`].
///
/// # Examples
///
/// ```
/// use scicalc_rs::core::AngleMode;
/// use scicalc_rs::eval::evaluate;
///
/// assert_eq!(evaluate("2+2", AngleMode::Radians).unwrap().to_string(), "4");
/// assert!(evaluate("1/0", AngleMode::Radians).is_err());
/// ```
pub fn evaluate(text: &str, mode: AngleMode) -> CalcResult<Number> {
    SafeEvaluator::new().evaluate(text, mode)
}
