//! Expression buffer for scicalc-rs.
//!
//! The buffer holds the text of the expression being typed. It is never
//! parsed here; edits only follow a few normalization rules (fresh start
//! after a result, one decimal point per number, function prefixes opening a
//! parenthesis).

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Characters that end a numeric run.
const OPERATOR_CHARS: &[char] = &['+', '-', '*', '/', '%', '^', '×', '÷'];

/// A classified input token.
///
/// # Examples
///
/// ```
/// use scicalc_rs::core::Token;
///
/// assert_eq!(Token::parse("7"), Token::Digit('7'));
/// assert_eq!(Token::parse("ln").text(), "log(");
/// assert_eq!(Token::parse("√").text(), "sqrt(");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A single decimal digit.
    Digit(char),

    /// The decimal point.
    DecimalPoint,

    /// A binary operator as it is inserted (`+`, `**`, `%`, `×`, ...).
    Operator(&'static str),

    /// An opening or closing parenthesis.
    Paren(char),

    /// A whitelisted function; inserted as `name(`.
    Function(&'static str),

    /// A named constant (`pi`, `e`).
    Constant(&'static str),

    /// Fixed text shortcuts such as `**2` for squaring.
    Shortcut(&'static str),

    /// Anything unrecognized, inserted verbatim and left to the evaluator.
    Raw(String),
}

impl Token {
    /// Classifies a key label or token string.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label {
            "." => Self::DecimalPoint,
            "+" => Self::Operator("+"),
            "-" | "−" => Self::Operator("-"),
            "*" => Self::Operator("*"),
            "/" => Self::Operator("/"),
            "×" => Self::Operator("×"),
            "÷" => Self::Operator("÷"),
            "%" | "mod" | "Mod" => Self::Operator("%"),
            "**" | "xʸ" | "x^y" => Self::Operator("**"),
            "^" => Self::Operator("^"),
            "(" => Self::Paren('('),
            ")" => Self::Paren(')'),
            "sin" => Self::Function("sin"),
            "cos" => Self::Function("cos"),
            "tan" => Self::Function("tan"),
            // The calculator's "log" key is base 10; "ln" is the natural log.
            "log" | "log10" => Self::Function("log10"),
            "ln" => Self::Function("log"),
            "sqrt" | "√" => Self::Function("sqrt"),
            "exp" | "eˣ" | "e^x" => Self::Function("exp"),
            "abs" | "|x|" => Self::Function("abs"),
            "pi" | "π" => Self::Constant("pi"),
            "e" => Self::Constant("e"),
            "x²" | "x^2" | "sq" => Self::Shortcut("**2"),
            "10ˣ" | "10^x" => Self::Shortcut("10**"),
            _ => {
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Self::Digit(c),
                    _ => Self::Raw(label.to_string()),
                }
            }
        }
    }

    /// Text this token inserts into the buffer.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Digit(c) | Self::Paren(c) => Cow::Owned(c.to_string()),
            Self::DecimalPoint => Cow::Borrowed("."),
            Self::Operator(s) | Self::Constant(s) | Self::Shortcut(s) => Cow::Borrowed(s),
            Self::Function(name) => Cow::Owned(format!("{name}(")),
            Self::Raw(s) => Cow::Borrowed(s),
        }
    }

    /// Returns `true` for tokens that start or extend a number.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Digit(_) | Self::DecimalPoint)
    }
}

/// The editable expression text plus the last-result marker.
///
/// # Examples
///
/// ```
/// use scicalc_rs::core::ExpressionBuffer;
///
/// let mut buffer = ExpressionBuffer::new();
/// buffer.push_label("1");
/// buffer.push_label(".");
/// buffer.push_label(".");
/// buffer.push_label("5");
/// assert_eq!(buffer.as_str(), "1.5");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionBuffer {
    text: String,

    /// Result text the buffer was last set to, while it still shows it.
    last_result: Option<String>,
}

impl ExpressionBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            last_result: None,
        }
    }

    /// Returns the buffer text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Checks if the buffer is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns `true` if the text ends in something a power can apply to.
    ///
    /// ```
    /// use scicalc_rs::core::ExpressionBuffer;
    ///
    /// let mut buffer = ExpressionBuffer::new();
    /// assert!(!buffer.has_power_base());
    /// buffer.push_label("2");
    /// assert!(buffer.has_power_base());
    /// buffer.push_label("(");
    /// assert!(!buffer.has_power_base());
    /// ```
    #[must_use]
    pub fn has_power_base(&self) -> bool {
        self.text
            .trim_end()
            .chars()
            .last()
            .is_some_and(|c| c != '(' && !OPERATOR_CHARS.contains(&c))
    }

    /// Returns `true` while the buffer displays a just-computed result.
    #[must_use]
    pub fn shows_result(&self) -> bool {
        self.last_result.as_deref() == Some(self.text.as_str())
    }

    /// Applies a token to the buffer.
    ///
    /// Returns `false` when the token was rejected (a second decimal point
    /// in the same number); the buffer is then unchanged.
    pub fn append(&mut self, token: &Token) -> bool {
        if token.is_numeric() && self.shows_result() {
            self.clear();
        }

        if *token == Token::DecimalPoint && self.numeric_run().contains('.') {
            return false;
        }

        // Operators chain from a shown result; either way it stops being one.
        self.last_result = None;
        self.text.push_str(&token.text());
        true
    }

    /// Classifies `label` and appends it.
    pub fn push_label(&mut self, label: &str) -> bool {
        self.append(&Token::parse(label))
    }

    /// Removes the last character, if any.
    pub fn backspace(&mut self) {
        self.text.pop();
        self.last_result = None;
    }

    /// Empties the buffer and drops the last-result marker.
    pub fn clear(&mut self) {
        self.text.clear();
        self.last_result = None;
    }

    /// Flips a leading minus sign on the whole buffer.
    ///
    /// This looks only at the first character, not at the operand nearest
    /// the end: `3+4` becomes `-3+4`.
    pub fn toggle_sign(&mut self) {
        if self.text.starts_with('-') {
            self.text.remove(0);
        } else {
            self.text.insert(0, '-');
        }
        self.last_result = None;
    }

    /// Wraps the buffer as the base of a fractional power: `X` becomes
    /// `(X)**(1/`, leaving the root degree to be typed.
    pub fn wrap_nth_root(&mut self) {
        self.text = format!("({})**(1/", self.text);
        self.last_result = None;
    }

    /// Replaces the contents with a formatted result and sets the marker.
    pub fn set_from_result(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.last_result = Some(text.clone());
        self.text = text;
    }

    /// Replaces the contents without marking them as a result.
    pub(crate) fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.last_result = None;
    }

    /// Trailing run of the buffer after the last operator character.
    fn numeric_run(&self) -> &str {
        self.text.rsplit(OPERATOR_CHARS).next().unwrap_or_default()
    }
}

impl fmt::Display for ExpressionBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(labels: &[&str]) -> ExpressionBuffer {
        let mut buffer = ExpressionBuffer::new();
        for label in labels {
            buffer.push_label(label);
        }
        buffer
    }

    #[test]
    fn test_token_classification() {
        assert_eq!(Token::parse("0"), Token::Digit('0'));
        assert_eq!(Token::parse("."), Token::DecimalPoint);
        assert_eq!(Token::parse("Mod"), Token::Operator("%"));
        assert_eq!(Token::parse("xʸ"), Token::Operator("**"));
        assert_eq!(Token::parse("("), Token::Paren('('));
        assert_eq!(Token::parse("sin"), Token::Function("sin"));
        assert_eq!(Token::parse("log"), Token::Function("log10"));
        assert_eq!(Token::parse("ln"), Token::Function("log"));
        assert_eq!(Token::parse("π"), Token::Constant("pi"));
        assert_eq!(Token::parse("x²"), Token::Shortcut("**2"));
        assert_eq!(Token::parse("12"), Token::Raw("12".to_string()));
        assert_eq!(Token::parse("foo"), Token::Raw("foo".to_string()));
    }

    #[test]
    fn test_function_prefix_opens_paren() {
        let buffer = typed(&["sqrt", "9"]);
        assert_eq!(buffer.as_str(), "sqrt(9");
        let buffer = typed(&["|x|", "-", "2", ")"]);
        assert_eq!(buffer.as_str(), "abs(-2)");
    }

    #[test]
    fn test_decimal_point_once_per_number() {
        let buffer = typed(&["1", ".", "2", ".", "+", "3", ".", "4", "."]);
        assert_eq!(buffer.as_str(), "1.2+3.4");
    }

    #[test]
    fn test_decimal_point_on_empty_buffer() {
        let buffer = typed(&[".", "5"]);
        assert_eq!(buffer.as_str(), ".5");
    }

    #[test]
    fn test_rejected_decimal_reports_false() {
        let mut buffer = typed(&["1", "."]);
        assert!(!buffer.push_label("."));
        assert_eq!(buffer.as_str(), "1.");
    }

    #[test]
    fn test_digit_after_result_starts_fresh() {
        let mut buffer = ExpressionBuffer::new();
        buffer.set_from_result("4");
        assert!(buffer.shows_result());
        buffer.push_label("7");
        assert_eq!(buffer.as_str(), "7");
        assert!(!buffer.shows_result());
    }

    #[test]
    fn test_decimal_after_result_starts_fresh() {
        let mut buffer = ExpressionBuffer::new();
        buffer.set_from_result("2.5");
        buffer.push_label(".");
        assert_eq!(buffer.as_str(), ".");
    }

    #[test]
    fn test_operator_after_result_chains() {
        let mut buffer = ExpressionBuffer::new();
        buffer.set_from_result("4");
        buffer.push_label("*");
        buffer.push_label("2");
        assert_eq!(buffer.as_str(), "4*2");
    }

    #[test]
    fn test_power_base() {
        assert!(typed(&["3"]).has_power_base());
        assert!(typed(&["(", "1", ")"]).has_power_base());
        assert!(typed(&["pi"]).has_power_base());
        assert!(!typed(&["3", "+"]).has_power_base());
        assert!(!typed(&["6", "÷"]).has_power_base());
        assert!(!typed(&["sin"]).has_power_base());

        let mut buffer = ExpressionBuffer::new();
        buffer.set_from_result("4");
        assert!(buffer.has_power_base());
    }

    #[test]
    fn test_backspace() {
        let mut buffer = typed(&["1", "2"]);
        buffer.backspace();
        assert_eq!(buffer.as_str(), "1");
        buffer.backspace();
        buffer.backspace();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_backspace_removes_whole_char() {
        let mut buffer = typed(&["6", "÷"]);
        buffer.backspace();
        assert_eq!(buffer.as_str(), "6");
    }

    #[test]
    fn test_clear_resets_marker() {
        let mut buffer = ExpressionBuffer::new();
        buffer.set_from_result("12");
        buffer.clear();
        assert!(buffer.is_empty());
        buffer.push_label("3");
        assert_eq!(buffer.as_str(), "3");
    }

    #[test]
    fn test_toggle_sign_whole_buffer() {
        let mut buffer = typed(&["3", "+", "4"]);
        buffer.toggle_sign();
        assert_eq!(buffer.as_str(), "-3+4");
        buffer.toggle_sign();
        assert_eq!(buffer.as_str(), "3+4");
    }

    #[test]
    fn test_toggle_sign_empty() {
        let mut buffer = ExpressionBuffer::new();
        buffer.toggle_sign();
        assert_eq!(buffer.as_str(), "-");
    }

    #[test]
    fn test_toggle_sign_drops_marker() {
        let mut buffer = ExpressionBuffer::new();
        buffer.set_from_result("4");
        buffer.toggle_sign();
        buffer.push_label("5");
        assert_eq!(buffer.as_str(), "-45");
    }

    #[test]
    fn test_wrap_nth_root() {
        let mut buffer = typed(&["2", "7"]);
        buffer.wrap_nth_root();
        buffer.push_label("3");
        buffer.push_label(")");
        assert_eq!(buffer.as_str(), "(27)**(1/3)");
    }

    #[test]
    fn test_display() {
        let buffer = typed(&["pi", "/", "2"]);
        assert_eq!(buffer.to_string(), "pi/2");
    }
}
