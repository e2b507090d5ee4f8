//! Static checks run over expression text before it is parsed.

use std::borrow::Cow;

use super::CalcResult;
use crate::error::CalcError;

/// Single-character operators that may not follow each other.
const ADJACENCY_OPERATORS: &[char] = &['+', '-', '*', '/', '%'];

/// Stand-in for `**` so the power operator is never split into two `*`.
const POWER_PLACEHOLDER: char = '@';

/// Checks `text`, returning the first problem found.
///
/// In order: the text must be non-blank, parentheses must balance, and no
/// two operators from `+ - * / %` may be adjacent (`**` counts as one
/// operator).
///
/// # Examples
///
/// ```
/// use scicalc_rs::eval::validate;
///
/// assert!(validate("2**3").is_ok());
/// assert!(validate("2*+3").is_err());
/// assert!(validate("(1+2").is_err());
/// ```
pub fn validate(text: &str) -> CalcResult<()> {
    if text.trim().is_empty() {
        return Err(CalcError::EmptyExpression);
    }

    let (opens, closes) = paren_counts(text);
    if opens != closes {
        return Err(CalcError::syntax("unbalanced parentheses"));
    }

    let collapsed = text.replace("**", &POWER_PLACEHOLDER.to_string());
    let chars: Vec<char> = collapsed.chars().collect();
    if let Some(pair) = chars
        .windows(2)
        .find(|w| ADJACENCY_OPERATORS.contains(&w[0]) && ADJACENCY_OPERATORS.contains(&w[1]))
    {
        return Err(CalcError::syntax(format!(
            "adjacent operators '{}{}'",
            pair[0], pair[1]
        )));
    }

    Ok(())
}

/// Appends the `)` needed when `text` opens more parentheses than it closes.
///
/// Text with more closing than opening parentheses is returned unchanged;
/// [`validate`] reports it.
#[must_use]
pub fn close_parens(text: &str) -> Cow<'_, str> {
    let (opens, closes) = paren_counts(text);
    if opens > closes {
        let mut closed = String::with_capacity(text.len() + opens - closes);
        closed.push_str(text);
        closed.extend(std::iter::repeat_n(')', opens - closes));
        Cow::Owned(closed)
    } else {
        Cow::Borrowed(text)
    }
}

fn paren_counts(text: &str) -> (usize, usize) {
    text.chars().fold((0, 0), |(opens, closes), c| match c {
        '(' => (opens + 1, closes),
        ')' => (opens, closes + 1),
        _ => (opens, closes),
    })
}
