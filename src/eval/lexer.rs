//! Scans normalized expression text into lexemes.
//!
//! Supported input:
//! - Numbers: `12`, `3.5`, `.5`, `5.`
//! - Names: `[A-Za-z_][A-Za-z0-9_]*`
//! - Operators: `+ - * / % **`, parentheses and `,`

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use super::CalcResult;
use crate::error::CalcError;

/// A single lexical unit of an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Lexeme {
    /// Numeric literal.
    Number(f64),
    /// Function or constant name.
    Name(String),
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `**`
    Power,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// End of input.
    End,
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Name(name) => f.write_str(name),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::Percent => f.write_str("%"),
            Self::Power => f.write_str("**"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::Comma => f.write_str(","),
            Self::End => f.write_str("end of expression"),
        }
    }
}

/// Lexer over a normalized expression string.
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    /// Returns the next lexeme, or [`Lexeme::End`] once input is exhausted.
    pub fn next_lexeme(&mut self) -> CalcResult<Lexeme> {
        self.skip_whitespace();

        let Some((start, ch)) = self.chars.next() else {
            return Ok(Lexeme::End);
        };

        let lexeme = match ch {
            '+' => Lexeme::Plus,
            '-' => Lexeme::Minus,
            '*' => {
                if self.chars.next_if(|&(_, c)| c == '*').is_some() {
                    Lexeme::Power
                } else {
                    Lexeme::Star
                }
            }
            '/' => Lexeme::Slash,
            '%' => Lexeme::Percent,
            '(' => Lexeme::LParen,
            ')' => Lexeme::RParen,
            ',' => Lexeme::Comma,
            c if c.is_ascii_digit() || c == '.' => self.read_number(start)?,
            c if c.is_ascii_alphabetic() || c == '_' => self.read_name(start),
            other => {
                return Err(CalcError::syntax(format!("unexpected character '{other}'")));
            }
        };

        Ok(lexeme)
    }

    /// Collects every lexeme up to and including [`Lexeme::End`].
    pub fn tokenize(mut self) -> CalcResult<Vec<Lexeme>> {
        let mut lexemes = Vec::new();
        loop {
            let lexeme = self.next_lexeme()?;
            let done = lexeme == Lexeme::End;
            lexemes.push(lexeme);
            if done {
                return Ok(lexemes);
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|&(_, c)| c.is_whitespace()).is_some() {}
    }

    fn read_number(&mut self, start: usize) -> CalcResult<Lexeme> {
        let mut seen_dot = self.source[start..].starts_with('.');
        let mut end = start + 1;

        while let Some(&(idx, c)) = self.chars.peek() {
            if c.is_ascii_digit() {
                end = idx + 1;
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                end = idx + 1;
            } else {
                break;
            }
            self.chars.next();
        }

        let literal = &self.source[start..end];
        if literal == "." {
            return Err(CalcError::syntax("unexpected character '.'"));
        }

        literal
            .parse::<f64>()
            .map(Lexeme::Number)
            .map_err(|_| CalcError::syntax(format!("invalid number '{literal}'")))
    }

    fn read_name(&mut self, start: usize) -> Lexeme {
        let mut end = start + 1;
        while let Some((idx, c)) = self
            .chars
            .next_if(|&(_, c)| c.is_ascii_alphanumeric() || c == '_')
        {
            end = idx + c.len_utf8();
        }
        Lexeme::Name(self.source[start..end].to_string())
    }
}
