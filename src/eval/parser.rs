//! Recursive descent parser producing the expression AST.
//!
//! GRAMMAR:
//!   expr    --> term ( ("+" | "-") term )*
//!   term    --> unary ( ("*" | "/" | "%") unary )*
//!   unary   --> ("+" | "-") unary | power
//!   power   --> primary ( "**" unary )?
//!   primary --> NUMBER | NAME | NAME "(" args? ")" | "(" expr ")"
//!   args    --> expr ( "," expr )*
//!
//! `**` is right-associative and binds tighter than a unary sign on its
//! left, so `-2**2` is `-(2**2)` while `2**-1` is `2**(-1)`.

use std::fmt;

use super::CalcResult;
use super::lexer::{Lexeme, Lexer};
use crate::error::CalcError;

/// Default limit on parenthesis/operator nesting.
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `**`
    Pow,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
        })
    }
}

/// Unary sign operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `+x`
    Plus,
    /// `-x`
    Neg,
}

/// Expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal.
    Number(f64),
    /// Bare name (a constant, if whitelisted).
    Name(String),
    /// Signed sub-expression.
    Unary {
        /// The sign.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expr>,
    },
    /// Binary operation.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// Function call.
    Call {
        /// Function name.
        name: String,
        /// Arguments in order.
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Visits every name in the tree, left to right, stopping at the first
    /// error returned by `check`.
    pub fn try_for_each_name<F>(&self, check: &mut F) -> CalcResult<()>
    where
        F: FnMut(&str) -> CalcResult<()>,
    {
        match self {
            Self::Number(_) => Ok(()),
            Self::Name(name) => check(name),
            Self::Unary { operand, .. } => operand.try_for_each_name(check),
            Self::Binary { lhs, rhs, .. } => {
                lhs.try_for_each_name(check)?;
                rhs.try_for_each_name(check)
            }
            Self::Call { name, args } => {
                check(name)?;
                args.iter().try_for_each(|arg| arg.try_for_each_name(check))
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Name(name) => f.write_str(name),
            Self::Unary { op, operand } => match op {
                UnaryOp::Plus => write!(f, "(+{operand})"),
                UnaryOp::Neg => write!(f, "(-{operand})"),
            },
            Self::Binary { op, lhs, rhs } => write!(f, "({lhs}{op}{rhs})"),
            Self::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Parser over a lexeme stream.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Lexeme,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser and reads the first lexeme.
    pub fn new(source: &'a str) -> CalcResult<Self> {
        Self::with_max_depth(source, DEFAULT_MAX_DEPTH)
    }

    /// Creates a parser with a custom nesting limit.
    pub fn with_max_depth(source: &'a str, max_depth: usize) -> CalcResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_lexeme()?;
        Ok(Self {
            lexer,
            current,
            depth: 0,
            max_depth,
        })
    }

    /// Parses the whole input into a single expression.
    pub fn parse(mut self) -> CalcResult<Expr> {
        if self.current == Lexeme::End {
            return Err(CalcError::EmptyExpression);
        }

        let expr = self.parse_expr()?;

        if self.current != Lexeme::End {
            return Err(CalcError::syntax(format!(
                "unexpected '{}' after expression",
                self.current
            )));
        }

        Ok(expr)
    }

    fn advance(&mut self) -> CalcResult<()> {
        self.current = self.lexer.next_lexeme()?;
        Ok(())
    }

    fn expect(&mut self, expected: &Lexeme) -> CalcResult<()> {
        if self.current == *expected {
            self.advance()
        } else {
            Err(CalcError::syntax(format!(
                "expected '{expected}', found '{}'",
                self.current
            )))
        }
    }

    fn descend(&mut self) -> CalcResult<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(CalcError::syntax("expression nested too deeply"));
        }
        Ok(())
    }

    fn parse_expr(&mut self) -> CalcResult<Expr> {
        self.descend()?;
        let mut lhs = self.parse_term()?;

        loop {
            let op = match self.current {
                Lexeme::Plus => BinaryOp::Add,
                Lexeme::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance()?;
            let rhs = self.parse_term()?;
            lhs = binary(op, lhs, rhs);
        }

        self.depth -= 1;
        Ok(lhs)
    }

    fn parse_term(&mut self) -> CalcResult<Expr> {
        let mut lhs = self.parse_unary()?;

        loop {
            let op = match self.current {
                Lexeme::Star => BinaryOp::Mul,
                Lexeme::Slash => BinaryOp::Div,
                Lexeme::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.advance()?;
            let rhs = self.parse_unary()?;
            lhs = binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_unary(&mut self) -> CalcResult<Expr> {
        let op = match self.current {
            Lexeme::Plus => UnaryOp::Plus,
            Lexeme::Minus => UnaryOp::Neg,
            _ => return self.parse_power(),
        };

        self.descend()?;
        self.advance()?;
        let operand = self.parse_unary()?;
        self.depth -= 1;

        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn parse_power(&mut self) -> CalcResult<Expr> {
        let base = self.parse_primary()?;

        if self.current != Lexeme::Power {
            return Ok(base);
        }

        self.descend()?;
        self.advance()?;
        let exponent = self.parse_unary()?;
        self.depth -= 1;

        Ok(binary(BinaryOp::Pow, base, exponent))
    }

    fn parse_primary(&mut self) -> CalcResult<Expr> {
        match std::mem::replace(&mut self.current, Lexeme::End) {
            Lexeme::Number(n) => {
                self.advance()?;
                Ok(Expr::Number(n))
            }
            Lexeme::Name(name) => {
                self.advance()?;
                if self.current == Lexeme::LParen {
                    self.advance()?;
                    let args = self.parse_args()?;
                    self.expect(&Lexeme::RParen)?;
                    Ok(Expr::Call { name, args })
                } else {
                    Ok(Expr::Name(name))
                }
            }
            Lexeme::LParen => {
                self.advance()?;
                let inner = self.parse_expr()?;
                self.expect(&Lexeme::RParen)?;
                Ok(inner)
            }
            Lexeme::End => Err(CalcError::syntax("unexpected end of expression")),
            other => Err(CalcError::syntax(format!("unexpected '{other}'"))),
        }
    }

    fn parse_args(&mut self) -> CalcResult<Vec<Expr>> {
        let mut args = Vec::new();
        if self.current == Lexeme::RParen {
            return Ok(args);
        }

        args.push(self.parse_expr()?);
        while self.current == Lexeme::Comma {
            self.advance()?;
            args.push(self.parse_expr()?);
        }
        Ok(args)
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

/// Parses `source` into an expression tree.
pub fn parse(source: &str) -> CalcResult<Expr> {
    Parser::new(source)?.parse()
}
