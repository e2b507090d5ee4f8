//! Whitelisted names and the AST interpreter.

use std::f64::consts::{E, PI};

use super::CalcResult;
use super::parser::{BinaryOp, Expr, UnaryOp};
use crate::core::AngleMode;
use crate::error::CalcError;

/// Callable names.
pub const FUNCTIONS: &[&str] = &["sin", "cos", "tan", "log", "log10", "sqrt", "exp", "abs"];

/// Value names.
pub const CONSTANTS: &[&str] = &["pi", "e"];

/// Returns `true` if `name` is a whitelisted function or constant.
pub fn is_allowed(name: &str) -> bool {
    FUNCTIONS.contains(&name) || CONSTANTS.contains(&name)
}

/// Rejects the first identifier in `expr` outside the whitelist.
pub fn check_names(expr: &Expr) -> CalcResult<()> {
    expr.try_for_each_name(&mut |name| {
        if is_allowed(name) {
            Ok(())
        } else {
            Err(CalcError::DisallowedIdentifier {
                name: name.to_string(),
            })
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Function {
    Sin,
    Cos,
    Tan,
    Log,
    Log10,
    Sqrt,
    Exp,
    Abs,
}

impl Function {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "log" => Self::Log,
            "log10" => Self::Log10,
            "sqrt" => Self::Sqrt,
            "exp" => Self::Exp,
            "abs" => Self::Abs,
            _ => return None,
        })
    }
}

fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(PI),
        "e" => Some(E),
        _ => None,
    }
}

/// Walks an [`Expr`] computing its value.
#[derive(Debug, Clone, Copy)]
pub struct Interpreter {
    mode: AngleMode,
}

impl Interpreter {
    /// Creates an interpreter using `mode` for trigonometric arguments.
    pub const fn new(mode: AngleMode) -> Self {
        Self { mode }
    }

    /// Evaluates `expr`.
    pub fn eval(&self, expr: &Expr) -> CalcResult<f64> {
        match expr {
            Expr::Number(n) => Ok(*n),
            Expr::Name(name) => self.value_of(name),
            Expr::Unary { op, operand } => {
                let v = self.eval(operand)?;
                Ok(match op {
                    UnaryOp::Plus => v,
                    UnaryOp::Neg => -v,
                })
            }
            Expr::Binary { op, lhs, rhs } => {
                let a = self.eval(lhs)?;
                let b = self.eval(rhs)?;
                binary(*op, a, b)
            }
            Expr::Call { name, args } => self.call(name, args),
        }
    }

    #[allow(clippy::unused_self)]
    fn value_of(&self, name: &str) -> CalcResult<f64> {
        if let Some(value) = constant(name) {
            return Ok(value);
        }
        if Function::from_name(name).is_some() {
            return Err(CalcError::evaluation(format!(
                "'{name}' is a function and needs arguments"
            )));
        }
        Err(CalcError::DisallowedIdentifier {
            name: name.to_string(),
        })
    }

    fn call(&self, name: &str, args: &[Expr]) -> CalcResult<f64> {
        let Some(function) = Function::from_name(name) else {
            if constant(name).is_some() {
                return Err(CalcError::evaluation(format!("'{name}' is not callable")));
            }
            return Err(CalcError::DisallowedIdentifier {
                name: name.to_string(),
            });
        };

        let values = args
            .iter()
            .map(|arg| self.eval(arg))
            .collect::<CalcResult<Vec<f64>>>()?;

        match (function, values.as_slice()) {
            (Function::Log, [x]) => ln(*x),
            (Function::Log, [x, base]) => log_base(*x, *base),
            (Function::Log, _) => Err(CalcError::evaluation(format!(
                "log() takes one or two arguments ({} given)",
                values.len()
            ))),
            (_, [x]) => self.apply(function, *x),
            _ => Err(CalcError::evaluation(format!(
                "{name}() takes exactly one argument ({} given)",
                values.len()
            ))),
        }
    }

    fn apply(&self, function: Function, x: f64) -> CalcResult<f64> {
        match function {
            Function::Sin => Ok(self.mode.to_radians(x).sin()),
            Function::Cos => Ok(self.mode.to_radians(x).cos()),
            Function::Tan => Ok(self.mode.to_radians(x).tan()),
            Function::Log => ln(x),
            Function::Log10 => {
                if x <= 0.0 {
                    return Err(CalcError::domain("logarithm of non-positive number"));
                }
                Ok(x.log10())
            }
            Function::Sqrt => {
                if x < 0.0 {
                    return Err(CalcError::domain("square root of negative number"));
                }
                Ok(x.sqrt())
            }
            Function::Exp => overflow_checked(x.exp()),
            Function::Abs => Ok(x.abs()),
        }
    }
}

fn ln(x: f64) -> CalcResult<f64> {
    if x <= 0.0 {
        return Err(CalcError::domain("logarithm of non-positive number"));
    }
    Ok(x.ln())
}

fn log_base(x: f64, base: f64) -> CalcResult<f64> {
    if base <= 0.0 || base == 1.0 {
        return Err(CalcError::domain("invalid logarithm base"));
    }
    Ok(ln(x)? / base.ln())
}

fn binary(op: BinaryOp, a: f64, b: f64) -> CalcResult<f64> {
    match op {
        BinaryOp::Add => Ok(a + b),
        BinaryOp::Sub => Ok(a - b),
        BinaryOp::Mul => Ok(a * b),
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(CalcError::domain("division by zero"));
            }
            Ok(a / b)
        }
        BinaryOp::Mod => floored_mod(a, b),
        BinaryOp::Pow => power(a, b),
    }
}

/// `a % b` with the sign of the divisor.
fn floored_mod(a: f64, b: f64) -> CalcResult<f64> {
    if b == 0.0 {
        return Err(CalcError::domain("modulo by zero"));
    }
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}

fn power(base: f64, exponent: f64) -> CalcResult<f64> {
    if base == 0.0 && exponent < 0.0 {
        return Err(CalcError::domain(
            "zero cannot be raised to a negative power",
        ));
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(CalcError::domain(
            "negative number cannot be raised to a fractional power",
        ));
    }
    overflow_checked(base.powf(exponent))
}

fn overflow_checked(value: f64) -> CalcResult<f64> {
    if value.is_infinite() {
        Err(CalcError::domain("numerical result out of range"))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::parse;
    use test_case::test_case;

    fn run(source: &str, mode: AngleMode) -> CalcResult<f64> {
        let expr = parse(source)?;
        check_names(&expr)?;
        Interpreter::new(mode).eval(&expr)
    }

    fn rad(source: &str) -> f64 {
        run(source, AngleMode::Radians).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test_case("2+3*4", 14.0 ; "precedence")]
    #[test_case("2**3**2", 512.0 ; "right associative power")]
    #[test_case("-2**2", -4.0 ; "sign below power")]
    #[test_case("2**-1", 0.5 ; "negative exponent")]
    #[test_case("-7%3", 2.0 ; "floored modulo")]
    #[test_case("7%-3", -2.0 ; "floored modulo negative divisor")]
    #[test_case("abs(-4.5)", 4.5 ; "abs")]
    #[test_case("log(8, 2)", 3.0 ; "log with base")]
    #[test_case("log10(1000)", 3.0 ; "log10")]
    #[test_case("(-8)**3", -512.0 ; "negative base integer exponent")]
    fn test_values(source: &str, expected: f64) {
        assert!(close(rad(source), expected), "{source}");
    }

    #[test]
    fn test_angle_modes() {
        assert!(close(run("sin(90)", AngleMode::Degrees).unwrap(), 1.0));
        assert!(close(rad("sin(pi/2)"), 1.0));
        assert!(close(run("cos(180)", AngleMode::Degrees).unwrap(), -1.0));
        assert!(close(rad("log(e)"), 1.0));
    }

    #[test_case("1/0", "division by zero" ; "division")]
    #[test_case("5%0", "modulo by zero" ; "modulo")]
    #[test_case("0**-1", "zero cannot be raised to a negative power" ; "zero power")]
    #[test_case("(-8)**(1/3)", "negative number cannot be raised to a fractional power" ; "fractional power")]
    #[test_case("log(0)", "logarithm of non-positive number" ; "log zero")]
    #[test_case("log10(-1)", "logarithm of non-positive number" ; "log10 negative")]
    #[test_case("log(8, 1)", "invalid logarithm base" ; "log base one")]
    #[test_case("sqrt(-1)", "square root of negative number" ; "sqrt negative")]
    #[test_case("10**400", "numerical result out of range" ; "power overflow")]
    #[test_case("exp(1000)", "numerical result out of range" ; "exp overflow")]
    fn test_domain_errors(source: &str, message: &str) {
        assert_eq!(
            run(source, AngleMode::Radians),
            Err(CalcError::domain(message))
        );
    }

    #[test]
    fn test_disallowed_names() {
        assert_eq!(
            run("open(1)", AngleMode::Radians),
            Err(CalcError::DisallowedIdentifier {
                name: "open".to_string()
            })
        );
        assert_eq!(
            run("x+1", AngleMode::Radians),
            Err(CalcError::DisallowedIdentifier {
                name: "x".to_string()
            })
        );
    }

    #[test]
    fn test_names_checked_before_arithmetic() {
        let err = run("1/0 + foo", AngleMode::Radians).unwrap_err();
        assert!(matches!(err, CalcError::DisallowedIdentifier { .. }));
    }

    #[test]
    fn test_misused_names() {
        assert!(matches!(
            run("pi(2)", AngleMode::Radians),
            Err(CalcError::Evaluation { .. })
        ));
        assert!(matches!(
            run("sin+1", AngleMode::Radians),
            Err(CalcError::Evaluation { .. })
        ));
    }

    #[test]
    fn test_arity() {
        let err = run("sin()", AngleMode::Radians).unwrap_err();
        assert_eq!(
            err.to_string(),
            "evaluation error: sin() takes exactly one argument (0 given)"
        );
        assert!(run("log(1, 2, 3)", AngleMode::Radians).is_err());
        assert!(run("sqrt(4, 9)", AngleMode::Radians).is_err());
    }

    #[test]
    fn test_is_allowed() {
        assert!(is_allowed("log10"));
        assert!(is_allowed("pi"));
        assert!(!is_allowed("__import__"));
        assert!(!is_allowed("Pi"));
    }
}
