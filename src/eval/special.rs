//! Factorial and reciprocal.

use std::fmt::Write;

use super::{CalcResult, Number};
use crate::error::CalcError;

/// Largest accepted factorial argument.
pub const MAX_FACTORIAL: f64 = 1000.0;

/// Limb base for exact factorials.
const LIMB_BASE: u64 = 1_000_000_000;

/// `n!` for `0 <= n <= 1000`.
///
/// Integers give the exact value; other inputs use `Γ(n + 1)`.
///
/// # Examples
///
/// ```
/// use scicalc_rs::eval::special::factorial;
///
/// assert_eq!(factorial(5.0).unwrap().to_string(), "120");
/// assert_eq!(factorial(2.5).unwrap().to_string(), "3.3233509704");
/// assert!(factorial(-1.0).is_err());
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn factorial(n: f64) -> CalcResult<Number> {
    if n.is_nan() {
        return Err(CalcError::domain("factorial of an undefined value"));
    }
    if n < 0.0 {
        return Err(CalcError::domain("factorial of negative number"));
    }
    if n > MAX_FACTORIAL {
        return Err(CalcError::domain("number too large for factorial"));
    }

    if n.fract() == 0.0 {
        return Ok(exact_factorial(n as u32));
    }

    let value = libm::tgamma(n + 1.0);
    if !value.is_finite() {
        return Err(CalcError::domain("numerical result out of range"));
    }
    Ok(Number::from_f64(value))
}

/// `1 / x`, rejecting zero.
pub fn reciprocal(x: f64) -> CalcResult<Number> {
    if x == 0.0 {
        return Err(CalcError::domain("division by zero"));
    }
    Ok(Number::from_f64(1.0 / x))
}

fn exact_factorial(n: u32) -> Number {
    if let Some(value) = (2..=i128::from(n)).try_fold(1_i128, i128::checked_mul) {
        return Number::Integer(value);
    }

    // Little-endian base 10^9 limbs.
    let mut limbs: Vec<u64> = vec![1];
    for k in 2..=u64::from(n) {
        let mut carry = 0;
        for limb in &mut limbs {
            let product = *limb * k + carry;
            *limb = product % LIMB_BASE;
            carry = product / LIMB_BASE;
        }
        while carry > 0 {
            limbs.push(carry % LIMB_BASE);
            carry /= LIMB_BASE;
        }
    }

    let mut digits = limbs.last().map(ToString::to_string).unwrap_or_default();
    for limb in limbs.iter().rev().skip(1) {
        let _ = write!(digits, "{limb:09}");
    }
    Number::Digits(digits)
}
