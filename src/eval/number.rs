//! Evaluation results and their display formatting.

use serde::{Serialize, Serializer};
use std::fmt;

/// Decimal places kept for fractional results.
pub const DECIMAL_PLACES: usize = 10;

/// Integral floats below this magnitude are converted to `i128`.
const I128_SAFE_LIMIT: f64 = 1.0e38;

/// A formatted numeric result.
///
/// Integral values are kept as integers, fractional values are rounded to
/// [`DECIMAL_PLACES`] places. Exact factorials too wide for `i128` keep
/// their decimal digits.
///
/// # Examples
///
/// ```
/// use scicalc_rs::eval::Number;
///
/// assert_eq!(Number::from_f64(4.0).to_string(), "4");
/// assert_eq!(Number::from_f64(0.1 + 0.2).to_string(), "0.3");
/// assert_eq!(Number::from_f64(2.0 / 3.0).to_string(), "0.6666666667");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// Integral result.
    Integer(i128),
    /// Fractional result, already rounded.
    Float(f64),
    /// Exact integer given by its decimal digits.
    Digits(String),
}

impl Number {
    /// Builds a result from a computed value, applying the display policy.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_f64(value: f64) -> Self {
        let rounded = round_to_places(value, DECIMAL_PLACES);
        if rounded.fract() == 0.0 && rounded.abs() < I128_SAFE_LIMIT {
            Self::Integer(rounded as i128)
        } else {
            Self::Float(rounded)
        }
    }

    /// Returns the value as `f64`.
    ///
    /// Digit strings too large for `f64` become infinity.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Integer(i) => *i as f64,
            Self::Float(f) => *f,
            Self::Digits(digits) => digits.parse().unwrap_or(f64::INFINITY),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            // `Display` for f64 never switches to exponent notation, so the
            // text can be typed back into the buffer.
            Self::Float(v) => write!(f, "{v}"),
            Self::Digits(digits) => f.write_str(digits),
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Rounds to `places` decimals using the decimal formatter.
fn round_to_places(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let rounded = format!("{value:.places$}")
        .parse::<f64>()
        .unwrap_or(value);
    // Collapse -0 so it displays as 0.
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_values() {
        assert_eq!(Number::from_f64(120.0), Number::Integer(120));
        assert_eq!(Number::from_f64(-3.0), Number::Integer(-3));
        assert_eq!(Number::from_f64(-0.0).to_string(), "0");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(Number::from_f64(1.0 / 3.0).to_string(), "0.3333333333");
        assert_eq!(Number::from_f64(0.1 + 0.2).to_string(), "0.3");
        assert_eq!(Number::from_f64(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_rounding_to_integer() {
        assert_eq!(Number::from_f64(0.999_999_999_999_9), Number::Integer(1));
        assert_eq!(Number::from_f64(1e-12), Number::Integer(0));
    }

    #[test]
    fn test_small_fraction_no_exponent() {
        assert_eq!(Number::from_f64(0.000_000_1).to_string(), "0.0000001");
    }

    #[test]
    fn test_large_integral_float() {
        let n = Number::from_f64(1e40);
        assert!(matches!(n, Number::Float(_)));
        assert!(!n.to_string().contains('e'));
    }

    #[test]
    fn test_as_f64() {
        assert!((Number::Integer(7).as_f64() - 7.0).abs() < f64::EPSILON);
        assert!(Number::Digits("9".repeat(400)).as_f64().is_infinite());
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&Number::from_f64(2.5)).unwrap();
        assert_eq!(json, "\"2.5\"");
    }
}
