//! Angle mode for trigonometric evaluation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How trigonometric function arguments are interpreted.
///
/// The mode only affects evaluation performed while it is active; results
/// already in the history keep whatever mode produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    /// Arguments are radians (the initial mode).
    #[default]
    #[serde(alias = "rad")]
    Radians,
    /// Arguments are degrees and are converted before the call.
    #[serde(alias = "deg")]
    Degrees,
}

impl AngleMode {
    /// Returns the other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Radians => Self::Degrees,
            Self::Degrees => Self::Radians,
        }
    }

    /// Converts a trig argument expressed in this mode to radians.
    #[must_use]
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Radians => value,
            Self::Degrees => value.to_radians(),
        }
    }

    /// Short uppercase label, as shown by a mode indicator.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Radians => "RAD",
            Self::Degrees => "DEG",
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AngleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rad" | "radian" | "radians" => Ok(Self::Radians),
            "deg" | "degree" | "degrees" => Ok(Self::Degrees),
            other => Err(format!("unknown angle mode: {other}")),
        }
    }
}
