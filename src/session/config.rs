//! Session configuration.
//!
//! Values are layered: built-in defaults, then an optional JSON file, then
//! explicit overrides from the command line or environment.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::core::{AngleMode, DEFAULT_DISPLAY_COUNT};
use crate::error::{Error, IoError, Result};

/// Default text shown in the buffer after a failed operation.
pub const DEFAULT_ERROR_MARKER: &str = "Error";

/// Tunables for a [`super::CalculatorSession`].
///
/// # Examples
///
/// ```
/// use scicalc_rs::core::AngleMode;
/// use scicalc_rs::session::SessionConfig;
///
/// let config = SessionConfig::from_json(r#"{"angle_mode": "deg"}"#).unwrap();
/// assert_eq!(config.angle_mode, AngleMode::Degrees);
/// assert_eq!(config.history_display, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Angle mode a new session starts in.
    pub angle_mode: AngleMode,

    /// Maximum history entries kept; `None` keeps everything.
    pub history_limit: Option<usize>,

    /// Entries shown by a history display.
    pub history_display: usize,

    /// Buffer text shown after an error.
    pub error_marker: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            angle_mode: AngleMode::Radians,
            history_limit: None,
            history_display: DEFAULT_DISPLAY_COUNT,
            error_marker: DEFAULT_ERROR_MARKER.to_string(),
        }
    }
}

impl SessionConfig {
    /// Parses and validates a JSON document. Missing fields keep defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed JSON or invalid values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file is missing or unreadable, and
    /// [`Error::Config`] if its contents are invalid.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path).map_err(|e| IoError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        debug!(path = %path.display(), "loading session config");
        Self::from_json(&content)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// See [`SessionConfig::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Sets the starting angle mode.
    #[must_use]
    pub const fn with_angle_mode(mut self, mode: AngleMode) -> Self {
        self.angle_mode = mode;
        self
    }

    /// Sets the history retention cap.
    #[must_use]
    pub const fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self
    }

    /// Sets the error marker text.
    #[must_use]
    pub fn with_error_marker(mut self, marker: impl Into<String>) -> Self {
        self.error_marker = marker.into();
        self
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a zero history limit, a zero display
    /// count, or a blank error marker.
    pub fn validate(&self) -> Result<()> {
        if self.history_limit == Some(0) {
            return Err(Error::config("history_limit must be at least 1"));
        }
        if self.history_display == 0 {
            return Err(Error::config("history_display must be at least 1"));
        }
        if self.error_marker.trim().is_empty() {
            return Err(Error::config("error_marker must not be blank"));
        }
        Ok(())
    }
}
