//! Result history.
//!
//! An append-only log of `(expression, result)` pairs. Entries are only ever
//! dropped by the optional retention cap, oldest first.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Number of entries a history display shows.
pub const DEFAULT_DISPLAY_COUNT: usize = 5;

/// One evaluated expression and its formatted result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Expression text as it stood in the buffer.
    pub expression: String,

    /// Formatted result text.
    pub result: String,
}

impl HistoryEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expression, self.result)
    }
}

/// Log of evaluations, oldest first internally.
///
/// # Examples
///
/// ```
/// use scicalc_rs::core::HistoryLog;
///
/// let mut history = HistoryLog::new();
/// history.append("1+1", "2");
/// history.append("2*3", "6");
/// let recent: Vec<String> = history.recent(5).map(ToString::to_string).collect();
/// assert_eq!(recent, vec!["2*3 = 6", "1+1 = 2"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,

    /// Maximum retained entries; `None` keeps everything.
    limit: Option<usize>,
}

impl HistoryLog {
    /// Creates an unbounded log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            limit: None,
        }
    }

    /// Creates a log retaining at most `limit` entries (`None` for unbounded).
    ///
    /// A limit of zero is treated as one so the latest result is always kept.
    #[must_use]
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.map(|l| l.max(1)),
        }
    }

    /// Records an evaluation.
    pub fn append(&mut self, expression: impl Into<String>, result: impl Into<String>) {
        self.entries.push_back(HistoryEntry::new(expression, result));
        if let Some(limit) = self.limit {
            while self.entries.len() > limit {
                self.entries.pop_front();
            }
        }
    }

    /// Returns up to `n` entries, most recent first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev().take(n)
    }

    /// Returns the most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The configured retention cap.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }
}
