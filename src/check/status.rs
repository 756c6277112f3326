//! Check status levels
//!
//! The four monitoring-agent status levels and how per-attribute results
//! roll up into the status of the whole check.

use std::fmt;

/// Status of a check or of a single event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckStatus {
    /// Everything matched
    Ok,
    /// Mismatch reported as a warning
    Warning,
    /// Mismatch reported as a critical failure
    Critical,
    /// State could not be determined
    Unknown,
}

impl CheckStatus {
    /// Numeric status sent to the agent and used as exit code
    pub fn code(&self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }

    /// Upper-case label used as output prefix
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Status used for a failed comparison
    pub fn failure(warn: bool) -> Self {
        if warn {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    /// Overall status of a run that found `problems` problems
    pub fn aggregate(problems: usize, warn: bool) -> Self {
        if problems == 0 {
            Self::Ok
        } else {
            Self::failure(warn)
        }
    }

    /// Whether this status counts as a problem
    pub fn is_problem(&self) -> bool {
        *self != Self::Ok
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
