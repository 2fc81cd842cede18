// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule outcome severities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Severity of a rule execution, ordered from least to most severe.
///
/// Follows the six-level logging convention (trace through critical).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Trace,
    Debug,
    Information,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// All severities, in ascending order.
    pub const ALL: [Severity; 6] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Information,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    /// Get the lowercase name of the severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "trace",
            Severity::Debug => "debug",
            Severity::Information => "information",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        }
    }

    /// Whether this severity makes a validation fail.
    ///
    /// `error` and `critical` always fail; `warning` fails only when
    /// warnings are treated as errors.
    pub fn is_failure(&self, treat_warnings_as_errors: bool) -> bool {
        match self {
            Severity::Error | Severity::Critical => true,
            Severity::Warning => treat_warnings_as_errors,
            _ => false,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a severity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown severity: '{0}'")]
pub struct SeverityParseError(pub String);

impl FromStr for Severity {
    type Err = SeverityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_str() == s)
            .ok_or_else(|| SeverityParseError(s.to_string()))
    }
}
