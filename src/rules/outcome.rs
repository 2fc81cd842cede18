// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Values returned by validation rules.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::severity::Severity;
use super::Placeholders;

/// What a rule returns.
///
/// The engine accepts the three shapes uniformly and normalizes them into a
/// [`RuleExecutionResult`](super::RuleExecutionResult).
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// `true` means `information`, `false` means `error`.
    Bool(bool),
    /// A bare severity, without message or custom data.
    Severity(Severity),
    /// A structured outcome whose present fields override the result.
    Outcome(RuleExecutionOutcome),
}

impl From<bool> for RuleOutcome {
    fn from(value: bool) -> Self {
        RuleOutcome::Bool(value)
    }
}

impl From<Severity> for RuleOutcome {
    fn from(value: Severity) -> Self {
        RuleOutcome::Severity(value)
    }
}

impl From<RuleExecutionOutcome> for RuleOutcome {
    fn from(value: RuleExecutionOutcome) -> Self {
        RuleOutcome::Outcome(value)
    }
}

/// A structured rule outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleExecutionOutcome {
    /// Severity of the outcome.
    pub severity: Severity,
    /// Overrides the key of the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Message template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Placeholders provided by the rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholders: Option<Placeholders>,
    /// Overrides the name of the validated field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Overrides the validated value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Custom state for the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Value>,
}

impl RuleExecutionOutcome {
    /// Create an outcome with only a severity.
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            key: None,
            message: None,
            placeholders: None,
            name: None,
            value: None,
            custom: None,
        }
    }

    /// A passing outcome.
    pub fn information() -> Self {
        Self::new(Severity::Information)
    }

    /// A failing outcome with a message template.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error).with_message(message)
    }

    /// A warning with a message template.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning).with_message(message)
    }

    /// Set the key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the message template.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Add a single placeholder.
    pub fn with_placeholder(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.placeholders
            .get_or_insert_with(Placeholders::new)
            .insert(key.into(), value.into());
        self
    }

    /// Replace the placeholders.
    pub fn with_placeholders(mut self, placeholders: Placeholders) -> Self {
        self.placeholders = Some(placeholders);
        self
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the value.
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the custom state.
    pub fn with_custom(mut self, custom: impl Into<Value>) -> Self {
        self.custom = Some(custom.into());
        self
    }
}
