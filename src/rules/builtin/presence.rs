// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Presence and equality rules.

use serde_json::Value;

use super::EMPTY_STRING;
use crate::rules::{RuleExecutionOutcome, RuleOutcome, ValidationContext};

/// The value must be provided: non-zero numbers, non-blank strings, non-empty arrays, `true`, objects.
pub fn required(value: &Value, _: &Value, _: &ValidationContext) -> RuleOutcome {
    let message = match value {
        Value::Number(n) if n.as_f64().map_or(true, |f| f == 0.0 || f.is_nan()) => {
            Some("{{name}} must be a number different from 0.")
        }
        Value::String(s) if s.trim().is_empty() => Some(EMPTY_STRING),
        Value::Array(items) if items.is_empty() => Some("{{name}} cannot be an empty array."),
        Value::Null | Value::Bool(false) => Some("{{name}} is required."),
        _ => None,
    };

    match message {
        Some(message) => RuleExecutionOutcome::error(message).into(),
        None => RuleExecutionOutcome::information().into(),
    }
}

/// The value must equal `args`.
pub fn confirm(value: &Value, args: &Value, _: &ValidationContext) -> RuleOutcome {
    if value != args {
        return RuleExecutionOutcome::error("{{name}} must equal {{confirm}}.").into();
    }
    RuleExecutionOutcome::information().into()
}
