// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Length and value bound rules.

use std::cmp::Ordering;

use serde_json::Value;

use super::{positive_count, positive_number_warning, type_name};
use crate::rules::{RuleExecutionOutcome, RuleOutcome, ValidationContext};

/// Length of a string (in characters) or an array, if the value has one.
fn length_of(value: &Value) -> Option<(usize, bool)> {
    match value {
        Value::String(s) => Some((s.chars().count(), true)),
        Value::Array(items) => Some((items.len(), false)),
        _ => None,
    }
}

/// The value must be at least `args` characters or elements long.
pub fn minimum_length(value: &Value, args: &Value, _: &ValidationContext) -> RuleOutcome {
    let Some(minimum) = positive_count(args) else {
        return positive_number_warning();
    };
    let Some((length, is_string)) = length_of(value) else {
        return RuleExecutionOutcome::error("{{name}} must be a string or an array.").into();
    };

    if (length as f64) < minimum {
        let message = if is_string {
            "{{name}} must be at least {{minimumLength}} character(s) long."
        } else {
            "{{name}} must contain at least {{minimumLength}} element(s)."
        };
        return RuleExecutionOutcome::error(message).into();
    }
    RuleExecutionOutcome::information().into()
}

/// The value must be at most `args` characters or elements long.
pub fn maximum_length(value: &Value, args: &Value, _: &ValidationContext) -> RuleOutcome {
    let Some(maximum) = positive_count(args) else {
        return positive_number_warning();
    };
    let Some((length, is_string)) = length_of(value) else {
        return RuleExecutionOutcome::error("{{name}} must be a string or an array.").into();
    };

    if (length as f64) > maximum {
        let message = if is_string {
            "{{name}} must be at most {{maximumLength}} character(s) long."
        } else {
            "{{name}} must contain at most {{maximumLength}} element(s)."
        };
        return RuleExecutionOutcome::error(message).into();
    }
    RuleExecutionOutcome::information().into()
}

/// Compare two values of compatible types.
///
/// Numbers compare numerically (numeric strings are read as numbers when the
/// other side is a number, and `null` reads as zero against a number),
/// strings lexicographically and booleans with `false < true`. `None` means
/// the values cannot be compared; NaN never orders.
fn compare(value: &Value, args: &Value) -> Option<Option<Ordering>> {
    match (value, args) {
        (Value::Number(a), Value::Number(b)) => Some(a.as_f64()?.partial_cmp(&b.as_f64()?)),
        (Value::Number(a), Value::String(b)) => {
            let b: f64 = b.trim().parse().ok()?;
            Some(a.as_f64()?.partial_cmp(&b))
        }
        (Value::String(a), Value::Number(b)) => {
            let a: f64 = a.trim().parse().ok()?;
            Some(a.partial_cmp(&b.as_f64()?))
        }
        (Value::Null, Value::Number(b)) => Some(0.0_f64.partial_cmp(&b.as_f64()?)),
        (Value::Number(a), Value::Null) => Some(a.as_f64()?.partial_cmp(&0.0)),
        (Value::String(a), Value::String(b)) => Some(Some(a.cmp(b))),
        (Value::Bool(a), Value::Bool(b)) => Some(Some(a.cmp(b))),
        _ => None,
    }
}

fn incomparable(value: &Value, args: &Value, key: &str) -> RuleOutcome {
    RuleExecutionOutcome::warning(format!(
        "Could not compare {{{{name}}}} ({{{{value}}}} | {}) with args ({{{{{}}}}} | {}).",
        type_name(value),
        key,
        type_name(args)
    ))
    .into()
}

/// The value must be greater than or equal to `args`.
pub fn minimum_value(value: &Value, args: &Value, _: &ValidationContext) -> RuleOutcome {
    match compare(value, args) {
        None => incomparable(value, args, "minimumValue"),
        Some(Some(Ordering::Less)) => {
            RuleExecutionOutcome::error("{{name}} must be at least {{minimumValue}}.").into()
        }
        Some(_) => RuleExecutionOutcome::information().into(),
    }
}

/// The value must be less than or equal to `args`.
pub fn maximum_value(value: &Value, args: &Value, _: &ValidationContext) -> RuleOutcome {
    match compare(value, args) {
        None => incomparable(value, args, "maximumValue"),
        Some(Some(Ordering::Greater)) => {
            RuleExecutionOutcome::error("{{name}} must be at most {{maximumValue}}.").into()
        }
        Some(_) => RuleExecutionOutcome::information().into(),
    }
}
