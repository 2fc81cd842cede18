// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Pattern, email and URL rules.

use indexmap::IndexSet;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use super::{must_be_string, EMPTY_STRING};
use crate::rules::{RuleExecutionOutcome, RuleOutcome, ValidationContext};

lazy_static! {
    /// Default email address shape. Leading dots and consecutive dots are
    /// rejected separately since the regex crate has no lookaround.
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"(?i)^([A-Z0-9_'+\-.]*)[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$"
    ).unwrap();

    /// Separators accepted between protocols in a string argument.
    static ref PROTOCOL_SEPARATOR: Regex = Regex::new(r"[,;|]").unwrap();
}

const DEFAULT_PROTOCOLS: [&str; 2] = ["http", "https"];

fn is_default_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_REGEX.is_match(value)
}

/// The value must be an email address.
///
/// `args` may be `true` for the default check or a regular expression string.
/// Other arguments fall back to the default check and produce a warning when
/// the address is otherwise valid.
pub fn email(value: &Value, args: &Value, _: &ValidationContext) -> RuleOutcome {
    let Some(value) = value.as_str() else {
        return must_be_string();
    };

    let (is_match, args_valid) = match args {
        Value::Bool(_) => (is_default_email(value), true),
        Value::String(pattern) => match Regex::new(pattern) {
            Ok(regex) => (regex.is_match(value), true),
            Err(_) => (is_default_email(value), false),
        },
        _ => (is_default_email(value), false),
    };

    if !is_match {
        return RuleExecutionOutcome::error("{{name}} must be a valid email address.").into();
    }
    if !args_valid {
        return RuleExecutionOutcome::warning(
            "The arguments must be undefined, or a valid email address validation regular expression.",
        )
        .into();
    }
    RuleExecutionOutcome::information().into()
}

/// The value must match the regular expression in `args`.
pub fn pattern(value: &Value, args: &Value, _: &ValidationContext) -> RuleOutcome {
    let Some(value) = value.as_str() else {
        return must_be_string();
    };
    let Some(regex) = args.as_str().and_then(|p| Regex::new(p).ok()) else {
        return RuleExecutionOutcome::warning("The arguments should be a regular expression.").into();
    };

    if !regex.is_match(value) {
        return RuleExecutionOutcome::error("{{name}} must match the pattern {{pattern}}.").into();
    }
    RuleExecutionOutcome::information().into()
}

fn normalize_protocol(protocol: &str) -> String {
    protocol.trim().to_lowercase().trim_end_matches(':').to_string()
}

/// Collect the allowed protocols, returning whether `args` was understood.
fn allowed_protocols(args: &Value) -> (IndexSet<String>, bool) {
    let mut protocols: IndexSet<String> = DEFAULT_PROTOCOLS.iter().map(|p| p.to_string()).collect();

    let extra: Vec<&str> = match args {
        Value::Bool(true) => return (protocols, true),
        Value::String(s) => PROTOCOL_SEPARATOR.split(s).collect(),
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };
    if extra.is_empty() {
        return (protocols, false);
    }

    protocols.extend(extra.into_iter().map(normalize_protocol));
    (protocols, true)
}

/// The value must be an absolute URL using an allowed protocol.
///
/// `http` and `https` are always allowed; `args` may add protocols as a
/// string separated by commas, semicolons or pipes, or as an array.
pub fn url(value: &Value, args: &Value, _: &ValidationContext) -> RuleOutcome {
    let Some(value) = value.as_str() else {
        return must_be_string();
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return RuleExecutionOutcome::error(EMPTY_STRING).into();
    }

    let (protocols, args_valid) = allowed_protocols(args);

    let Ok(parsed) = ::url::Url::parse(trimmed) else {
        return RuleExecutionOutcome::error("{{name}} must be a valid URL.").into();
    };

    if !protocols.contains(&normalize_protocol(parsed.scheme())) {
        let listed: Vec<&str> = protocols.iter().map(String::as_str).collect();
        return RuleExecutionOutcome::error(format!(
            "{{{{name}}}} must be an URL with one of the following protocols: {}.",
            listed.join(", ")
        ))
        .into();
    }

    if !args_valid {
        return RuleExecutionOutcome::warning(
            "The arguments must be undefined, a string containing the allowed protocols separated by commas, semicolons or pipes, or an array of allowed protocols.",
        )
        .into();
    }
    RuleExecutionOutcome::information().into()
}
