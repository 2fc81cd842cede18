// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules.
//!
//! Every rule has the `(value, args, context) -> RuleOutcome` shape expected
//! by [`Validator::set_rule`](super::Validator::set_rule) and returns a
//! structured outcome whose message is a template (`{{name}}`, `{{<key>}}`).

mod compare;
mod format;
mod presence;
mod strings;

use serde_json::Value;

use super::{RuleExecutionOutcome, RuleOutcome, ValidationContext, Validator};

pub use compare::{maximum_length, maximum_value, minimum_length, minimum_value};
pub use format::{email, pattern, url};
pub use presence::{confirm, required};
pub use strings::{
    allowed_characters, contains_digits, contains_lowercase, contains_non_alphanumeric,
    contains_uppercase, identifier, slug, unique_characters,
};

/// Signature shared by the built-in rules.
pub type BuiltinRule = fn(&Value, &Value, &ValidationContext) -> RuleOutcome;

/// Built-in rules by registration key.
pub const BUILTIN_RULES: &[(&str, BuiltinRule)] = &[
    ("allowedCharacters", allowed_characters),
    ("confirm", confirm),
    ("containsDigits", contains_digits),
    ("containsLowercase", contains_lowercase),
    ("containsNonAlphanumeric", contains_non_alphanumeric),
    ("containsUppercase", contains_uppercase),
    ("email", email),
    ("identifier", identifier),
    ("maximumLength", maximum_length),
    ("maximumValue", maximum_value),
    ("minimumLength", minimum_length),
    ("minimumValue", minimum_value),
    ("pattern", pattern),
    ("required", required),
    ("slug", slug),
    ("uniqueCharacters", unique_characters),
    ("url", url),
];

/// Find a built-in rule by key.
pub fn lookup(key: &str) -> Option<BuiltinRule> {
    BUILTIN_RULES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, rule)| *rule)
}

/// Register every built-in rule under its default key.
pub fn register_builtin_rules(validator: &mut Validator) {
    for (key, rule) in BUILTIN_RULES {
        validator.set_rule(*key, *rule);
    }
}

const MUST_BE_STRING: &str = "{{name}} must be a string.";
const EMPTY_STRING: &str = "{{name}} cannot be an empty string.";
const POSITIVE_NUMBER_ARGS: &str = "The arguments should be a positive number.";

/// Numeric reading of an argument, loosely following ECMAScript `Number()`.
///
/// `null` is 0, booleans are 0/1, strings are parsed after trimming (blank is
/// 0), single-element arrays use their element. Anything else is NaN.
pub(crate) fn to_number(args: &Value) -> f64 {
    match args {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse().unwrap_or(f64::NAN)
            }
        }
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [item] => to_number(item),
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

/// Read a strictly positive count argument, or `None` for the warning case.
pub(crate) fn positive_count(args: &Value) -> Option<f64> {
    let count = to_number(args);
    (!count.is_nan() && count > 0.0).then_some(count)
}

/// The warning returned for non-positive count arguments.
pub(crate) fn positive_number_warning() -> RuleOutcome {
    RuleExecutionOutcome::warning(POSITIVE_NUMBER_ARGS).into()
}

/// The error returned when a string value was expected.
pub(crate) fn must_be_string() -> RuleOutcome {
    RuleExecutionOutcome::error(MUST_BE_STRING).into()
}

/// Name of the JSON type of a value, used in diagnostic messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
