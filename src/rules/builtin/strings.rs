// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Character-level string rules.

use indexmap::IndexSet;
use serde_json::Value;

use super::{must_be_string, positive_count, positive_number_warning, EMPTY_STRING};
use crate::rules::{RuleExecutionOutcome, RuleOutcome, ValidationContext};

/// Only characters listed in `args` may appear in the value.
pub fn allowed_characters(value: &Value, args: &Value, _: &ValidationContext) -> RuleOutcome {
    let Some(value) = value.as_str() else {
        return must_be_string();
    };
    let Some(allowed) = args.as_str() else {
        return RuleExecutionOutcome::warning(
            "The arguments must be a string containing the allowed characters.",
        )
        .into();
    };

    let prohibited: IndexSet<char> = value.chars().filter(|c| !allowed.contains(*c)).collect();
    if !prohibited.is_empty() {
        let listed: String = prohibited.into_iter().collect();
        return RuleExecutionOutcome::error(format!(
            "{{{{name}}}} contains the following prohibited characters: {}. Only the following characters are allowed: {{{{allowedCharacters}}}}",
            listed
        ))
        .into();
    }

    RuleExecutionOutcome::information().into()
}

/// The value must contain at least `args` ASCII digits.
pub fn contains_digits(value: &Value, args: &Value, _: &ValidationContext) -> RuleOutcome {
    let Some(value) = value.as_str() else {
        return must_be_string();
    };
    let Some(required) = positive_count(args) else {
        return positive_number_warning();
    };

    let digits = value.chars().filter(char::is_ascii_digit).count();
    if (digits as f64) < required {
        return RuleExecutionOutcome::error("{{name}} must contain at least {{containsDigits}} digit(s).")
            .into();
    }
    RuleExecutionOutcome::information().into()
}

/// The value must contain at least `args` lowercase letters.
pub fn contains_lowercase(value: &Value, args: &Value, _: &ValidationContext) -> RuleOutcome {
    let Some(required) = positive_count(args) else {
        return positive_number_warning();
    };
    let Some(value) = value.as_str() else {
        return must_be_string();
    };

    let lowercase = value
        .chars()
        .filter(|c| c.is_alphabetic() && c.is_lowercase())
        .count();
    if !value.is_empty() && (lowercase as f64) < required {
        return RuleExecutionOutcome::error(
            "{{name}} must contain at least {{containsLowercase}} lowercase letter(s).",
        )
        .into();
    }
    RuleExecutionOutcome::information().into()
}

/// The value must contain at least `args` uppercase letters.
pub fn contains_uppercase(value: &Value, args: &Value, _: &ValidationContext) -> RuleOutcome {
    let Some(value) = value.as_str() else {
        return must_be_string();
    };
    let Some(required) = positive_count(args) else {
        return positive_number_warning();
    };

    let uppercase = value
        .chars()
        .filter(|c| c.is_alphabetic() && c.is_uppercase())
        .count();
    if !value.is_empty() && (uppercase as f64) < required {
        return RuleExecutionOutcome::error(
            "{{name}} must contain at least {{containsUppercase}} uppercase letter(s).",
        )
        .into();
    }
    RuleExecutionOutcome::information().into()
}

/// The value must contain at least `args` characters that are neither letters nor digits.
pub fn contains_non_alphanumeric(value: &Value, args: &Value, _: &ValidationContext) -> RuleOutcome {
    let Some(value) = value.as_str() else {
        return must_be_string();
    };
    let Some(required) = positive_count(args) else {
        return positive_number_warning();
    };

    let count = value.chars().filter(|c| !c.is_alphanumeric()).count();
    if (count as f64) < required {
        return RuleExecutionOutcome::error(
            "{{name}} must contain at least {{containsNonAlphanumeric}} non-alphanumeric character(s).",
        )
        .into();
    }
    RuleExecutionOutcome::information().into()
}

/// The value must contain at least `args` distinct characters.
pub fn unique_characters(value: &Value, args: &Value, _: &ValidationContext) -> RuleOutcome {
    let Some(required) = positive_count(args) else {
        return positive_number_warning();
    };
    let Some(value) = value.as_str() else {
        return must_be_string();
    };

    let unique: IndexSet<char> = value.chars().collect();
    if !value.is_empty() && (unique.len() as f64) < required {
        return RuleExecutionOutcome::error(
            "{{name}} must contain at least {{uniqueCharacters}} unique character(s).",
        )
        .into();
    }
    RuleExecutionOutcome::information().into()
}

/// The value must be a letters, digits and underscores identifier not starting with a digit.
pub fn identifier(value: &Value, _: &Value, _: &ValidationContext) -> RuleOutcome {
    let Some(value) = value.as_str() else {
        return must_be_string();
    };

    let Some(first) = value.chars().next() else {
        return RuleExecutionOutcome::error(EMPTY_STRING).into();
    };
    if first.is_ascii_digit() {
        return RuleExecutionOutcome::error("{{name}} cannot start with a digit.").into();
    }
    if value.chars().any(|c| !c.is_alphanumeric() && c != '_') {
        return RuleExecutionOutcome::error(
            "{{name}} may only contain letters, digits and underscores (_).",
        )
        .into();
    }
    RuleExecutionOutcome::information().into()
}

/// The value must be non-empty alphanumeric words separated by hyphens.
pub fn slug(value: &Value, _: &Value, _: &ValidationContext) -> RuleOutcome {
    let Some(value) = value.as_str() else {
        return must_be_string();
    };

    let invalid = value
        .split('-')
        .any(|word| word.is_empty() || word.chars().any(|c| !c.is_alphanumeric()));
    if invalid {
        return RuleExecutionOutcome::error(
            "{{name}} must be composed of non-empty alphanumeric words separated by hyphens (-).",
        )
        .into();
    }
    RuleExecutionOutcome::information().into()
}
