// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Message formatting.
//!
//! A [`MessageFormatter`] turns a rule message template and the merged
//! placeholder mapping into the final human-readable message.

use std::fmt;

use handlebars::{no_escape, Handlebars};
use serde_json::Value;

use crate::rules::Placeholders;

/// Renders message templates with placeholder values.
pub trait MessageFormatter: fmt::Debug + Send + Sync {
    /// Format `message` using `placeholders`.
    fn format(&self, message: &str, placeholders: &Placeholders) -> String;
}

/// Replaces every `{{key}}` token whose key is present in the placeholders.
///
/// Tokens naming an unknown placeholder are left untouched. There is no
/// escaping, conditional or loop support.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessageFormatter;

impl MessageFormatter for DefaultMessageFormatter {
    fn format(&self, message: &str, placeholders: &Placeholders) -> String {
        let mut formatted = message.to_string();
        for (key, value) in placeholders {
            let token = format!("{{{{{}}}}}", key);
            if formatted.contains(&token) {
                formatted = formatted.replace(&token, &placeholder_to_string(value));
            }
        }
        formatted
    }
}

/// Formats messages as Handlebars templates.
///
/// HTML escaping is disabled. Unlike [`DefaultMessageFormatter`], unknown
/// placeholders render as empty strings.
pub struct HandlebarsMessageFormatter {
    registry: Handlebars<'static>,
}

impl HandlebarsMessageFormatter {
    /// Create a formatter with escaping disabled.
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(no_escape);
        Self { registry }
    }
}

impl Default for HandlebarsMessageFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HandlebarsMessageFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlebarsMessageFormatter").finish()
    }
}

impl MessageFormatter for HandlebarsMessageFormatter {
    fn format(&self, message: &str, placeholders: &Placeholders) -> String {
        match self.registry.render_template(message, placeholders) {
            Ok(rendered) => rendered,
            Err(e) => {
                tracing::warn!("Failed to render message template {:?}: {}", message, e);
                message.to_string()
            }
        }
    }
}

/// Convert a placeholder value to the text inserted into a message.
///
/// Strings are inserted as-is and whole floats drop their fractional part
/// (`8.0` renders as `8`); anything else uses its JSON representation.
pub fn placeholder_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f == 0.0 => "0".to_string(),
            Some(f) => f.to_string(),
            None => n.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn placeholders(value: Value) -> Placeholders {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("placeholders must be an object"),
        }
    }

    #[test]
    fn test_default_formatter_replaces_known_tokens() {
        let formatter = DefaultMessageFormatter;
        let values = placeholders(json!({ "name": "email", "minimumLength": 8 }));
        let message =
            formatter.format("{{name}} must be at least {{minimumLength}} character(s) long.", &values);
        assert_eq!(message, "email must be at least 8 character(s) long.");
    }

    #[test]
    fn test_default_formatter_keeps_unknown_tokens() {
        let formatter = DefaultMessageFormatter;
        let values = placeholders(json!({ "name": "email" }));
        assert_eq!(
            formatter.format("{{name}} equals {{confirm}}", &values),
            "email equals {{confirm}}"
        );
    }

    #[test]
    fn test_default_formatter_replaces_every_occurrence() {
        let formatter = DefaultMessageFormatter;
        let values = placeholders(json!({ "x": true }));
        assert_eq!(formatter.format("{{x}}/{{x}}", &values), "true/true");
    }

    #[test]
    fn test_placeholder_to_string() {
        assert_eq!(placeholder_to_string(&json!("raw")), "raw");
        assert_eq!(placeholder_to_string(&json!(null)), "null");
        assert_eq!(placeholder_to_string(&json!(3)), "3");
        assert_eq!(placeholder_to_string(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_placeholder_to_string_trims_whole_floats() {
        assert_eq!(placeholder_to_string(&json!(8.0)), "8");
        assert_eq!(placeholder_to_string(&json!(-0.0)), "0");
        assert_eq!(placeholder_to_string(&json!(2.5)), "2.5");

        let formatter = DefaultMessageFormatter;
        let values = placeholders(json!({ "name": "p", "minimumLength": 8.0 }));
        assert_eq!(
            formatter.format("{{name}} must be at least {{minimumLength}} character(s) long.", &values),
            "p must be at least 8 character(s) long."
        );
    }

    #[test]
    fn test_handlebars_formatter_does_not_escape() {
        let formatter = HandlebarsMessageFormatter::new();
        let values = placeholders(json!({ "name": "<email>" }));
        assert_eq!(formatter.format("{{name}} is required.", &values), "<email> is required.");
    }

    #[test]
    fn test_handlebars_formatter_returns_template_on_error() {
        let formatter = HandlebarsMessageFormatter::new();
        let values = placeholders(json!({}));
        assert_eq!(formatter.format("{{#if}}", &values), "{{#if}}");
    }
}
