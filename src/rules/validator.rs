// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation result types.

use console::{style, Style};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::severity::Severity;
use super::{Placeholders, ValidationContext};

/// Output format for rendering a validation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Styled terminal text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// The normalized result of executing one rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleExecutionResult {
    /// Key of the rule, possibly overridden by options or the outcome.
    pub key: String,
    /// Severity of the result.
    pub severity: Severity,
    /// Rendered message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Merged placeholders used to render the message.
    pub placeholders: Placeholders,
    /// Name of the validated field.
    pub name: String,
    /// Validated value.
    pub value: Value,
    /// Custom state provided by the rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Value>,
}

impl RuleExecutionResult {
    /// Format the result for terminal output.
    pub fn format(&self) -> String {
        let (prefix, code_style) = match self.severity {
            Severity::Error | Severity::Critical => (style("✗").red().bold(), Style::new().red()),
            Severity::Warning => (style("⚠").yellow().bold(), Style::new().yellow()),
            _ => (style("✓").green().bold(), Style::new().green()),
        };

        let mut output = format!(
            "{} {} {}",
            prefix,
            code_style.apply_to(&self.key),
            style(format!("[{}]", self.severity)).dim()
        );

        if let Some(ref message) = self.message {
            output.push(' ');
            output.push_str(message);
        }

        output
    }
}

/// Result of validating a value against a rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether no executed rule failed.
    pub is_valid: bool,
    /// Results of the executed rules, keyed by requested rule key.
    pub rules: IndexMap<String, RuleExecutionResult>,
    /// Context of the validation, echoed back unchanged.
    pub context: ValidationContext,
}

impl ValidationResult {
    /// Check if the validation passed.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Get a rule result by requested key.
    pub fn rule(&self, key: &str) -> Option<&RuleExecutionResult> {
        self.rules.get(key)
    }

    /// Results at or above the given severity.
    pub fn at_least(&self, severity: Severity) -> impl Iterator<Item = &RuleExecutionResult> {
        self.rules.values().filter(move |r| r.severity >= severity)
    }

    /// Count the results with `error` or `critical` severity.
    pub fn error_count(&self) -> usize {
        self.at_least(Severity::Error).count()
    }

    /// Count the results with `warning` severity.
    pub fn warning_count(&self) -> usize {
        self.rules
            .values()
            .filter(|r| r.severity == Severity::Warning)
            .count()
    }

    /// Render the result in the given format.
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.to_json(),
            OutputFormat::Text => self.render_text(),
        }
    }

    /// Render in text format.
    fn render_text(&self) -> String {
        let status = if self.is_valid {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };

        let mut lines = vec![format!("{} {}", status, self.summary())];
        for result in self.rules.values() {
            lines.push(format!("  {}", result.format()));
        }
        lines.join("\n")
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        let errors = self.error_count();
        let warnings = self.warning_count();
        if self.is_valid {
            if warnings == 0 {
                "Valid".to_string()
            } else {
                format!("Valid ({} warnings)", warnings)
            }
        } else {
            format!("Invalid ({} errors, {} warnings)", errors, warnings)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_result(key: &str, severity: Severity, message: Option<&str>) -> RuleExecutionResult {
        RuleExecutionResult {
            key: key.to_string(),
            severity,
            message: message.map(str::to_string),
            placeholders: Placeholders::new(),
            name: "field".to_string(),
            value: json!("value"),
            custom: None,
        }
    }

    fn make_validation(is_valid: bool, results: Vec<RuleExecutionResult>) -> ValidationResult {
        ValidationResult {
            is_valid,
            rules: results.into_iter().map(|r| (r.key.clone(), r)).collect(),
            context: ValidationContext::new(),
        }
    }

    #[test]
    fn test_validation_result_valid() {
        let result = make_validation(true, vec![make_result("required", Severity::Information, None)]);
        assert!(result.is_valid());
        assert_eq!(result.error_count(), 0);
        assert_eq!(result.summary(), "Valid");
    }

    #[test]
    fn test_summary() {
        let result = make_validation(
            true,
            vec![make_result("email", Severity::Warning, Some("careful"))],
        );
        assert!(result.summary().contains("1 warnings"));

        let result = make_validation(
            false,
            vec![
                make_result("email", Severity::Warning, Some("careful")),
                make_result("required", Severity::Critical, Some("missing")),
            ],
        );
        assert_eq!(result.summary(), "Invalid (1 errors, 1 warnings)");
    }

    #[test]
    fn test_rule_result_format() {
        let formatted = make_result("email", Severity::Error, Some("email is invalid.")).format();
        assert!(formatted.contains("email"));
        assert!(formatted.contains("[error]"));
        assert!(formatted.contains("email is invalid."));
    }

    #[test]
    fn test_render_json() {
        let result = make_validation(false, vec![make_result("required", Severity::Error, None)]);
        let json: Value = serde_json::from_str(&result.render(OutputFormat::Json)).unwrap();
        assert_eq!(json["is_valid"], json!(false));
        assert_eq!(json["rules"]["required"]["severity"], json!("error"));
        assert!(json["rules"]["required"].get("message").is_none());
    }

    #[test]
    fn test_render_text_lists_rules() {
        let result = make_validation(
            true,
            vec![
                make_result("required", Severity::Information, None),
                make_result("email", Severity::Information, None),
            ],
        );
        let text = result.render(OutputFormat::Text);
        assert_eq!(text.lines().count(), 3);
    }
}
