// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule registry and validation engine.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ValidatorConfig;
use crate::error::{ConfigError, Result, ValkitError};
use crate::format::{DefaultMessageFormatter, MessageFormatter};

use super::outcome::{RuleExecutionOutcome, RuleOutcome};
use super::severity::Severity;
use super::validator::{RuleExecutionResult, ValidationResult};
use super::{Placeholders, RuleSet, ValidationContext};

/// A registered rule function: `(value, args, context) -> outcome`.
pub type RuleFn = Arc<dyn Fn(&Value, &Value, &ValidationContext) -> RuleOutcome + Send + Sync>;

/// Overrides applied to every execution of a registered rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOptions {
    /// Overrides the key of the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Overrides the message template of the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Additional placeholders for the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholders: Option<Placeholders>,
}

impl RuleOptions {
    /// Set the key override.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the message override.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Add a placeholder.
    pub fn with_placeholder(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.placeholders
            .get_or_insert_with(Placeholders::new)
            .insert(key.into(), value.into());
        self
    }
}

/// A rule function together with its registration options.
#[derive(Clone)]
pub struct RuleRegistration {
    /// The rule to execute.
    pub rule: RuleFn,
    /// The options of the rule.
    pub options: RuleOptions,
}

impl RuleRegistration {
    /// Invoke the rule.
    pub fn execute(&self, value: &Value, args: &Value, context: &ValidationContext) -> RuleOutcome {
        (self.rule)(value, args, context)
    }
}

impl fmt::Debug for RuleRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistration")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Validator-wide defaults.
#[derive(Debug, Clone, Default)]
pub struct ValidatorOptions {
    /// Formatter used to render messages. Defaults to [`DefaultMessageFormatter`].
    pub message_formatter: Option<Arc<dyn MessageFormatter>>,
    /// Return an error when validation fails.
    pub throw_on_failure: bool,
    /// Count warnings as failures.
    pub treat_warnings_as_errors: bool,
}

/// Options of a single validation call.
///
/// Unset fields fall back to the validator defaults.
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions {
    /// Context handed to the rules and echoed in the result.
    pub context: Option<ValidationContext>,
    /// Formatter override.
    pub message_formatter: Option<Arc<dyn MessageFormatter>>,
    /// Placeholders that win over every other source.
    pub placeholders: Option<Placeholders>,
    /// Throw-on-failure override.
    pub throw_on_failure: Option<bool>,
    /// Warnings-as-errors override.
    pub treat_warnings_as_errors: Option<bool>,
}

impl ValidationOptions {
    /// Set the context.
    pub fn with_context(mut self, context: ValidationContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Set the message formatter.
    pub fn with_message_formatter(mut self, formatter: Arc<dyn MessageFormatter>) -> Self {
        self.message_formatter = Some(formatter);
        self
    }

    /// Add a placeholder.
    pub fn with_placeholder(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.placeholders
            .get_or_insert_with(Placeholders::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set the throw-on-failure override.
    pub fn throw_on_failure(mut self, enabled: bool) -> Self {
        self.throw_on_failure = Some(enabled);
        self
    }

    /// Set the warnings-as-errors override.
    pub fn treat_warnings_as_errors(mut self, enabled: bool) -> Self {
        self.treat_warnings_as_errors = Some(enabled);
        self
    }
}

/// Whether a rule argument means "do not run this rule".
///
/// `null`, `false` and the empty string are absent. Zero is a valid argument.
/// `serde_json` stores NaN as `null`, so NaN arguments are absent as well.
pub fn is_absent_argument(args: &Value) -> bool {
    match args {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(f64::is_nan),
        _ => false,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// A registry of named rules that validates values against a subset of them.
#[derive(Debug, Clone)]
pub struct Validator {
    rules: IndexMap<String, RuleRegistration>,
    message_formatter: Arc<dyn MessageFormatter>,
    throw_on_failure: bool,
    treat_warnings_as_errors: bool,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidatorOptions::default())
    }
}

impl Validator {
    /// Create an empty validator.
    pub fn new(options: ValidatorOptions) -> Self {
        Self {
            rules: IndexMap::new(),
            message_formatter: options
                .message_formatter
                .unwrap_or_else(|| Arc::new(DefaultMessageFormatter)),
            throw_on_failure: options.throw_on_failure,
            treat_warnings_as_errors: options.treat_warnings_as_errors,
        }
    }

    /// Create a validator with every built-in rule registered.
    pub fn with_builtin_rules(options: ValidatorOptions) -> Self {
        let mut validator = Self::new(options);
        super::builtin::register_builtin_rules(&mut validator);
        validator
    }

    /// Create a validator from configuration.
    ///
    /// Every `[rules.<key>]` entry registers the named built-in rule (the key
    /// itself by default) with the configured options; disabled entries are
    /// removed from the registry.
    pub fn from_config(config: &ValidatorConfig) -> Result<Self> {
        let options = config.validator_options();
        let mut validator = if config.include_builtin {
            Self::with_builtin_rules(options)
        } else {
            Self::new(options)
        };

        for (key, rule_config) in &config.rules {
            if !rule_config.enabled {
                validator.remove_rule(key);
                continue;
            }

            let name = rule_config.rule.as_deref().unwrap_or(key);
            let rule = super::builtin::lookup(name).ok_or_else(|| ConfigError::UnknownRule {
                key: key.clone(),
                rule: name.to_string(),
            })?;
            validator.set_rule_with_options(key.clone(), rule, rule_config.rule_options());
        }

        tracing::debug!("Built validator with {} rules from configuration", validator.len());
        Ok(validator)
    }

    /// Register a rule without options, replacing any rule with the same key.
    pub fn set_rule<F>(&mut self, key: impl Into<String>, rule: F)
    where
        F: Fn(&Value, &Value, &ValidationContext) -> RuleOutcome + Send + Sync + 'static,
    {
        self.set_rule_with_options(key, rule, RuleOptions::default());
    }

    /// Register a rule with options, replacing any rule with the same key.
    pub fn set_rule_with_options<F>(&mut self, key: impl Into<String>, rule: F, options: RuleOptions)
    where
        F: Fn(&Value, &Value, &ValidationContext) -> RuleOutcome + Send + Sync + 'static,
    {
        self.set_registration(
            key,
            RuleRegistration {
                rule: Arc::new(rule),
                options,
            },
        );
    }

    /// Register a prepared registration, replacing any rule with the same key.
    pub fn set_registration(&mut self, key: impl Into<String>, registration: RuleRegistration) {
        let key = key.into();
        tracing::debug!("Registering rule '{}'", key);
        self.rules.insert(key, registration);
    }

    /// Get a registered rule.
    pub fn get_rule(&self, key: &str) -> Option<&RuleRegistration> {
        self.rules.get(key)
    }

    /// Check if a rule is registered.
    pub fn has_rule(&self, key: &str) -> bool {
        self.rules.contains_key(key)
    }

    /// Remove a rule, keeping the order of the others. Returns whether it existed.
    pub fn remove_rule(&mut self, key: &str) -> bool {
        self.rules.shift_remove(key).is_some()
    }

    /// List the registered rules in registration order.
    pub fn list_rules(&self) -> Vec<(&str, &RuleRegistration)> {
        self.rules.iter().map(|(k, r)| (k.as_str(), r)).collect()
    }

    /// Remove every registered rule.
    pub fn clear_rules(&mut self) {
        self.rules.clear();
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule is registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Validate a value with the validator defaults.
    pub fn validate(&self, name: &str, value: &Value, rules: &RuleSet) -> Result<ValidationResult> {
        self.validate_with(name, value, rules, &ValidationOptions::default())
    }

    /// Validate a value against the requested rules.
    ///
    /// Rules whose argument is absent are skipped. Requesting an unregistered
    /// rule fails the whole call with [`ValkitError::RulesNotRegistered`].
    /// A failed validation is returned as `Ok` unless throw-on-failure is
    /// enabled, in which case it is returned as
    /// [`ValkitError::ValidationFailed`].
    pub fn validate_with(
        &self,
        name: &str,
        value: &Value,
        rules: &RuleSet,
        options: &ValidationOptions,
    ) -> Result<ValidationResult> {
        let context = options.context.clone().unwrap_or_default();
        let treat_warnings_as_errors = options
            .treat_warnings_as_errors
            .unwrap_or(self.treat_warnings_as_errors);

        let mut errors = 0usize;
        let mut results = IndexMap::new();
        let mut missing = Vec::new();

        for (key, args) in rules {
            let Some(registration) = self.rules.get(key) else {
                missing.push(key.clone());
                continue;
            };

            if is_absent_argument(args) {
                tracing::trace!("Skipping rule '{}': argument is absent", key);
                continue;
            }

            let outcome = registration.execute(value, args, &context);
            let result = self.build_result(key, args, name, value, outcome, &registration.options, options);

            tracing::debug!("Rule '{}' on '{}' resolved to {}", key, name, result.severity);
            if result.severity.is_failure(treat_warnings_as_errors) {
                errors += 1;
            }

            results.insert(key.clone(), result);
        }

        if !missing.is_empty() {
            tracing::warn!("Validation of '{}' requested unregistered rules: {:?}", name, missing);
            return Err(ValkitError::RulesNotRegistered { keys: missing });
        }

        let result = ValidationResult {
            is_valid: errors == 0,
            rules: results,
            context,
        };

        if !result.is_valid
            && options
                .throw_on_failure
                .unwrap_or(self.throw_on_failure)
        {
            return Err(ValkitError::ValidationFailed(Box::new(result)));
        }

        Ok(result)
    }

    /// Normalize an outcome into a result, merge placeholders and render the message.
    #[allow(clippy::too_many_arguments)]
    fn build_result(
        &self,
        key: &str,
        args: &Value,
        name: &str,
        value: &Value,
        outcome: RuleOutcome,
        rule_options: &RuleOptions,
        options: &ValidationOptions,
    ) -> RuleExecutionResult {
        let mut placeholders = Placeholders::new();
        placeholders.insert(key.to_string(), args.clone());

        let mut result = RuleExecutionResult {
            key: key.to_string(),
            severity: Severity::Error,
            message: None,
            placeholders,
            name: name.to_string(),
            value: value.clone(),
            custom: None,
        };

        let outcome_placeholders = match outcome {
            RuleOutcome::Bool(passed) => {
                result.severity = if passed {
                    Severity::Information
                } else {
                    Severity::Error
                };
                None
            }
            RuleOutcome::Severity(severity) => {
                result.severity = severity;
                None
            }
            RuleOutcome::Outcome(outcome) => apply_outcome(&mut result, outcome, rule_options),
        };

        let defaults = [
            ("key", Value::String(result.key.clone())),
            ("name", Value::String(result.name.clone())),
            ("value", result.value.clone()),
            ("severity", Value::String(result.severity.to_string())),
        ];
        for (k, v) in defaults {
            result.placeholders.insert(k.to_string(), v);
        }
        for source in [
            outcome_placeholders.as_ref(),
            rule_options.placeholders.as_ref(),
            options.placeholders.as_ref(),
        ]
        .into_iter()
        .flatten()
        {
            for (k, v) in source {
                result.placeholders.insert(k.clone(), v.clone());
            }
        }

        if let Some(message) = result.message.take() {
            let formatter = options
                .message_formatter
                .as_ref()
                .unwrap_or(&self.message_formatter);
            result.message = Some(formatter.format(&message, &result.placeholders));
        }

        result
    }
}

/// Apply a structured outcome to a result, returning the outcome placeholders.
///
/// Registration options win over the outcome for `key` and `message`; blank
/// strings count as unset.
fn apply_outcome(
    result: &mut RuleExecutionResult,
    outcome: RuleExecutionOutcome,
    options: &RuleOptions,
) -> Option<Placeholders> {
    result.severity = outcome.severity;

    if let Some(key) = non_blank(options.key.as_deref()).or(non_blank(outcome.key.as_deref())) {
        result.key = key.to_string();
    }
    if let Some(message) =
        non_blank(options.message.as_deref()).or(non_blank(outcome.message.as_deref()))
    {
        result.message = Some(message.to_string());
    }
    if let Some(name) = non_blank(outcome.name.as_deref()) {
        result.name = name.to_string();
    }
    if let Some(value) = outcome.value {
        result.value = value;
    }
    result.custom = outcome.custom;

    outcome.placeholders
}
