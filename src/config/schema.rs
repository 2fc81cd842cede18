// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines the structures that can be loaded from valkit.toml.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::format::{DefaultMessageFormatter, HandlebarsMessageFormatter, MessageFormatter};
use crate::rules::{Placeholders, RuleOptions, ValidatorOptions};

/// The main configuration structure for a validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Return an error when validation fails.
    pub throw_on_failure: bool,

    /// Count warnings as failures.
    pub treat_warnings_as_errors: bool,

    /// Message formatter to use.
    pub formatter: FormatterKind,

    /// Register every built-in rule before applying `rules`.
    pub include_builtin: bool,

    /// Per-key rule registrations, in file order.
    pub rules: IndexMap<String, RuleConfig>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            throw_on_failure: false,
            treat_warnings_as_errors: false,
            formatter: FormatterKind::Default,
            include_builtin: true,
            rules: IndexMap::new(),
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }

    /// Validator-wide options described by this configuration.
    pub fn validator_options(&self) -> ValidatorOptions {
        ValidatorOptions {
            message_formatter: Some(self.formatter.build()),
            throw_on_failure: self.throw_on_failure,
            treat_warnings_as_errors: self.treat_warnings_as_errors,
        }
    }
}

/// Which message formatter a configured validator uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    /// Literal `{{key}}` substitution.
    #[default]
    Default,
    /// Handlebars templates.
    Handlebars,
}

impl FormatterKind {
    /// Instantiate the formatter.
    pub fn build(&self) -> Arc<dyn MessageFormatter> {
        match self {
            FormatterKind::Default => Arc::new(DefaultMessageFormatter),
            FormatterKind::Handlebars => Arc::new(HandlebarsMessageFormatter::new()),
        }
    }
}

/// Registration of one rule key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Built-in rule to register (defaults to the table key).
    pub rule: Option<String>,

    /// Whether the key is registered at all.
    pub enabled: bool,

    /// Key override for results.
    pub key: Option<String>,

    /// Message override for results.
    pub message: Option<String>,

    /// Extra message placeholders.
    pub placeholders: Option<Placeholders>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            rule: None,
            enabled: true,
            key: None,
            message: None,
            placeholders: None,
        }
    }
}

impl RuleConfig {
    /// Registration options for this rule.
    pub fn rule_options(&self) -> RuleOptions {
        RuleOptions {
            key: self.key.clone(),
            message: self.message.clone(),
            placeholders: self.placeholders.clone(),
        }
    }
}
