// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! valkit - Pluggable Value Validation
//!
//! Register named validation rules on a [`Validator`], then validate a value
//! against any subset of them and get a per-rule result with severities and
//! rendered messages.
//!
//! # Features
//!
//! - **Rule Registry**: Add, replace, list and remove rules by key
//! - **Flexible Rule Outcomes**: Rules return a boolean, a severity or a structured outcome
//! - **Message Templates**: `{{placeholder}}` substitution with layered overrides
//! - **Failure Policy**: Warnings-as-errors and throw-on-failure, per validator or per call
//! - **Built-in Rules**: Email, URL, lengths, bounds, character classes and more
//! - **Configuration**: Build validators from valkit.toml
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use valkit::rules::{builtin, RuleSet, Severity};
//! use valkit::Validator;
//!
//! let mut validator = Validator::default();
//! validator.set_rule("required", builtin::required);
//! validator.set_rule("email", builtin::email);
//!
//! let mut rules = RuleSet::new();
//! rules.insert("required".to_string(), json!(true));
//! rules.insert("email".to_string(), json!(true));
//!
//! let result = validator.validate("email", &json!("test@example.com"), &rules).unwrap();
//! assert!(result.is_valid);
//! assert_eq!(result.rules["email"].severity, Severity::Information);
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod format;
pub mod rules;

// Re-exports for convenience
pub use config::ValidatorConfig;
pub use error::{Result, ValkitError};
pub use format::{DefaultMessageFormatter, MessageFormatter};
pub use rules::{ValidationOptions, ValidationResult, Validator, ValidatorOptions};
