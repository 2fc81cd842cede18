// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule registry and execution engine.
//!
//! This module provides the [`Validator`], which owns a registry of named
//! rules and runs a subset of them against a value, along with the built-in
//! rule catalogue and the result types.

pub mod builtin;
mod engine;
mod outcome;
mod severity;
mod validator;

use indexmap::IndexMap;
use serde_json::{Map, Value};

pub use engine::{
    is_absent_argument, RuleFn, RuleOptions, RuleRegistration, ValidationOptions, Validator,
    ValidatorOptions,
};
pub use outcome::{RuleExecutionOutcome, RuleOutcome};
pub use severity::{Severity, SeverityParseError};
pub use validator::{OutputFormat, RuleExecutionResult, ValidationResult};

/// Named substitution values for message templates, in insertion order.
pub type Placeholders = Map<String, Value>;

/// Caller-supplied data handed to every rule and echoed back in the result.
pub type ValidationContext = Map<String, Value>;

/// Requested rule keys mapped to their arguments.
pub type RuleSet = IndexMap<String, Value>;
