// Author: Eshan Roy
// SPDX-License-Identifier: MIT

use std::sync::{Arc, Once};

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use valkit::config::parse_config;
use valkit::format::HandlebarsMessageFormatter;
use valkit::rules::{builtin, RuleOutcome, RuleSet, Severity, ValidationContext};
use valkit::{ValidationOptions, Validator, ValidatorOptions, ValkitError};

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("valkit=trace"))
            .with_test_writer()
            .try_init();
    });
}

fn rules(entries: &[(&str, Value)]) -> RuleSet {
    entries
        .iter()
        .map(|(key, args)| (key.to_string(), args.clone()))
        .collect()
}

fn email_validator(options: ValidatorOptions) -> Validator {
    let mut validator = Validator::new(options);
    validator.set_rule("required", builtin::required);
    validator.set_rule("email", builtin::email);
    validator
}

#[test]
fn valid_email_passes_every_rule() {
    init_tracing();
    let validator = email_validator(ValidatorOptions::default());
    let result = validator
        .validate(
            "email",
            &json!("test@example.com"),
            &rules(&[("required", json!(true)), ("email", json!(true))]),
        )
        .unwrap();

    assert!(result.is_valid);
    assert_eq!(result.rules["required"].severity, Severity::Information);
    assert_eq!(result.rules["email"].severity, Severity::Information);
}

#[test]
fn invalid_arguments_fail_when_warnings_are_errors() {
    init_tracing();
    let validator = email_validator(ValidatorOptions {
        treat_warnings_as_errors: true,
        ..Default::default()
    });
    let result = validator
        .validate(
            "email",
            &json!("test@example.com"),
            &rules(&[("required", json!(true)), ("email", json!(1))]),
        )
        .unwrap();

    assert!(!result.is_valid);
    let email = &result.rules["email"];
    assert_eq!(email.severity, Severity::Warning);
    assert_eq!(
        email.message.as_deref(),
        Some("The arguments must be undefined, or a valid email address validation regular expression.")
    );
}

#[test]
fn clear_rules_empties_the_registry() {
    let mut validator = email_validator(ValidatorOptions::default());
    validator.clear_rules();
    assert_eq!(validator.list_rules().len(), 0);
}

#[rstest]
#[case(Value::Null)]
#[case(json!(false))]
#[case(json!(""))]
#[case(Value::from(f64::NAN))]
fn absent_arguments_skip_the_rule(#[case] args: Value) {
    init_tracing();
    let mut validator = Validator::default();
    validator.set_rule("fails", |_: &Value, _: &Value, _: &ValidationContext| {
        RuleOutcome::Bool(false)
    });

    let result = validator
        .validate("field", &json!("x"), &rules(&[("fails", args)]))
        .unwrap();
    assert!(result.is_valid);
    assert!(!result.rules.contains_key("fails"));
}

#[rstest]
#[case(json!(0))]
#[case(json!(-0.0))]
#[case(json!(0u64))]
fn zero_arguments_run_the_rule(#[case] args: Value) {
    let mut validator = Validator::default();
    validator.set_rule("fails", |_: &Value, _: &Value, _: &ValidationContext| {
        RuleOutcome::Bool(false)
    });

    let result = validator
        .validate("field", &json!("x"), &rules(&[("fails", args)]))
        .unwrap();
    assert!(!result.is_valid);
    assert!(result.rules.contains_key("fails"));
}

#[rstest]
#[case(true)]
#[case(false)]
fn missing_rules_always_abort(#[case] registered_passes: bool) {
    init_tracing();
    let mut validator = Validator::default();
    validator.set_rule("known", move |_: &Value, _: &Value, _: &ValidationContext| {
        RuleOutcome::Bool(registered_passes)
    });

    let err = validator
        .validate(
            "field",
            &json!("x"),
            &rules(&[("known", json!(true)), ("unknown", json!(true))]),
        )
        .unwrap_err();
    assert!(matches!(err, ValkitError::RulesNotRegistered { ref keys } if keys == &["unknown"]));
}

#[test]
fn normalization_is_equivalent_across_shapes() {
    let mut validator = Validator::default();
    validator.set_rule("bool_pass", |_: &Value, _: &Value, _: &ValidationContext| true.into());
    validator.set_rule("sev_pass", |_: &Value, _: &Value, _: &ValidationContext| {
        Severity::Information.into()
    });
    validator.set_rule("bool_fail", |_: &Value, _: &Value, _: &ValidationContext| false.into());
    validator.set_rule("sev_fail", |_: &Value, _: &Value, _: &ValidationContext| {
        Severity::Error.into()
    });

    let result = validator
        .validate(
            "field",
            &json!(1),
            &rules(&[
                ("bool_pass", json!(true)),
                ("sev_pass", json!(true)),
                ("bool_fail", json!(true)),
                ("sev_fail", json!(true)),
            ]),
        )
        .unwrap();

    assert_eq!(result.rules["bool_pass"].severity, result.rules["sev_pass"].severity);
    assert_eq!(result.rules["bool_fail"].severity, result.rules["sev_fail"].severity);
    let keys: Vec<&str> = result.rules.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["bool_pass", "sev_pass", "bool_fail", "sev_fail"]);
}

#[rstest]
#[case(false, None, false)]
#[case(true, None, true)]
#[case(true, Some(false), false)]
#[case(false, Some(true), true)]
fn throw_on_failure_matrix(
    #[case] validator_default: bool,
    #[case] call_override: Option<bool>,
    #[case] expect_error: bool,
) {
    let validator = email_validator(ValidatorOptions {
        throw_on_failure: validator_default,
        ..Default::default()
    });
    let rule_set = rules(&[("required", json!(true))]);
    let options = ValidationOptions {
        throw_on_failure: call_override,
        ..Default::default()
    };

    let outcome = validator.validate_with("email", &Value::Null, &rule_set, &options);
    let expected = email_validator(ValidatorOptions::default())
        .validate("email", &Value::Null, &rule_set)
        .unwrap();

    match outcome {
        Ok(result) => {
            assert!(!expect_error);
            assert_eq!(result, expected);
        }
        Err(err) => {
            assert!(expect_error);
            assert_eq!(err.into_validation_result(), Some(expected));
        }
    }
}

#[test]
fn context_is_shared_with_rules_and_echoed() {
    let mut validator = Validator::default();
    validator.set_rule("tenant", |_: &Value, args: &Value, context: &ValidationContext| {
        RuleOutcome::Bool(context.get("tenant") == Some(args))
    });

    let mut context = ValidationContext::new();
    context.insert("tenant".to_string(), json!("acme"));
    let options = ValidationOptions::default().with_context(context.clone());

    let result = validator
        .validate_with("field", &json!(1), &rules(&[("tenant", json!("acme"))]), &options)
        .unwrap();
    assert!(result.is_valid);
    assert_eq!(result.context, context);
}

#[test]
fn handlebars_formatter_renders_messages() {
    let mut validator = Validator::new(ValidatorOptions {
        message_formatter: Some(Arc::new(HandlebarsMessageFormatter::new())),
        ..Default::default()
    });
    validator.set_rule("minimumLength", builtin::minimum_length);

    let result = validator
        .validate("password", &json!("abc"), &rules(&[("minimumLength", json!(8))]))
        .unwrap();
    assert_eq!(
        result.rules["minimumLength"].message.as_deref(),
        Some("password must be at least 8 character(s) long.")
    );
}

#[test]
fn validator_from_config() {
    init_tracing();
    let config = parse_config(
        r#"
treat_warnings_as_errors = true

[rules.email]
key = "EmailAddressValidator"
message = "{{name}} doit être une adresse courriel valide."

[rules.passwordLength]
rule = "minimumLength"

[rules.confirm]
enabled = false
"#,
    )
    .unwrap();

    let validator = Validator::from_config(&config).unwrap();
    assert!(validator.has_rule("url"));
    assert!(validator.has_rule("passwordLength"));
    assert!(!validator.has_rule("confirm"));

    let result = validator
        .validate(
            "email",
            &json!("not-an-email"),
            &rules(&[("email", json!(true)), ("passwordLength", json!(20))]),
        )
        .unwrap();
    assert!(!result.is_valid);
    assert_eq!(result.rules["email"].key, "EmailAddressValidator");
    assert_eq!(
        result.rules["email"].message.as_deref(),
        Some("email doit être une adresse courriel valide.")
    );
    assert_eq!(
        result.rules["passwordLength"].message.as_deref(),
        Some("email must be at least 20 character(s) long.")
    );
}

#[test]
fn validator_from_config_rejects_unknown_rules() {
    let config = parse_config("[rules.mail]\n").unwrap();
    let err = Validator::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("Unknown built-in rule 'mail'"));
}

#[test]
fn empty_value_fails_minimum_value() {
    let mut validator = Validator::default();
    validator.set_rule("minimumValue", builtin::minimum_value);

    let result = validator
        .validate("age", &Value::Null, &rules(&[("minimumValue", json!(5))]))
        .unwrap();
    assert!(!result.is_valid);
    assert_eq!(result.rules["minimumValue"].severity, Severity::Error);
    assert_eq!(
        result.rules["minimumValue"].message.as_deref(),
        Some("age must be at least 5.")
    );
}
