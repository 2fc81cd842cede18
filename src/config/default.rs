// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

use super::schema::ValidatorConfig;

/// Get the default configuration.
pub fn default_config() -> ValidatorConfig {
    ValidatorConfig::default()
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# valkit configuration file
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

# Return the validation result as an error when validation fails
throw_on_failure = false

# Count warnings (e.g. invalid rule arguments) as failures
treat_warnings_as_errors = true

# Message formatter: "default" or "handlebars"
formatter = "default"

# Register every built-in rule under its own key
include_builtin = true

# Override the key and message of a built-in rule
[rules.email]
key = "EmailAddressValidator"
message = "{{name}} must be a valid email address."

# Register a built-in rule under another key
[rules.passwordLength]
rule = "minimumLength"
message = "{{name}} must be at least {{passwordLength}} characters long."

# Extra placeholders available to messages
[rules.required.placeholders]
locale = "en"

# Remove a built-in rule
[rules.confirm]
enabled = false
"#
}
