//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Supports:
/// - `${VAR}` - expands to the value of VAR, errors if unset
/// - `${VAR:-default}` - expands to VAR if set, otherwise uses default
///
/// Bare `$VAR` syntax is left untouched.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_expansion_needed() {
        let result = expand_env("notes/diagrams", "vault.root").unwrap();
        assert_eq!(result, "notes/diagrams");
    }

    #[test]
    fn test_bare_dollar_untouched() {
        let result = expand_env("$HOME/notes", "vault.root").unwrap();
        assert_eq!(result, "$HOME/notes");
    }

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("PENROSE_TEST_VAR_SIMPLE", "roger");
        }
        let result = expand_env("${PENROSE_TEST_VAR_SIMPLE}", "compiler.command").unwrap();
        assert_eq!(result, "roger");
        unsafe {
            std::env::remove_var("PENROSE_TEST_VAR_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("PENROSE_UNSET_VAR_TEST");
        }
        let result = expand_env("${PENROSE_UNSET_VAR_TEST:-notes}", "vault.root").unwrap();
        assert_eq!(result, "notes");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("PENROSE_MISSING_VAR_TEST");
        }
        let err = expand_env("${PENROSE_MISSING_VAR_TEST}", "compiler.command").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Environment variable error in compiler.command: ${PENROSE_MISSING_VAR_TEST} not set"
        );
    }
}
