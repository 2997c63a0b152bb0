//! Environment variable expansion for site option strings.
//!
//! Only the braced forms are recognized:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! A reference ends at the first `}`, so defaults are literal text and
//! cannot hold another reference: `${A:-${B}}` is rejected.

use crate::ConfigError;

/// Expand environment variable references in a configuration value.
///
/// Returns the original string unchanged if no `${` appears in it, so bare
/// `$path` segments in URLs pass through untouched.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    if let Some(inner) = braced_refs(value).find(|inner| inner.contains("${")) {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("nested reference in '${{{inner}}}' is not supported"),
        });
    }

    if let Some(name) = first_unset_var(value) {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{name}}} not set"),
        });
    }

    Ok(shellexpand::env_with_context_no_errors(value, |var| std::env::var(var).ok()).into_owned())
}

/// Text between each `${` and the first `}` after it.
fn braced_refs(value: &str) -> impl Iterator<Item = &str> {
    let mut rest = value;
    std::iter::from_fn(move || {
        let start = rest.find("${")?;
        let after = &rest[start + 2..];
        let end = after.find('}')?;
        rest = &after[end + 1..];
        Some(&after[..end])
    })
}

/// First `${VAR}` reference without a `:-` default whose variable is unset.
fn first_unset_var(value: &str) -> Option<&str> {
    braced_refs(value).find(|inner| !inner.contains(":-") && std::env::var_os(inner).is_none())
}

/// Expand an optional field in place.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(raw) = value.as_deref() {
        *value = Some(expand_env(raw, field)?);
    }
    Ok(())
}
