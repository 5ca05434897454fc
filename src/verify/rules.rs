//! Validation rules for package and target names.
//!
//! Pure functions with no I/O or side effects.

use crate::error::{Result, TemplateError};
use regex::Regex;

const MAX_PACKAGE_NAME_LENGTH: usize = 64;

/// Validates a package name used for directories, files and module names.
///
/// ## Rules
/// - 1-64 ASCII characters
/// - Starts with letter or `_`
/// - Contains only `[a-zA-Z0-9_-]`
///
/// ## Warnings (non-fatal)
/// - Contains `-` (not a valid Swift module identifier)
pub fn validate_package_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(TemplateError::InvalidName(
            name.to_string(),
            "cannot be empty".to_string(),
        ));
    }

    if name.len() > MAX_PACKAGE_NAME_LENGTH {
        return Err(TemplateError::InvalidName(
            name.to_string(),
            format!(
                "exceeds {} chars (has {})",
                MAX_PACKAGE_NAME_LENGTH,
                name.len()
            ),
        ));
    }

    let pattern = Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$")?;
    if !pattern.is_match(name) {
        return Err(TemplateError::InvalidName(
            name.to_string(),
            describe_violation(name),
        ));
    }

    if name.contains('-') {
        log::warn!(
            "'{}' contains '-', which is not valid in a Swift module name",
            name
        );
    }

    Ok(())
}

fn describe_violation(name: &str) -> String {
    let mut chars = name.chars().enumerate();

    if let Some((_, first)) = chars.next() {
        if !first.is_ascii_alphabetic() && first != '_' {
            return "must start with letter or underscore".to_string();
        }
    }

    for (idx, ch) in chars {
        if !ch.is_ascii() {
            return format!("non-ASCII character '{}' at position {}", ch, idx);
        }
        if !ch.is_ascii_alphanumeric() && ch != '_' && ch != '-' {
            return format!("invalid character '{}' at position {}", ch, idx);
        }
    }

    "invalid name".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_package_name("Widget").is_ok());
        assert!(validate_package_name("_Private").is_ok());
        assert!(validate_package_name("swift-widget").is_ok());
        assert!(validate_package_name("Widget2").is_ok());
    }

    #[test]
    fn test_invalid_first_character() {
        let err = validate_package_name("2Widget").unwrap_err();
        assert!(err.to_string().contains("must start with letter"));

        assert!(validate_package_name("-widget").is_err());
        assert!(validate_package_name(".").is_err());
        assert!(validate_package_name("..").is_err());
    }

    #[test]
    fn test_invalid_characters() {
        let err = validate_package_name("My Widget").unwrap_err();
        assert!(err.to_string().contains("invalid character ' ' at position 2"));

        assert!(validate_package_name("a/b").is_err());
        assert!(validate_package_name("Widgé").is_err());
    }

    #[test]
    fn test_length_limits() {
        assert!(validate_package_name("").is_err());
        assert!(validate_package_name(&"a".repeat(64)).is_ok());
        assert!(validate_package_name(&"a".repeat(65)).is_err());
    }
}
