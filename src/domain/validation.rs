//! Validation - Form Field Rules

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern")
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[1-9]\d{6,15}$").expect("valid phone pattern")
});

/// Which rule rejected a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    Required,
    InvalidEmail,
    InvalidPhone,
}

impl ValidationError {
    /// Catalog key of the message shown under the field
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationError::Required => "form.required",
            ValidationError::InvalidEmail => "form.invalid-email",
            ValidationError::InvalidPhone => "form.invalid-phone",
        }
    }
}

/// Result of validating one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidation {
    pub is_valid: bool,
    pub message: String,
}

impl FieldValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Separators (spaces, dashes, dots, parentheses) are ignored
pub fn is_valid_phone(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();
    PHONE_RE.is_match(&compact)
}

/// Check a field value against its type and `required` flag
///
/// Whitespace around the value is ignored. Optional empty fields are valid.
pub fn validate_value(value: &str, field_type: &str, required: bool) -> Result<(), ValidationError> {
    let value = value.trim();

    if value.is_empty() {
        return if required {
            Err(ValidationError::Required)
        } else {
            Ok(())
        };
    }

    match field_type {
        "email" if !is_valid_email(value) => Err(ValidationError::InvalidEmail),
        "tel" if !is_valid_phone(value) => Err(ValidationError::InvalidPhone),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(validate_value("", "text", true), Err(ValidationError::Required));
        assert_eq!(validate_value("   ", "email", true), Err(ValidationError::Required));
        assert_eq!(validate_value("", "email", false), Ok(()));
        assert_eq!(validate_value("Marlin trip", "text", true), Ok(()));
        assert_eq!(validate_value("anything", "textarea", false), Ok(()));
    }

    #[test]
    fn test_email() {
        assert_eq!(validate_value("user@ex", "email", true), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_value("user@example.com", "email", true), Ok(()));
        assert_eq!(validate_value("a b@example.com", "email", false), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_value(" user@example.com ", "email", true), Ok(()));
    }

    #[test]
    fn test_phone() {
        assert_eq!(validate_value("123", "tel", true), Err(ValidationError::InvalidPhone));
        assert_eq!(validate_value("+15551234567", "tel", true), Ok(()));
        assert_eq!(validate_value("+507 6123-4567", "tel", true), Ok(()));
        assert_eq!(validate_value("(555) 123-4567", "tel", true), Ok(()));
        assert_eq!(validate_value("0123456789", "tel", true), Err(ValidationError::InvalidPhone));
        assert_eq!(validate_value("call me", "tel", false), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn test_message_keys() {
        assert_eq!(ValidationError::Required.message_key(), "form.required");
        assert_eq!(ValidationError::InvalidPhone.message_key(), "form.invalid-phone");
    }
}
