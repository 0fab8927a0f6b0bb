//! Required field validator

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use serde_json::Value;

/// Validator that ensures a field is present and not blank
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    /// Custom error message
    pub message: Option<String>,
    /// Whether whitespace-only strings count as empty
    pub trim: bool,
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RequiredValidator {
    /// Create a new required validator with default message
    pub fn new() -> Self {
        Self {
            message: None,
            trim: true,
        }
    }

    /// Create a required validator with custom message
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            trim: true,
        }
    }

    /// Only the empty string fails; `"  "` is accepted
    pub fn non_empty(mut self) -> Self {
        self.trim = false;
        self
    }

    fn is_empty(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) if self.trim => s.trim().is_empty(),
            Value::String(s) => s.is_empty(),
            Value::Array(arr) => arr.is_empty(),
            Value::Object(obj) => obj.is_empty(),
            _ => false,
        }
    }
}

impl ValidationRule for RequiredValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if self.is_empty(value) {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| format!("{} is required", field));

            Err(ValidationError::with_code(field, message, "required").into())
        } else {
            Ok(())
        }
    }

    fn rule_name(&self) -> &'static str {
        "required"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();
        if !self.trim {
            params.insert("trim".to_string(), Value::Bool(false));
        }
        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        if params.is_empty() {
            None
        } else {
            Some(Value::Object(params))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_validator_with_null() {
        let result = RequiredValidator::new().validate(&Value::Null, "email");

        let errors = result.unwrap_err();
        assert_eq!(errors.first_message("email"), Some("email is required"));
    }

    #[test]
    fn test_required_validator_with_empty_and_whitespace() {
        let validator = RequiredValidator::new();
        assert!(validator.validate(&Value::String("".into()), "first_name").is_err());
        assert!(validator.validate(&Value::String("   ".into()), "first_name").is_err());
    }

    #[test]
    fn test_non_empty_accepts_whitespace() {
        let validator = RequiredValidator::with_message("First name is required").non_empty();
        assert!(validator.validate(&Value::String("  ".into()), "first_name").is_ok());

        let errors = validator
            .validate(&Value::String("".into()), "first_name")
            .unwrap_err();
        assert_eq!(errors.first_message("first_name"), Some("First name is required"));
    }

    #[test]
    fn test_required_validator_with_valid_string() {
        let result = RequiredValidator::new().validate(&Value::String("Ada".into()), "first_name");
        assert!(result.is_ok());
    }

    #[test]
    fn test_required_validator_with_custom_message() {
        let validator = RequiredValidator::with_message("First name is required");
        let errors = validator
            .validate(&Value::String("".into()), "first_name")
            .unwrap_err();

        let field_errors = errors.get_field_errors("first_name").unwrap();
        assert_eq!(field_errors[0].message, "First name is required");
        assert_eq!(field_errors[0].code, "required");
    }
}
