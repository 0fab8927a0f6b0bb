//! Custom validation functions and closures

use crate::error::ValidationResult;
use crate::traits::ValidationRule;
use serde_json::Value;
use std::sync::Arc;

/// Type alias for validation functions
pub type SyncValidationFn = Arc<dyn Fn(&Value, &str) -> ValidationResult<()> + Send + Sync>;

/// Custom validator that wraps a user-defined validation function
#[derive(Clone)]
pub struct CustomValidator {
    /// Name/identifier for this custom validator
    pub name: String,
    validator: SyncValidationFn,
    /// Replaces every message the function produces
    pub message: Option<String>,
}

impl CustomValidator {
    /// Create a new custom validator
    pub fn new<F>(name: impl Into<String>, validator: F) -> Self
    where
        F: Fn(&Value, &str) -> ValidationResult<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            validator: Arc::new(validator),
            message: None,
        }
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Get the validator name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomValidator")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish()
    }
}

impl ValidationRule for CustomValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if value.is_null() {
            return Ok(());
        }

        match ((self.validator)(value, field), &self.message) {
            (Err(mut errors), Some(custom_message)) => {
                for field_errors in errors.errors.values_mut() {
                    for error in field_errors {
                        error.message = custom_message.clone();
                    }
                }
                Err(errors)
            }
            (result, _) => result,
        }
    }

    fn rule_name(&self) -> &'static str {
        "custom"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        params.insert("name".to_string(), Value::String(self.name.clone()));

        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        Some(Value::Object(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn no_spaces() -> CustomValidator {
        CustomValidator::new("no_spaces", |value, field| match value.as_str() {
            Some(s) if s.contains(' ') => {
                Err(ValidationError::new(field, "Must not contain spaces").into())
            }
            _ => Ok(()),
        })
    }

    #[test]
    fn test_custom_validator() {
        let validator = no_spaces();

        assert!(validator.validate(&Value::String("joe".into()), "username").is_ok());
        let errors = validator
            .validate(&Value::String("j oe".into()), "username")
            .unwrap_err();
        assert_eq!(errors.first_message("username"), Some("Must not contain spaces"));
    }

    #[test]
    fn test_custom_validator_with_custom_message() {
        let validator = no_spaces().message("Spaces are not allowed");

        let errors = validator
            .validate(&Value::String("j oe".into()), "username")
            .unwrap_err();
        assert_eq!(errors.first_message("username"), Some("Spaces are not allowed"));
    }

    #[test]
    fn test_custom_validator_skips_null() {
        let validator = CustomValidator::new("always_fail", |_value, field| {
            Err(ValidationError::new(field, "Always fails").into())
        });
        assert!(validator.validate(&Value::Null, "field").is_ok());
        assert_eq!(validator.parameters().unwrap()["name"], "always_fail");
    }
}
