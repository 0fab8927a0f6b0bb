//! Length-based validators for strings

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use serde_json::Value;

/// Validator for string length constraints, counted in characters
#[derive(Debug, Clone, Default)]
pub struct LengthValidator {
    /// Minimum length (inclusive)
    pub min: Option<usize>,
    /// Maximum length (inclusive)
    pub max: Option<usize>,
    /// Exact length required
    pub exact: Option<usize>,
    /// Custom error message
    pub message: Option<String>,
}

impl LengthValidator {
    /// Create a new length validator with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum length constraint
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Set maximum length constraint
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Set exact length requirement
    pub fn exact(mut self, exact: usize) -> Self {
        self.exact = Some(exact);
        self
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn create_error_message(&self, field: &str) -> String {
        if let Some(ref custom_message) = self.message {
            return custom_message.clone();
        }

        if let Some(exact) = self.exact {
            return format!("{} must be exactly {} characters long", field, exact);
        }

        match (self.min, self.max) {
            (Some(min), Some(max)) => {
                format!("{} must be between {} and {} characters long", field, min, max)
            }
            (Some(min), None) => format!("{} must be at least {} characters long", field, min),
            (None, Some(max)) => format!("{} must be at most {} characters long", field, max),
            (None, None) => format!("{} has invalid length", field),
        }
    }

    fn fail(&self, field: &str, code: &str) -> ValidationResult<()> {
        Err(ValidationError::with_code(field, self.create_error_message(field), code).into())
    }
}

impl ValidationRule for LengthValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        // Null is a presence question, not a length one
        if value.is_null() {
            return Ok(());
        }

        let length = match value.as_str() {
            Some(s) => s.chars().count(),
            None => {
                return Err(ValidationError::with_code(
                    field,
                    format!("{} must be a string for length validation", field),
                    "invalid_type",
                )
                .into());
            }
        };

        if let Some(exact) = self.exact {
            return if length != exact {
                self.fail(field, "length_exact")
            } else {
                Ok(())
            };
        }

        if self.min.is_some_and(|min| length < min) {
            return self.fail(field, "length_min");
        }

        if self.max.is_some_and(|max| length > max) {
            return self.fail(field, "length_max");
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "length"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        if let Some(min) = self.min {
            params.insert("min".to_string(), Value::from(min));
        }
        if let Some(max) = self.max {
            params.insert("max".to_string(), Value::from(max));
        }
        if let Some(exact) = self.exact {
            params.insert("exact".to_string(), Value::from(exact));
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
