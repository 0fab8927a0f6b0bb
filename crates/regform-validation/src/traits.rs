//! Core validation traits

use crate::error::{ValidationErrors, ValidationResult};
use crate::input::FormInput;
use serde_json::Value;

/// A single rule over one value. All built-in validators implement this.
pub trait ValidationRule: Send + Sync {
    /// Validate a single value
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()>;

    /// Get the validation rule name/type
    fn rule_name(&self) -> &'static str;

    /// Get validation rule parameters/configuration as JSON
    fn parameters(&self) -> Option<Value> {
        None
    }
}

/// Trait for validating individual fields
pub trait ValidateField: Send + Sync {
    /// Validate a single field value
    fn validate_field(&self, field: &str, value: &Value) -> ValidationResult<()>;

    /// Fields this validator knows about
    fn declared_fields(&self) -> Vec<&str>;
}

/// Trait for validating the whole input (cross-field rules)
pub trait ValidateRequest: Send + Sync {
    /// Validate the entire input
    fn validate_request(&self, data: &FormInput) -> ValidationResult<()>;
}

/// Main validation trait that combines field and request validation
pub trait Validate: ValidateField + ValidateRequest + Send + Sync {
    /// Validate every declared field, then the cross-field rules
    fn validate(&self, data: &FormInput) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();

        for field in self.declared_fields() {
            if let Err(field_errors) = self.validate_field(field, &data.value(field)) {
                errors.merge(field_errors);
            }
        }

        if let Err(request_errors) = self.validate_request(data) {
            errors.merge(request_errors);
        }

        errors.into_result()
    }
}

impl<T> Validate for T where T: ValidateField + ValidateRequest + Send + Sync {}
