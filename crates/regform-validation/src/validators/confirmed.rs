//! Cross-field equality ("confirm password") validator

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use serde_json::Value;

/// Request-level rule: `confirmation` must equal `field` exactly.
///
/// Only runs when both values are present strings; a missing value is the
/// presence rule's concern. A mismatch is reported on `confirmation` only.
#[derive(Debug, Clone)]
pub struct ConfirmedValidator {
    pub field: String,
    pub confirmation: String,
    pub message: Option<String>,
}

impl ConfirmedValidator {
    pub fn new(field: impl Into<String>, confirmation: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            confirmation: confirmation.into(),
            message: None,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ValidationRule for ConfirmedValidator {
    fn validate(&self, value: &Value, _field: &str) -> ValidationResult<()> {
        let Some(data) = value.as_object() else {
            return Ok(());
        };

        let original = data.get(&self.field).and_then(Value::as_str);
        let confirmation = data.get(&self.confirmation).and_then(Value::as_str);

        match (original, confirmation) {
            (Some(original), Some(confirmation)) if original != confirmation => {
                let message = self
                    .message
                    .clone()
                    .unwrap_or_else(|| {
                        format!("{} does not match {}", self.confirmation, self.field)
                    });
                Err(
                    ValidationError::with_code(&self.confirmation, message, "confirmation_mismatch")
                        .into(),
                )
            }
            _ => Ok(()),
        }
    }

    fn rule_name(&self) -> &'static str {
        "confirmed"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "field": self.field,
            "confirmation": self.confirmation,
        }))
    }
}
