//! Minimum age validator for birthdate fields

use crate::clock::{age_on, parse_date, SharedClock, SystemClock};
use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use serde_json::Value;
use std::sync::Arc;

/// Parses a `YYYY-MM-DD` birthdate and checks the age it implies today
#[derive(Debug, Clone)]
pub struct AgeValidator {
    /// Minimum age in whole years (inclusive)
    pub min_age: i32,
    clock: SharedClock,
    /// Message when the age is below `min_age`
    pub message: Option<String>,
    /// Message when the value is not a calendar date
    pub date_message: Option<String>,
}

impl AgeValidator {
    /// Validator using the system clock
    pub fn new(min_age: i32) -> Self {
        Self {
            min_age,
            clock: Arc::new(SystemClock),
            message: None,
            date_message: None,
        }
    }

    /// Use a different source for today's date
    pub fn clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn date_message(mut self, message: impl Into<String>) -> Self {
        self.date_message = Some(message.into());
        self
    }
}

impl ValidationRule for AgeValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if value.is_null() {
            return Ok(());
        }

        let Some(text) = value.as_str() else {
            return Err(ValidationError::with_code(
                field,
                format!("{} must be a string for date validation", field),
                "invalid_type",
            )
            .into());
        };

        let birth = match parse_date(text) {
            Ok(date) => date,
            Err(_) => {
                let message = self
                    .date_message
                    .clone()
                    .unwrap_or_else(|| format!("{} must be a valid date (YYYY-MM-DD)", field));
                return Err(ValidationError::with_code(field, message, "invalid_date").into());
            }
        };

        let today = self.clock.today();
        let age = age_on(birth, today);
        if age < self.min_age {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| format!("You must be at least {} years old", self.min_age));
            return Err(ValidationError::with_code(field, message, "too_young")
                .context(serde_json::json!({
                    "age": age,
                    "min_age": self.min_age,
                    "today": today.to_string(),
                }))
                .into());
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "age"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "min_age": self.min_age,
            "format": "YYYY-MM-DD",
        }))
    }
}
