//! Email format validator

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

// Alphanumeric at both ends of each part, TLD of two or more letters
const EMAIL_PATTERN: &str = concat!(
    r"^[a-zA-Z0-9]([a-zA-Z0-9._%+-]*[a-zA-Z0-9])?",
    r"@[a-zA-Z0-9]([a-zA-Z0-9.-]*[a-zA-Z0-9])?\.[a-zA-Z]{2,}$",
);

fn email_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// Validator for email address format (`local@domain.tld`)
#[derive(Debug, Clone, Default)]
pub struct EmailValidator {
    /// Custom error message
    pub message: Option<String>,
}

impl EmailValidator {
    /// Create a new email validator with the default message
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn validate_email_format(&self, email: &str) -> bool {
        let Some((local_part, domain_part)) = email.split_once('@') else {
            return false;
        };

        if local_part.is_empty() || domain_part.is_empty() || domain_part.contains('@') {
            return false;
        }

        if local_part.contains("..") || domain_part.contains("..") {
            return false;
        }

        // RFC 5321 limits
        if local_part.len() > 64 || domain_part.len() > 255 {
            return false;
        }

        email_regex().is_match(email)
    }
}

impl ValidationRule for EmailValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if value.is_null() {
            return Ok(());
        }

        let email = match value.as_str() {
            Some(email) => email,
            None => {
                return Err(ValidationError::with_code(
                    field,
                    format!("{} must be a string for email validation", field),
                    "invalid_type",
                )
                .into());
            }
        };

        if !self.validate_email_format(email) {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| format!("{} must be a valid email address", field));

            return Err(ValidationError::with_code(field, message, "invalid_email").into());
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "email"
    }

    fn parameters(&self) -> Option<Value> {
        self.message.as_ref().map(|msg| {
            serde_json::json!({
                "message": msg
            })
        })
    }
}
