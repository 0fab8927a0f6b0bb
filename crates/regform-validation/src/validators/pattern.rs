//! Pattern-based validators using regular expressions

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use regex::Regex;
use serde_json::Value;

/// Validator for regular expression patterns
#[derive(Debug, Clone)]
pub struct PatternValidator {
    pattern: Regex,
    /// Custom error message
    pub message: Option<String>,
    /// Whether the whole string must match (default) or any substring may
    pub full_match: bool,
}

impl PatternValidator {
    /// Create a new pattern validator
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::from_regex(Regex::new(pattern)?))
    }

    /// Create a validator from an existing Regex
    pub fn from_regex(regex: Regex) -> Self {
        Self {
            pattern: regex,
            message: None,
            full_match: true,
        }
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set whether to match the full string or just find a match
    pub fn full_match(mut self, full_match: bool) -> Self {
        self.full_match = full_match;
        self
    }

    /// Get the pattern string
    pub fn pattern_string(&self) -> &str {
        self.pattern.as_str()
    }

    fn validate_pattern(&self, text: &str) -> bool {
        if self.full_match {
            self.pattern
                .find(text)
                .is_some_and(|m| m.start() == 0 && m.end() == text.len())
        } else {
            self.pattern.is_match(text)
        }
    }
}

impl ValidationRule for PatternValidator {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if value.is_null() {
            return Ok(());
        }

        let text = match value.as_str() {
            Some(text) => text,
            None => {
                return Err(ValidationError::with_code(
                    field,
                    format!("{} must be a string for pattern validation", field),
                    "invalid_type",
                )
                .into());
            }
        };

        if !self.validate_pattern(text) {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| format!("{} does not match the required pattern", field));

            return Err(ValidationError::with_code(field, message, "pattern_mismatch").into());
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "pattern"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        params.insert(
            "pattern".to_string(),
            Value::String(self.pattern.as_str().to_string()),
        );
        params.insert("full_match".to_string(), Value::Bool(self.full_match));

        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        Some(Value::Object(params))
    }
}

/// Common pattern validators
impl PatternValidator {
    /// Exactly `count` ASCII digits
    pub fn digits(count: usize) -> Self {
        Self::new(&format!("^[0-9]{{{}}}$", count))
            .expect("digit pattern is always valid")
            .message(format!("Must be exactly {} digits", count))
    }

    /// Letters, digits and underscores only
    pub fn word_characters() -> Self {
        Self::new(r"^[A-Za-z0-9_]+$")
            .expect("word pattern is always valid")
            .message("Must contain only letters, numbers and underscores")
    }

    /// At least one character from `set` somewhere in the string
    pub fn contains_any(set: &str) -> Self {
        let class: String = set.chars().map(|c| regex::escape(&c.to_string())).collect();
        Self::new(&format!("[{}]", class))
            .expect("escaped character class is always valid")
            .full_match(false)
            .message(format!("Must contain at least one of: {}", set))
    }

    /// At least one uppercase ASCII letter
    pub fn has_uppercase() -> Self {
        Self::contains_any("ABCDEFGHIJKLMNOPQRSTUVWXYZ")
            .message("Must contain at least one uppercase letter")
    }

    /// At least one lowercase ASCII letter
    pub fn has_lowercase() -> Self {
        Self::contains_any("abcdefghijklmnopqrstuvwxyz")
            .message("Must contain at least one lowercase letter")
    }

    /// At least one ASCII digit
    pub fn has_digit() -> Self {
        Self::contains_any("0123456789").message("Must contain at least one number")
    }
}
