//! Validation rules builder and composition system

use crate::error::{ValidationError, ValidationErrors, ValidationResult};
use crate::input::FormInput;
use crate::traits::{ValidateField, ValidateRequest, ValidationRule};
use crate::validators::*;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// How a field behaves when it has no value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// Absent is an error; its other rules are skipped
    Required,
    /// Absent skips the field's rules; an empty string is still checked
    Optional,
    /// Absent or empty skips the field's rules and the field is dropped from
    /// the validated data
    BlankAsMissing,
}

/// Ordered rules for one field
#[derive(Clone)]
pub struct FieldRules {
    presence: Presence,
    missing_message: Option<String>,
    rules: Vec<Arc<dyn ValidationRule>>,
}

impl FieldRules {
    fn new() -> Self {
        Self {
            presence: Presence::Required,
            missing_message: None,
            rules: Vec::new(),
        }
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn rules(&self) -> &[Arc<dyn ValidationRule>] {
        &self.rules
    }

    /// Treats blank values as absent for `BlankAsMissing` fields
    fn effective<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        match value {
            Value::Null => None,
            Value::String(s) if s.is_empty() && self.presence == Presence::BlankAsMissing => None,
            other => Some(other),
        }
    }
}

impl std::fmt::Debug for FieldRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRules")
            .field("presence", &self.presence)
            .field(
                "rules",
                &self.rules.iter().map(|r| r.rule_name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Collection of validation rules for a closed set of fields
#[derive(Clone, Default)]
pub struct Rules {
    /// Field-level validation rules
    field_rules: BTreeMap<String, FieldRules>,
    /// Request-level validation rules, run after all field rules
    request_rules: Vec<Arc<dyn ValidationRule>>,
}

impl std::fmt::Debug for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rules")
            .field("field_rules", &self.field_rules)
            .field("request_rules_count", &self.request_rules.len())
            .finish()
    }
}

impl Rules {
    /// Create a new empty rules collection
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, field: impl Into<String>) -> &mut FieldRules {
        self.field_rules
            .entry(field.into())
            .or_insert_with(FieldRules::new)
    }

    /// Add a validation rule for a field. Fields are required unless marked
    /// otherwise.
    pub fn field<R>(mut self, field: impl Into<String>, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.entry(field).rules.push(Arc::new(rule));
        self
    }

    /// Declare a field's presence behavior
    pub fn presence(mut self, field: impl Into<String>, presence: Presence) -> Self {
        self.entry(field).presence = presence;
        self
    }

    /// Message used when a required field is absent
    pub fn missing_message(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.entry(field).missing_message = Some(message.into());
        self
    }

    /// Add a request-level validation rule (cross-field validation)
    pub fn request<R>(mut self, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.request_rules.push(Arc::new(rule));
        self
    }

    /// Get rules for a specific field
    pub fn get_field_rules(&self, field: &str) -> Option<&FieldRules> {
        self.field_rules.get(field)
    }

    /// Get all request-level rules
    pub fn get_request_rules(&self) -> &[Arc<dyn ValidationRule>] {
        &self.request_rules
    }

    pub fn is_empty(&self) -> bool {
        self.field_rules.is_empty() && self.request_rules.is_empty()
    }

    pub fn field_rule_count(&self) -> usize {
        self.field_rules.len()
    }

    pub fn request_rule_count(&self) -> usize {
        self.request_rules.len()
    }

    /// Get all field names that have validation rules
    pub fn get_validated_fields(&self) -> Vec<&str> {
        self.field_rules.keys().map(String::as_str).collect()
    }

    /// Declared fields only, with blank `BlankAsMissing` values removed
    pub fn clean(&self, data: &FormInput) -> FormInput {
        self.field_rules
            .iter()
            .filter_map(|(field, spec)| {
                let value = data.get(field)?;
                match spec.presence {
                    Presence::BlankAsMissing if value.is_empty() => None,
                    _ => Some((field.clone(), value.to_string())),
                }
            })
            .collect()
    }
}

impl ValidateField for Rules {
    fn validate_field(&self, field: &str, value: &Value) -> ValidationResult<()> {
        // Undeclared fields are ignored
        let Some(spec) = self.field_rules.get(field) else {
            return Ok(());
        };

        let Some(value) = spec.effective(value) else {
            return match spec.presence {
                Presence::Required => {
                    let message = spec
                        .missing_message
                        .clone()
                        .unwrap_or_else(|| format!("{} is required", field));
                    Err(ValidationError::with_code(field, message, "required").into())
                }
                Presence::Optional | Presence::BlankAsMissing => Ok(()),
            };
        };

        let mut errors = ValidationErrors::new();
        for rule in &spec.rules {
            if let Err(rule_errors) = rule.validate(value, field) {
                errors.merge(rule_errors);
            }
        }
        errors.into_result()
    }

    fn declared_fields(&self) -> Vec<&str> {
        self.get_validated_fields()
    }
}

impl ValidateRequest for Rules {
    fn validate_request(&self, data: &FormInput) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();
        let data_value = Value::Object(data.to_json_object());

        for rule in &self.request_rules {
            if let Err(rule_errors) = rule.validate(&data_value, "request") {
                errors.merge(rule_errors);
            }
        }

        errors.into_result()
    }
}

/// Builder for common validation rule combinations
#[derive(Debug, Default)]
pub struct RulesBuilder {
    rules: Rules,
}

impl RulesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and return the rules
    pub fn build(self) -> Rules {
        self.rules
    }

    fn length(min_length: Option<usize>, max_length: Option<usize>) -> Option<LengthValidator> {
        if min_length.is_none() && max_length.is_none() {
            return None;
        }
        let mut validator = LengthValidator::new();
        if let Some(min) = min_length {
            validator = validator.min(min);
        }
        if let Some(max) = max_length {
            validator = validator.max(max);
        }
        Some(validator)
    }

    /// Required, non-blank string with optional length bounds
    pub fn required_string(
        mut self,
        field: impl Into<String>,
        min_length: Option<usize>,
        max_length: Option<usize>,
    ) -> Self {
        let field = field.into();
        self.rules = self.rules.field(field.clone(), RequiredValidator::new());
        if let Some(length) = Self::length(min_length, max_length) {
            self.rules = self.rules.field(field, length);
        }
        self
    }

    /// String that may be absent, with optional length bounds when present
    pub fn optional_string(
        mut self,
        field: impl Into<String>,
        min_length: Option<usize>,
        max_length: Option<usize>,
    ) -> Self {
        let field = field.into();
        self.rules = self.rules.presence(field.clone(), Presence::Optional);
        if let Some(length) = Self::length(min_length, max_length) {
            self.rules = self.rules.field(field, length);
        }
        self
    }

    /// Required email address
    pub fn required_email(mut self, field: impl Into<String>) -> Self {
        self.rules = self.rules.field(field, EmailValidator::new());
        self
    }

    /// Add a custom field rule
    pub fn custom<R>(mut self, field: impl Into<String>, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.rules = self.rules.field(field, rule);
        self
    }

    /// Add a request-level validation rule
    pub fn request_rule<R>(mut self, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.rules = self.rules.request(rule);
        self
    }
}
