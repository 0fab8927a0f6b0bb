//! Form schemas: a closed field set, its rules, and the typed data a
//! successful validation produces.

pub mod minimal;
pub mod registration;

pub use minimal::{MinimalSignup, MinimalSignupForm};
pub use registration::{Registration, RegistrationForm};

use crate::error::{ValidationError, ValidationErrors, ValidationResult};
use crate::input::FormInput;
use crate::rules::{Presence, Rules};
use crate::traits::Validate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Kind of input control a field is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Date,
}

/// Rendering metadata for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }
}

/// A form variant
pub trait FormSchema: Send + Sync {
    /// Validated, coerced form data
    type Data: Serialize + DeserializeOwned + Clone + fmt::Debug + PartialEq;

    /// Short identifier, e.g. `"registration"`
    fn name(&self) -> &'static str;

    /// Fields in display order
    fn fields(&self) -> &'static [FieldDescriptor];

    fn rules(&self) -> &Rules;

    fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields().iter().find(|f| f.name == name)
    }

    fn presence(&self, name: &str) -> Option<Presence> {
        self.rules().get_field_rules(name).map(|spec| spec.presence())
    }

    /// Run every field rule and every cross-field rule over `input`.
    ///
    /// Returns the typed data when nothing fails, otherwise all collected
    /// errors keyed by field.
    fn validate(&self, input: &FormInput) -> ValidationResult<Self::Data> {
        let rules = self.rules();

        if let Err(errors) = rules.validate(input) {
            tracing::debug!(
                form = self.name(),
                failing_fields = errors.len(),
                total_errors = errors.total_errors(),
                "validation failed"
            );
            return Err(errors);
        }

        let cleaned = rules.clean(input);
        serde_json::from_value(Value::Object(cleaned.to_json_object())).map_err(|e| {
            tracing::error!(
                form = self.name(),
                error = %e,
                "validated input does not fit form data"
            );
            ValidationErrors::from_error(ValidationError::with_code(
                self.name(),
                e.to_string(),
                "invalid_data",
            ))
        })
    }

    fn is_valid(&self, input: &FormInput) -> bool {
        self.validate(input).is_ok()
    }
}

/// Field-keyed view of validated data, same shape as the input it came from
pub fn to_input<D: Serialize>(data: &D) -> FormInput {
    match serde_json::to_value(data) {
        Ok(Value::Object(map)) => map
            .into_iter()
            .filter_map(|(k, v)| match v {
                Value::String(s) => Some((k, s)),
                _ => None,
            })
            .collect(),
        _ => FormInput::new(),
    }
}
