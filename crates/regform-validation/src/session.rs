//! Form session: the input being edited, the errors currently shown, and
//! whether the form has been submitted.

use crate::error::ValidationErrors;
use crate::input::FormInput;
use crate::schemas::FormSchema;
use thiserror::Error;

/// When the error map is recomputed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// After every field change and on submit
    #[default]
    Live,
    /// Only on submit; edits leave the shown errors untouched
    OnSubmit,
}

/// Presentation state of a session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState<D> {
    Editing,
    /// Read-only summary of the accepted data
    Submitted(D),
}

/// Events a form front-end feeds into a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    InputChanged { field: String, value: String },
    Submit,
    Reset,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unknown field '{field}' for form '{form}'")]
    UnknownField { form: &'static str, field: String },

    #[error("Form '{form}' has already been submitted; reset it before editing")]
    AlreadySubmitted { form: &'static str },
}

pub struct FormSession<S: FormSchema> {
    schema: S,
    mode: ValidationMode,
    input: FormInput,
    errors: ValidationErrors,
    state: SessionState<S::Data>,
}

impl<S: FormSchema> FormSession<S> {
    /// Session in live mode
    pub fn new(schema: S) -> Self {
        Self::with_mode(schema, ValidationMode::Live)
    }

    pub fn with_mode(schema: S, mode: ValidationMode) -> Self {
        Self {
            schema,
            mode,
            input: FormInput::new(),
            errors: ValidationErrors::new(),
            state: SessionState::Editing,
        }
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    /// Errors currently shown
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn state(&self) -> &SessionState<S::Data> {
        &self.state
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.state, SessionState::Submitted(_))
    }

    pub fn submitted_data(&self) -> Option<&S::Data> {
        match &self.state {
            SessionState::Submitted(data) => Some(data),
            SessionState::Editing => None,
        }
    }

    /// The inline error for a field: its first message, if any
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        self.errors.first_message(field)
    }

    /// Whether the current input would be accepted on submit
    pub fn is_form_valid(&self) -> bool {
        self.schema.is_valid(&self.input)
    }

    /// Store a field value; in live mode the whole form is re-validated
    pub fn set_field(
        &mut self,
        field: &str,
        value: impl Into<String>,
    ) -> Result<&ValidationErrors, SessionError> {
        self.edit(field, Some(value.into()))
    }

    /// Make a field absent again, as if it was never entered
    pub fn clear_field(&mut self, field: &str) -> Result<&ValidationErrors, SessionError> {
        self.edit(field, None)
    }

    fn edit(
        &mut self,
        field: &str,
        value: Option<String>,
    ) -> Result<&ValidationErrors, SessionError> {
        let form = self.schema.name();

        if self.is_submitted() {
            tracing::warn!(form, field, "edit rejected: form already submitted");
            return Err(SessionError::AlreadySubmitted { form });
        }
        if self.schema.field(field).is_none() {
            tracing::warn!(form, field, "edit rejected: unknown field");
            return Err(SessionError::UnknownField {
                form,
                field: field.to_string(),
            });
        }

        match value {
            Some(value) => {
                self.input.set(field, value);
            }
            None => {
                self.input.remove(field);
            }
        }

        if self.mode == ValidationMode::Live {
            self.errors = match self.schema.validate(&self.input) {
                Ok(_) => ValidationErrors::new(),
                Err(errors) => errors,
            };
        }

        Ok(&self.errors)
    }

    /// Validate once more; on success the session moves to `Submitted`.
    ///
    /// Submitting an already submitted session returns the same data.
    pub fn submit(&mut self) -> Result<&S::Data, &ValidationErrors> {
        if let SessionState::Editing = self.state {
            match self.schema.validate(&self.input) {
                Ok(data) => {
                    tracing::info!(form = self.schema.name(), "form submitted");
                    self.errors = ValidationErrors::new();
                    self.state = SessionState::Submitted(data);
                }
                Err(errors) => {
                    tracing::debug!(
                        form = self.schema.name(),
                        failing_fields = errors.len(),
                        "submit rejected"
                    );
                    self.errors = errors;
                }
            }
        }

        match &self.state {
            SessionState::Submitted(data) => Ok(data),
            SessionState::Editing => Err(&self.errors),
        }
    }

    /// Back to an empty form
    pub fn reset(&mut self) {
        tracing::info!(form = self.schema.name(), "form reset");
        self.input.clear();
        self.errors = ValidationErrors::new();
        self.state = SessionState::Editing;
    }

    /// Apply one front-end event
    pub fn handle(&mut self, event: FormEvent) -> Result<&SessionState<S::Data>, SessionError> {
        match event {
            FormEvent::InputChanged { field, value } => {
                self.set_field(&field, value)?;
            }
            FormEvent::Submit => {
                // A failed submit leaves its errors in `self.errors`
                let _ = self.submit();
            }
            FormEvent::Reset => self.reset(),
        }
        Ok(&self.state)
    }
}

impl<S> std::fmt::Debug for FormSession<S>
where
    S: FormSchema,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSession")
            .field("form", &self.schema.name())
            .field("mode", &self.mode)
            .field("input", &self.input)
            .field("errors", &self.errors)
            .field("state", &self.state)
            .finish()
    }
}
