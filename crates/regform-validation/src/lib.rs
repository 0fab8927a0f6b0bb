//! # regform-validation
//!
//! Declarative validation for registration forms. Each field carries an
//! ordered list of rules, every failing rule contributes its own message, and
//! cross-field rules run after the field rules.
//!
//! Two form variants ship with the crate: [`MinimalSignupForm`] and
//! [`RegistrationForm`]. A [`FormSession`] drives either one through live or
//! submit-only validation.

pub mod clock;
pub mod error;
pub mod input;
pub mod rules;
pub mod schemas;
pub mod session;
pub mod traits;
pub mod validators;

// Re-exports for easy access
pub use clock::{Clock, ClockError, FixedClock, SharedClock, SystemClock};
pub use error::{ValidationError, ValidationErrors, ValidationResult};
pub use input::FormInput;
pub use rules::{FieldRules, Presence, Rules, RulesBuilder};
pub use schemas::{
    FieldDescriptor, FieldKind, FormSchema, MinimalSignup, MinimalSignupForm, Registration,
    RegistrationForm,
};
pub use session::{FormEvent, FormSession, SessionError, SessionState, ValidationMode};
pub use traits::{Validate, ValidateField, ValidateRequest, ValidationRule};

// Built-in validators
pub use validators::{
    AgeValidator, ConfirmedValidator, CustomValidator, EmailValidator, LengthValidator,
    PatternValidator, RequiredValidator,
};
