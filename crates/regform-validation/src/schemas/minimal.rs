//! Minimal sign-up form: username, email and an optional password

use super::{FieldDescriptor, FieldKind, FormSchema};
use crate::rules::{Presence, Rules};
use crate::validators::{EmailValidator, LengthValidator};
use serde::{Deserialize, Serialize};

pub const USERNAME_MIN_LENGTH: usize = 2;
pub const PASSWORD_MIN_LENGTH: usize = 8;

static FIELDS: [FieldDescriptor; 3] = [
    FieldDescriptor::new("username", "Username", FieldKind::Text),
    FieldDescriptor::new("email", "Email", FieldKind::Email),
    FieldDescriptor::new("password", "Password", FieldKind::Password),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimalSignup {
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MinimalSignupForm {
    rules: Rules,
}

impl MinimalSignupForm {
    pub fn new() -> Self {
        let rules = Rules::new()
            .field(
                "username",
                LengthValidator::new()
                    .min(USERNAME_MIN_LENGTH)
                    .message("Username must be at least 2 characters"),
            )
            .missing_message("username", "Username is required")
            .field(
                "email",
                EmailValidator::new().message("Enter a valid email address"),
            )
            .missing_message("email", "Email is required")
            .field(
                "password",
                LengthValidator::new()
                    .min(PASSWORD_MIN_LENGTH)
                    .message("Password must be at least 8 characters"),
            )
            .presence("password", Presence::Optional);

        Self { rules }
    }
}

impl Default for MinimalSignupForm {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSchema for MinimalSignupForm {
    type Data = MinimalSignup;

    fn name(&self) -> &'static str {
        "minimal"
    }

    fn fields(&self) -> &'static [FieldDescriptor] {
        &FIELDS
    }

    fn rules(&self) -> &Rules {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::FormInput;
    use crate::schemas::to_input;

    fn form() -> MinimalSignupForm {
        MinimalSignupForm::new()
    }

    #[test]
    fn test_valid_without_password() {
        let input = FormInput::new()
            .with("username", "jo")
            .with("email", "jo@example.dk");

        let data = form().validate(&input).unwrap();
        assert_eq!(
            data,
            MinimalSignup {
                username: "jo".into(),
                email: "jo@example.dk".into(),
                password: None,
            }
        );
        assert_eq!(to_input(&data), input);
    }

    #[test]
    fn test_valid_with_password() {
        let input = FormInput::new()
            .with("username", "jo")
            .with("email", "jo@example.dk")
            .with("password", "12345678");

        let data = form().validate(&input).unwrap();
        assert_eq!(data.password.as_deref(), Some("12345678"));
    }

    #[test]
    fn test_each_violation_is_keyed_by_field() {
        let input = FormInput::new()
            .with("username", "j")
            .with("email", "not-an-email")
            .with("password", "short");

        let errors = form().validate(&input).unwrap_err();
        assert_eq!(
            errors.first_message("username"),
            Some("Username must be at least 2 characters")
        );
        assert_eq!(errors.first_message("email"), Some("Enter a valid email address"));
        assert_eq!(
            errors.first_message("password"),
            Some("Password must be at least 8 characters")
        );
    }

    #[test]
    fn test_passing_fields_are_absent_from_errors() {
        let input = FormInput::new().with("username", "jo").with("email", "bad");

        let errors = form().validate(&input).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["email"]);
    }

    #[test]
    fn test_empty_form_mount_state() {
        // The form starts with empty strings for username and email
        let input = FormInput::new().with("username", "").with("email", "");

        let errors = form().validate(&input).unwrap_err();
        assert!(errors.has_field_errors("username"));
        assert!(errors.has_field_errors("email"));
        assert!(!errors.has_field_errors("password"));
    }

    #[test]
    fn test_missing_fields_are_required() {
        let errors = form().validate(&FormInput::new()).unwrap_err();
        assert_eq!(errors.messages("username"), vec!["Username is required"]);
        assert_eq!(errors.messages("email"), vec!["Email is required"]);
    }

    #[test]
    fn test_present_empty_password_is_checked() {
        let input = FormInput::new()
            .with("username", "jo")
            .with("email", "jo@example.dk")
            .with("password", "");

        assert!(form().validate(&input).unwrap_err().has_field_errors("password"));
    }

    #[test]
    fn test_unknown_fields_are_dropped() {
        let input = FormInput::new()
            .with("username", "jo")
            .with("email", "jo@example.dk")
            .with("nickname", "ignored");

        let data = form().validate(&input).unwrap();
        assert!(!to_input(&data).contains("nickname"));
    }
}
