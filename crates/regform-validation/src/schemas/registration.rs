//! Full registration form (nine fields)

use super::{FieldDescriptor, FieldKind, FormSchema};
use crate::clock::{SharedClock, SystemClock};
use crate::rules::{Presence, Rules};
use crate::validators::{
    AgeValidator, ConfirmedValidator, EmailValidator, LengthValidator, PatternValidator,
    RequiredValidator,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";
pub const MIN_AGE: i32 = 18;
pub const PHONE_DIGITS: usize = 8;
pub const POSTAL_CODE_DIGITS: usize = 4;

static FIELDS: [FieldDescriptor; 9] = [
    FieldDescriptor::new("username", "Username", FieldKind::Text),
    FieldDescriptor::new("first_name", "First name", FieldKind::Text),
    FieldDescriptor::new("last_name", "Last name", FieldKind::Text),
    FieldDescriptor::new("email", "Email", FieldKind::Email),
    FieldDescriptor::new("password", "Password", FieldKind::Password),
    FieldDescriptor::new("confirm_password", "Confirm password", FieldKind::Password),
    FieldDescriptor::new("birthdate", "Birthdate", FieldKind::Date),
    FieldDescriptor::new("phone", "Phone", FieldKind::Text),
    FieldDescriptor::new("postal_code", "Postal code", FieldKind::Text),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// Kept as entered; only the age it implies is checked
    pub birthdate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub postal_code: String,
}

#[derive(Debug, Clone)]
pub struct RegistrationForm {
    rules: Rules,
}

impl RegistrationForm {
    /// Form whose age rule uses the system date
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Form whose age rule uses `clock` for today's date
    pub fn with_clock(clock: SharedClock) -> Self {
        let rules = Rules::new()
            .field(
                "username",
                LengthValidator::new()
                    .min(USERNAME_MIN_LENGTH)
                    .message("Username must be at least 3 characters"),
            )
            .field(
                "username",
                PatternValidator::word_characters()
                    .message("Username may only contain letters, numbers and underscores"),
            )
            .missing_message("username", "Username is required")
            .field(
                "first_name",
                RequiredValidator::with_message("First name is required").non_empty(),
            )
            .missing_message("first_name", "First name is required")
            .field(
                "last_name",
                RequiredValidator::with_message("Last name is required").non_empty(),
            )
            .missing_message("last_name", "Last name is required")
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
            .field(
                "password",
                PatternValidator::has_uppercase()
                    .message("Password must contain at least one uppercase letter"),
            )
            .field(
                "password",
                PatternValidator::has_lowercase()
                    .message("Password must contain at least one lowercase letter"),
            )
            .field(
                "password",
                PatternValidator::has_digit().message("Password must contain at least one number"),
            )
            .field(
                "password",
                PatternValidator::contains_any(PASSWORD_SYMBOLS).message(format!(
                    "Password must contain at least one special character ({})",
                    PASSWORD_SYMBOLS
                )),
            )
            .missing_message("password", "Password is required")
            .presence("confirm_password", Presence::Required)
            .missing_message("confirm_password", "Please confirm your password")
            .field(
                "birthdate",
                AgeValidator::new(MIN_AGE)
                    .clock(clock)
                    .message("You must be at least 18 years old")
                    .date_message("Enter a valid birthdate"),
            )
            .missing_message("birthdate", "Birthdate is required")
            .field(
                "phone",
                PatternValidator::digits(PHONE_DIGITS)
                    .message("Phone number must be exactly 8 digits"),
            )
            .presence("phone", Presence::BlankAsMissing)
            .field(
                "postal_code",
                PatternValidator::digits(POSTAL_CODE_DIGITS)
                    .message("Postal code must be exactly 4 digits"),
            )
            .missing_message("postal_code", "Postal code is required")
            .request(
                ConfirmedValidator::new("password", "confirm_password")
                    .message("Passwords do not match"),
            );

        Self { rules }
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSchema for RegistrationForm {
    type Data = Registration;

    fn name(&self) -> &'static str {
        "registration"
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
    use crate::clock::FixedClock;
    use crate::input::FormInput;
    use crate::schemas::to_input;

    fn form() -> RegistrationForm {
        RegistrationForm::with_clock(Arc::new(FixedClock::parse("2024-06-15").unwrap()))
    }

    fn valid_input() -> FormInput {
        FormInput::new()
            .with("username", "ada_99")
            .with("first_name", "Ada")
            .with("last_name", "Lovelace")
            .with("email", "ada@example.dk")
            .with("password", "Abc123!@")
            .with("confirm_password", "Abc123!@")
            .with("birthdate", "2000-12-10")
            .with("phone", "12345678")
            .with("postal_code", "1234")
    }

    #[test]
    fn test_valid_input_returns_same_values() {
        let input = valid_input();
        let data = form().validate(&input).unwrap();

        assert_eq!(data.username, "ada_99");
        assert_eq!(data.birthdate, "2000-12-10");
        assert_eq!(data.phone.as_deref(), Some("12345678"));
        assert_eq!(to_input(&data), input);
    }

    #[test]
    fn test_blank_phone_is_coerced_to_none() {
        let input = valid_input().with("phone", "");
        let data = form().validate(&input).unwrap();
        assert_eq!(data.phone, None);

        let mut without_phone = valid_input();
        without_phone.remove("phone");
        assert_eq!(form().validate(&without_phone).unwrap().phone, None);
    }

    #[test]
    fn test_phone_must_be_eight_digits() {
        for phone in ["1234567", "123456789", "1234567a", "+4512345678"] {
            let errors = form().validate(&valid_input().with("phone", phone)).unwrap_err();
            assert_eq!(
                errors.messages("phone"),
                vec!["Phone number must be exactly 8 digits"],
                "phone '{}'",
                phone
            );
        }
    }

    #[test]
    fn test_postal_code() {
        assert!(form().validate(&valid_input().with("postal_code", "1234")).is_ok());

        for postal_code in ["123", "12a4", "12345", ""] {
            let errors = form()
                .validate(&valid_input().with("postal_code", postal_code))
                .unwrap_err();
            assert_eq!(
                errors.first_message("postal_code"),
                Some("Postal code must be exactly 4 digits")
            );
        }
    }

    #[test]
    fn test_password_reports_every_unmet_requirement() {
        let input = valid_input()
            .with("password", "abc12345")
            .with("confirm_password", "abc12345");

        let errors = form().validate(&input).unwrap_err();
        assert_eq!(
            errors.messages("password"),
            vec![
                "Password must contain at least one uppercase letter",
                "Password must contain at least one special character (!@#$%^&*(),.?\":{}|<>)",
            ]
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_password_all_requirements_unmet() {
        let input = valid_input().with("password", "").with("confirm_password", "");
        let errors = form().validate(&input).unwrap_err();
        assert_eq!(errors.messages("password").len(), 5);
        assert!(!errors.has_field_errors("confirm_password"));
    }

    #[test]
    fn test_confirmation_mismatch_only_on_confirmation() {
        let input = valid_input().with("confirm_password", "Abc123!#");

        let errors = form().validate(&input).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["confirm_password"]);
        assert_eq!(errors.messages("confirm_password"), vec!["Passwords do not match"]);
    }

    #[test]
    fn test_confirmation_checked_even_when_password_is_weak() {
        let input = valid_input()
            .with("password", "weak")
            .with("confirm_password", "weaker");

        let errors = form().validate(&input).unwrap_err();
        assert!(errors.has_field_errors("password"));
        assert_eq!(errors.messages("confirm_password"), vec!["Passwords do not match"]);
    }

    #[test]
    fn test_missing_password_skips_confirmation_check() {
        let mut input = valid_input();
        input.remove("password");

        let errors = form().validate(&input).unwrap_err();
        assert_eq!(errors.messages("password"), vec!["Password is required"]);
        assert!(!errors.has_field_errors("confirm_password"));
    }

    #[test]
    fn test_age_boundary() {
        assert!(form().validate(&valid_input().with("birthdate", "2006-06-15")).is_ok());

        let errors = form()
            .validate(&valid_input().with("birthdate", "2006-06-16"))
            .unwrap_err();
        assert_eq!(
            errors.messages("birthdate"),
            vec!["You must be at least 18 years old"]
        );
    }

    #[test]
    fn test_invalid_birthdate() {
        let errors = form()
            .validate(&valid_input().with("birthdate", "not a date"))
            .unwrap_err();
        assert_eq!(errors.messages("birthdate"), vec!["Enter a valid birthdate"]);
    }

    #[test]
    fn test_username_rules() {
        let errors = form()
            .validate(&valid_input().with("username", "a-"))
            .unwrap_err();
        assert_eq!(
            errors.messages("username"),
            vec![
                "Username must be at least 3 characters",
                "Username may only contain letters, numbers and underscores",
            ]
        );

        let errors = form().validate(&valid_input().with("username", "")).unwrap_err();
        assert_eq!(
            errors.messages("username"),
            vec![
                "Username must be at least 3 characters",
                "Username may only contain letters, numbers and underscores",
            ]
        );

        let mut without_username = valid_input();
        without_username.remove("username");
        let errors = form().validate(&without_username).unwrap_err();
        assert_eq!(errors.messages("username"), vec!["Username is required"]);
    }

    #[test]
    fn test_names_must_not_be_empty() {
        let input = valid_input().with("first_name", "").with("last_name", "");
        let errors = form().validate(&input).unwrap_err();
        assert_eq!(errors.messages("first_name"), vec!["First name is required"]);
        assert_eq!(errors.messages("last_name"), vec!["Last name is required"]);
    }

    #[test]
    fn test_whitespace_names_are_not_empty() {
        let input = valid_input().with("first_name", "  ").with("last_name", " ");
        let data = form().validate(&input).unwrap();
        assert_eq!(data.first_name, "  ");
        assert_eq!(data.last_name, " ");
    }

    #[test]
    fn test_every_violated_field_is_reported() {
        let errors = form().validate(&FormInput::new()).unwrap_err();
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(
            fields,
            vec![
                "birthdate",
                "confirm_password",
                "email",
                "first_name",
                "last_name",
                "password",
                "postal_code",
                "username",
            ]
        );
        assert!(!errors.has_field_errors("phone"));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let input = valid_input().with("email", "nope").with("postal_code", "12");
        let form = form();
        assert_eq!(form.validate(&input), form.validate(&input));
        assert_eq!(form.validate(&valid_input()), form.validate(&valid_input()));
    }

    #[test]
    fn test_field_metadata() {
        let form = form();
        assert_eq!(form.fields().len(), 9);
        assert_eq!(form.field("birthdate").unwrap().kind, FieldKind::Date);
        assert_eq!(form.presence("phone"), Some(Presence::BlankAsMissing));
        assert_eq!(form.presence("postal_code"), Some(Presence::Required));
        assert!(form.field("nickname").is_none());
        for field in form.fields() {
            assert!(form.rules().get_field_rules(field.name).is_some(), "{}", field.name);
        }
    }
}
