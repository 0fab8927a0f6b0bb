//! Terminal rendering shared by the commands

use console::style;
use regform_validation::schemas::to_input;
use regform_validation::{FieldKind, FormSchema, ValidationErrors};

const MASK: &str = "********";

/// Label/value rows of accepted data, passwords masked, absent optionals shown as "-"
pub fn summary_rows<S: FormSchema>(schema: &S, data: &S::Data) -> Vec<(&'static str, String)> {
    let values = to_input(data);
    schema
        .fields()
        .iter()
        .map(|field| {
            let value = match (values.get(field.name), field.kind) {
                (None, _) => "-".to_string(),
                (Some(_), FieldKind::Password) => MASK.to_string(),
                (Some(value), _) => value.to_string(),
            };
            (field.label, value)
        })
        .collect()
}

pub fn summary<S: FormSchema>(schema: &S, data: &S::Data) -> String {
    let rows = summary_rows(schema, data);
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    let mut out = format!("{} {} form is valid\n", style("✔").green(), schema.name());
    for (label, value) in rows {
        out.push_str(&format!("  {:<width$}  {}\n", label, style(value).cyan(), width = width));
    }
    out
}

/// Every message of every failing field, in display order
pub fn error_list<S: FormSchema>(schema: &S, errors: &ValidationErrors) -> String {
    let mut out = format!(
        "{} {} form has {} invalid field(s)\n",
        style("✘").red(),
        schema.name(),
        errors.len()
    );
    for field in schema.fields() {
        for message in errors.messages(field.name) {
            out.push_str(&format!("  {}: {}\n", field.label, style(message).red()));
        }
    }
    out
}

/// The single inline error shown under a field
pub fn inline_error(message: &str) -> String {
    format!("  {} {}", style("↳").red(), style(message).red())
}

#[cfg(test)]
mod tests {
    use super::*;
    use regform_validation::{FormInput, MinimalSignupForm};

    #[test]
    fn test_summary_masks_passwords() {
        let schema = MinimalSignupForm::new();
        let data = schema
            .validate(
                &FormInput::new()
                    .with("username", "jo")
                    .with("email", "jo@example.dk")
                    .with("password", "12345678"),
            )
            .unwrap();

        let rows = summary_rows(&schema, &data);
        assert_eq!(
            rows,
            vec![
                ("Username", "jo".to_string()),
                ("Email", "jo@example.dk".to_string()),
                ("Password", MASK.to_string()),
            ]
        );
        assert!(!summary(&schema, &data).contains("12345678"));
    }

    #[test]
    fn test_summary_marks_absent_optional() {
        let schema = MinimalSignupForm::new();
        let data = schema
            .validate(&FormInput::new().with("username", "jo").with("email", "jo@example.dk"))
            .unwrap();

        assert_eq!(summary_rows(&schema, &data)[2], ("Password", "-".to_string()));
    }

    #[test]
    fn test_error_list_uses_labels() {
        let schema = MinimalSignupForm::new();
        let errors = schema.validate(&FormInput::new().with("username", "j")).unwrap_err();

        let text = error_list(&schema, &errors);
        assert!(text.contains("2 invalid field(s)"));
        assert!(text.contains("Username: Username must be at least 2 characters"));
        assert!(text.contains("Email: Email is required"));
    }
}
