use crate::render;
use anyhow::{Context, Result};
use console::style;
use inquire::{Confirm, InquireError, Password, PasswordDisplayMode, Text};
use regform_validation::{
    FieldDescriptor, FieldKind, FormSchema, FormSession, Presence, SessionError, ValidationErrors,
};

/// Store one answer in the session and return the field's inline error.
///
/// An empty answer to a field that may be left out makes it absent again.
pub fn apply_answer<S: FormSchema>(
    session: &mut FormSession<S>,
    field: &str,
    answer: &str,
) -> Result<Option<String>, SessionError> {
    let skippable = matches!(
        session.schema().presence(field),
        Some(Presence::Optional | Presence::BlankAsMissing)
    );

    if skippable && answer.trim().is_empty() {
        session.clear_field(field)?;
    } else {
        session.set_field(field, answer)?;
    }

    Ok(session.visible_error(field).map(str::to_string))
}

/// Fields to ask again after a rejected submit, in display order
pub fn failing_fields(
    fields: &'static [FieldDescriptor],
    errors: &ValidationErrors,
) -> Vec<&'static FieldDescriptor> {
    fields
        .iter()
        .filter(|field| errors.has_field_errors(field.name))
        .collect()
}

/// Ask for one field. `None` when the user cancelled.
fn ask(field: &FieldDescriptor, optional: bool, previous: Option<&str>) -> Result<Option<String>> {
    let label = if optional {
        format!("{} (optional):", field.label)
    } else {
        format!("{}:", field.label)
    };

    let answer = match field.kind {
        FieldKind::Password => Password::new(&label)
            .without_confirmation()
            .with_display_mode(PasswordDisplayMode::Masked)
            .prompt(),
        FieldKind::Date => Text::new(&label)
            .with_placeholder("YYYY-MM-DD")
            .with_help_message("Date as YYYY-MM-DD")
            .with_initial_value(previous.unwrap_or_default())
            .prompt(),
        FieldKind::Text | FieldKind::Email => Text::new(&label)
            .with_initial_value(previous.unwrap_or_default())
            .prompt(),
    };

    match answer {
        Ok(answer) => Ok(Some(answer)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", field.label)),
    }
}

/// Ask each field, then submit; failing fields are asked again until the form is accepted.
/// Returns `false` when the user cancelled.
fn fill_once<S: FormSchema>(session: &mut FormSession<S>) -> Result<bool> {
    let fields = session.schema().fields();
    let mut pending: Vec<&'static FieldDescriptor> = fields.iter().collect();

    loop {
        for field in pending {
            let optional = session.schema().presence(field.name) != Some(Presence::Required);
            let previous = session.input().get(field.name).map(str::to_string);

            let Some(answer) = ask(field, optional, previous.as_deref())? else {
                return Ok(false);
            };
            if let Some(message) = apply_answer(session, field.name, &answer)? {
                println!("{}", render::inline_error(&message));
            }
        }

        let _ = session.submit();
        if let Some(data) = session.submitted_data() {
            println!("\n{}", render::summary(session.schema(), data).trim_end());
            return Ok(true);
        }

        println!("\n{}", render::error_list(session.schema(), session.errors()).trim_end());
        pending = failing_fields(fields, session.errors());
        println!();
    }
}

pub fn run<S: FormSchema>(schema: S) -> Result<()> {
    let mut session = FormSession::new(schema);

    println!();
    println!("{}", style(format!("📝 {} form", session.schema().name())).cyan().bold());
    println!("{}", style("Press Esc to cancel").dim());
    println!();

    loop {
        if !fill_once(&mut session)? {
            println!("{}", style("Cancelled").yellow());
            return Ok(());
        }

        let again = Confirm::new("Start over with an empty form?")
            .with_default(false)
            .prompt()
            .context("Failed to read answer")?;
        if !again {
            return Ok(());
        }

        session.reset();
        println!();
    }
}
