use crate::render;
use anyhow::{Context, Result};
use regform_validation::{FormInput, FormSchema};
use std::io;
use std::path::Path;

/// Outcome of one validation run, ready to print
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub valid: bool,
    pub output: String,
}

/// Read a JSON object of string fields from `path`, or stdin when `None`
pub fn read_input(path: Option<&Path>) -> Result<FormInput> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?,
        None => io::read_to_string(io::stdin()).context("Failed to read input from stdin")?,
    };

    parse_input(&text)
}

pub fn parse_input(text: &str) -> Result<FormInput> {
    serde_json::from_str(text).context("Input must be a JSON object whose values are strings")
}

pub fn report<S: FormSchema>(schema: &S, input: &FormInput, json: bool) -> Result<Report> {
    let result = schema.validate(input);
    let valid = result.is_ok();

    let output = match (result, json) {
        (Ok(data), true) => serde_json::to_string_pretty(&serde_json::json!({
            "form": schema.name(),
            "valid": true,
            "data": data,
        }))?,
        (Err(errors), true) => serde_json::to_string_pretty(&serde_json::json!({
            "form": schema.name(),
            "valid": false,
            "errors": errors.errors,
        }))?,
        (Ok(data), false) => render::summary(schema, &data),
        (Err(errors), false) => render::error_list(schema, &errors),
    };

    Ok(Report { valid, output })
}

/// Returns whether the input was valid
pub fn run<S: FormSchema>(schema: S, path: Option<&Path>, json: bool) -> Result<bool> {
    let input = read_input(path)?;
    tracing::debug!(form = schema.name(), fields = input.len(), "validating input");

    let report = report(&schema, &input, json)?;
    println!("{}", report.output.trim_end());
    Ok(report.valid)
}
