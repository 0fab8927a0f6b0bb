use anyhow::Result;
use console::style;
use regform_validation::{FormSchema, Presence, ValidationRule};
use serde_json::{json, Value};
use std::sync::Arc;

fn rule_json(rule: &Arc<dyn ValidationRule>) -> Value {
    json!({
        "rule": rule.rule_name(),
        "parameters": rule.parameters(),
    })
}

/// Fields in display order with their presence and rules
pub fn describe<S: FormSchema>(schema: &S) -> Value {
    let rules = schema.rules();

    let fields: Vec<Value> = schema
        .fields()
        .iter()
        .map(|field| {
            let spec = rules.get_field_rules(field.name);
            json!({
                "name": field.name,
                "label": field.label,
                "kind": field.kind,
                "presence": spec.map(|s| s.presence()),
                "rules": spec
                    .map(|s| s.rules().iter().map(rule_json).collect::<Vec<_>>())
                    .unwrap_or_default(),
            })
        })
        .collect();

    json!({
        "form": schema.name(),
        "fields": fields,
        "cross_field": rules.get_request_rules().iter().map(rule_json).collect::<Vec<_>>(),
    })
}

fn presence_label(presence: Option<Presence>) -> &'static str {
    match presence {
        Some(Presence::Required) | None => "required",
        Some(Presence::Optional) => "optional",
        Some(Presence::BlankAsMissing) => "optional, blank allowed",
    }
}

pub fn run<S: FormSchema>(schema: S, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&describe(&schema))?);
        return Ok(());
    }

    println!("{} {}", style("Form:").bold(), style(schema.name()).cyan().bold());
    for field in schema.fields() {
        println!(
            "\n  {} ({}, {})",
            style(field.label).bold(),
            field.name,
            presence_label(schema.presence(field.name))
        );
        if let Some(spec) = schema.rules().get_field_rules(field.name) {
            for rule in spec.rules() {
                match rule.parameters() {
                    Some(params) => println!("    - {} {}", rule.rule_name(), style(params).dim()),
                    None => println!("    - {}", rule.rule_name()),
                }
            }
        }
    }

    let cross_field = schema.rules().get_request_rules();
    if !cross_field.is_empty() {
        println!("\n  {}", style("Cross-field").bold());
        for rule in cross_field {
            let params = rule.parameters().unwrap_or(Value::Null);
            println!("    - {} {}", rule.rule_name(), style(params).dim());
        }
    }

    Ok(())
}
