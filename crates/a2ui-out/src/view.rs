//! Plain-text views for A2UI-OUT.
//!
//! Uses Handlebars with a few small helpers:
//! - upper: uppercase a heading
//! - percent: format a confidence as a percentage
//!
//! Rows are prepared in Rust; templates only lay them out.

use crate::RenderError;
use a2ui_core::value::format_timestamp;
use a2ui_core::{ExecutionResult, FieldValue, FieldValues, TaskIntent, UIComponent, UISchema};
use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde::Serialize;
use serde_json::json;

const FORM_TEMPLATE: &str = "\
{{title}}
{{#if subtitle}}{{subtitle}}
{{/if}}{{#each rows}}{{#if heading}}
{{indent}}[{{upper heading}}]
{{else}}{{indent}}{{#if required}}* {{else}}  {{/if}}{{label}}: {{value}}
{{/if}}{{/each}}";

const INTENT_TEMPLATE: &str = "\
Task: {{taskType}} ({{percent confidence}} confidence)
{{#each extracted}}  - {{@key}}: {{this}}
{{/each}}";

const RESULT_TEMPLATE: &str = "\
{{#if ok}}Recorded {{referenceId}}{{else}}Not recorded{{/if}}
{{#each warnings}}  ! {{this}}
{{/each}}";

/// Placeholder shown for absent or blank values.
pub const EMPTY: &str = "-";

handlebars_helper!(upper: |s: str| s.to_uppercase());
handlebars_helper!(percent: |v: f64| format!("{}%", (v * 100.0).round() as i64));

#[derive(Debug, Serialize)]
struct Row {
    indent: String,
    heading: Option<String>,
    label: String,
    value: String,
    required: bool,
}

/// Compiled text views
pub struct FormView {
    handlebars: Handlebars<'static>,
}

impl FormView {
    pub fn new() -> Result<Self, RenderError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(no_escape);

        handlebars.register_helper("upper", Box::new(upper));
        handlebars.register_helper("percent", Box::new(percent));

        for (name, template) in [
            ("form", FORM_TEMPLATE),
            ("intent", INTENT_TEMPLATE),
            ("result", RESULT_TEMPLATE),
        ] {
            handlebars
                .register_template_string(name, template)
                .map_err(|e| RenderError::Template(format!("{}: {}", name, e)))?;
        }

        Ok(Self { handlebars })
    }

    /// Schema with the current value of every field.
    pub fn form(&self, schema: &UISchema, values: &FieldValues) -> Result<String, RenderError> {
        let mut rows = Vec::new();
        collect_rows(&schema.components, 0, values, &mut rows);
        self.render(
            "form",
            &json!({
                "title": schema.title,
                "subtitle": schema.subtitle,
                "rows": rows,
            }),
        )
    }

    pub fn intent(&self, intent: &TaskIntent) -> Result<String, RenderError> {
        self.render("intent", intent)
    }

    pub fn result(&self, result: &ExecutionResult) -> Result<String, RenderError> {
        self.render("result", result)
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, RenderError> {
        self.handlebars
            .render(name, data)
            .map_err(|e| RenderError::Render(e.to_string()))
    }
}

fn collect_rows(components: &[UIComponent], depth: usize, values: &FieldValues, rows: &mut Vec<Row>) {
    let indent = "  ".repeat(depth);
    for component in components {
        match component {
            UIComponent::Section(section) => {
                rows.push(Row {
                    indent: indent.clone(),
                    heading: Some(section.title.clone()),
                    label: String::new(),
                    value: String::new(),
                    required: false,
                });
                collect_rows(&section.components, depth + 1, values, rows);
            }
            UIComponent::Button(button) => rows.push(Row {
                indent: indent.clone(),
                heading: None,
                label: format!("({})", button.label),
                value: format!("{:?}", button.action).to_lowercase(),
                required: false,
            }),
            field => {
                let value = field.id().and_then(|id| values.get(id));
                rows.push(Row {
                    indent: indent.clone(),
                    heading: None,
                    label: field.label().to_string(),
                    value: display_value(field, value),
                    required: field.is_required(),
                })
            }
        }
    }
}

/// Human-readable form of a field's current value.
pub fn display_value(component: &UIComponent, value: Option<&FieldValue>) -> String {
    let Some(value) = value else {
        return EMPTY.to_string();
    };
    match (component, value) {
        (UIComponent::EnumField(field), FieldValue::Text(v)) => field
            .options
            .iter()
            .find(|o| &o.value == v)
            .map(|o| o.label.clone())
            .unwrap_or_else(|| v.clone()),
        (_, v) if v.is_blank() => EMPTY.to_string(),
        (_, FieldValue::Text(s)) => s.clone(),
        (_, FieldValue::Boolean(b)) => (if *b { "yes" } else { "no" }).to_string(),
        (_, FieldValue::Number(n)) => format_number(*n),
        (_, FieldValue::Timestamp(t)) => format_timestamp(t),
        (_, FieldValue::Binary(b)) => format!("<{} bytes>", b.len()),
    }
}

/// Whole numbers print without a fraction.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
