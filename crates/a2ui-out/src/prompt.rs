//! Line-oriented renderer: one question per field on any reader/writer pair.
//!
//! Answers are parsed by field kind. An empty line keeps the current value,
//! `-` clears it, and end of input cancels the session without completing.

use crate::view::{display_value, FormView};
use crate::RenderError;
use a2ui_core::codec::parse_timestamp;
use a2ui_core::{validate_all, FieldValue, FieldValues, Renderer, UIComponent, UISchema};
use chrono::Utc;
use std::io::{BufRead, Write};

/// Typed `-` to remove a value.
pub const CLEAR: &str = "-";

pub struct PromptRenderer<R, W> {
    input: R,
    output: W,
    view: FormView,
}

impl<R: BufRead, W: Write> PromptRenderer<R, W> {
    pub fn new(input: R, output: W) -> Result<Self, RenderError> {
        Ok(Self {
            input,
            output,
            view: FormView::new()?,
        })
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Ask for one field until the answer parses. `Ok(false)` on end of input.
    fn ask(&mut self, field: &UIComponent, values: &mut FieldValues) -> Result<bool, RenderError> {
        let Some(id) = field.id() else {
            return Ok(true);
        };

        if let UIComponent::EnumField(f) = field {
            let choices: Vec<String> = f
                .options
                .iter()
                .enumerate()
                .map(|(i, o)| format!("{}) {}", i + 1, o.label))
                .collect();
            writeln!(self.output, "  {}", choices.join("  "))?;
        }

        loop {
            let marker = if field.is_required() { "*" } else { "" };
            write!(
                self.output,
                "{}{} [{}]: ",
                field.label(),
                marker,
                display_value(field, values.get(id))
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(false);
            }
            let answer = line.trim();

            if answer.is_empty() {
                return Ok(true);
            }
            if answer == CLEAR {
                values.remove(id);
                return Ok(true);
            }
            match parse_answer(field, answer) {
                Ok(value) => {
                    values.insert(id.to_string(), value);
                    return Ok(true);
                }
                Err(reason) => writeln!(self.output, "  {}", reason)?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Renderer for PromptRenderer<R, W> {
    type Error = RenderError;

    fn render<F>(
        &mut self,
        schema: &UISchema,
        initial: FieldValues,
        on_complete: F,
    ) -> Result<(), RenderError>
    where
        F: FnOnce(FieldValues),
    {
        let mut values = initial;
        let form = self.view.form(schema, &values)?;
        writeln!(self.output, "{}", form)?;

        for field in schema.leaves().filter(|c| c.is_value_bearing()) {
            if !self.ask(field, &mut values)? {
                tracing::info!(schema = %schema.id, "prompt cancelled");
                return Ok(());
            }
        }

        loop {
            let missing = validate_all(schema, &values);
            if missing.is_empty() {
                break;
            }
            writeln!(self.output, "Still required: {}", missing.join(", "))?;
            for id in missing {
                if let Some(field) = schema.field(id) {
                    if !self.ask(field, &mut values)? {
                        tracing::info!(schema = %schema.id, "prompt cancelled");
                        return Ok(());
                    }
                }
            }
        }

        tracing::debug!(schema = %schema.id, fields = values.len(), "prompt complete");
        on_complete(values);
        Ok(())
    }
}

/// Parse one typed answer for `field`.
pub fn parse_answer(field: &UIComponent, answer: &str) -> Result<FieldValue, String> {
    match field {
        UIComponent::TextField(_) => Ok(FieldValue::text(answer)),
        UIComponent::ToggleField(_) => match answer.to_lowercase().as_str() {
            "y" | "yes" | "true" | "1" => Ok(FieldValue::Boolean(true)),
            "n" | "no" | "false" | "0" => Ok(FieldValue::Boolean(false)),
            _ => Err("answer yes or no".to_string()),
        },
        UIComponent::SliderField(f) => {
            let n: f64 = answer
                .parse()
                .map_err(|_| format!("'{}' is not a number", answer))?;
            if !n.is_finite() {
                return Err(format!("'{}' is not a number", answer));
            }
            Ok(FieldValue::Number(n.max(f.min).min(f.max)))
        }
        UIComponent::DateField(_) => {
            if answer.eq_ignore_ascii_case("now") {
                Ok(FieldValue::Timestamp(Utc::now()))
            } else {
                parse_timestamp(answer).map(FieldValue::Timestamp)
            }
        }
        UIComponent::EnumField(f) => {
            if let Some(option) = f
                .options
                .iter()
                .find(|o| o.value == answer || o.label.eq_ignore_ascii_case(answer))
            {
                return Ok(FieldValue::text(option.value.as_str()));
            }
            answer
                .parse::<usize>()
                .ok()
                .and_then(|i| i.checked_sub(1))
                .and_then(|i| f.options.get(i))
                .map(|o| FieldValue::text(o.value.as_str()))
                .ok_or_else(|| format!("choose 1-{} or an option name", f.options.len()))
        }
        UIComponent::ImageField(_) => std::fs::read(answer)
            .map(FieldValue::Binary)
            .map_err(|e| format!("cannot read {}: {}", answer, e)),
        UIComponent::Section(_) | UIComponent::Button(_) => {
            Err(format!("{} takes no input", field.kind()))
        }
    }
}
