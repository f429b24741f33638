//! Warehouse incident form generated per report.

use a2ui_core::{
    Button, DateField, EnumField, EnumOption, ImageField, Section, TaskContext, TextField,
    ToggleField, UIAction, UISchema,
};
use std::collections::BTreeMap;

pub const TASK_TYPE: &str = "warehouse_incident";
pub const SCHEMA_ID: &str = "warehouse_incident_v1";

/// Build the incident schema, with defaults filled from the report's signals.
pub fn incident_schema(
    input: &str,
    context: &TaskContext,
    extracted: &BTreeMap<String, String>,
    generated_by: &str,
) -> UISchema {
    let urgent = extracted.get("urgency").map(String::as_str) == Some("high");
    let severity = if urgent { "high" } else { "medium" };

    let location = context
        .location_hint
        .clone()
        .or_else(|| extracted.get("aisle").map(|aisle| format!("Aisle {}", aisle)));

    UISchema::new(
        SCHEMA_ID,
        "Report Warehouse Incident",
        TASK_TYPE,
        vec![
            Section::new(
                "Evidence",
                vec![ImageField::new("photo", "Photo (required)").required().into()],
            )
            .into(),
            Section::new(
                "Details",
                vec![
                    EnumField::new(
                        "severity",
                        "Severity",
                        vec![
                            EnumOption::new("low", "Low"),
                            EnumOption::new("medium", "Medium"),
                            EnumOption::new("high", "High"),
                        ],
                    )
                    .required()
                    .default_value(Some(severity.to_string()))
                    .into(),
                    TextField::new("location", "Location")
                        .required()
                        .placeholder("e.g. Aisle 4, Bay 2")
                        .default_value(location)
                        .into(),
                    DateField::new("occurredAt", "Occurred At", true)
                        .required()
                        .into(),
                    ToggleField::new(
                        "hazardous",
                        "Hazardous (leak / sharp / chemical)",
                        extracted.contains_key("hazard"),
                    )
                    .required()
                    .into(),
                    TextField::new("notes", "Notes")
                        .placeholder("Optional details…")
                        .default_value(Some(input.to_string()))
                        .into(),
                ],
            )
            .into(),
            Button::new("submit", "Submit Incident", UIAction::Submit).into(),
        ],
    )
    .with_subtitle("Generated for this report only.")
    .with_metadata("generated_by", generated_by)
    .with_metadata("user_role", context.user_role.as_str())
    .with_metadata("locale", context.locale.as_str())
}
