//! Data Model: TaskIntent, ValidatedPayload, ExecutionResult
use crate::schema::UISchema;
use crate::value::FieldValues;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Output of inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskIntent {
    pub task_type: String,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Signals pulled from the input text. Informational only.
    #[serde(default)]
    pub extracted: BTreeMap<String, String>,
    pub ui_schema: UISchema,
}

/// A value map certified against every required-field rule of its schema.
///
/// Only the validator constructs one, which is how the engine guarantees an
/// executor never sees unvalidated data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedPayload {
    task_type: String,
    fields: FieldValues,
    metadata: BTreeMap<String, String>,
}

impl ValidatedPayload {
    pub(crate) fn new(
        task_type: String,
        fields: FieldValues,
        metadata: BTreeMap<String, String>,
    ) -> Self {
        Self {
            task_type,
            fields,
            metadata,
        }
    }

    pub fn task_type(&self) -> &str {
        &self.task_type
    }

    /// The full value map exactly as it was validated.
    pub fn fields(&self) -> &FieldValues {
        &self.fields
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub ok: bool,
    pub reference_id: String,
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Human-readable rendering of what was persisted.
    pub payload_preview: String,
}

impl ExecutionResult {
    pub fn success(reference_id: impl Into<String>, payload_preview: impl Into<String>) -> Self {
        Self {
            ok: true,
            reference_id: reference_id.into(),
            warnings: Vec::new(),
            payload_preview: payload_preview.into(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}
