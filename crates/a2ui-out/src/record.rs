//! Closed envelope for persisted records.
//!
//! Everything written by an executor is built from these few shapes, never
//! from open-ended dynamic values.
use a2ui_core::value::{encode_binary, format_timestamp};
use a2ui_core::{FieldValue, FieldValues};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordValue {
    Str(String),
    Bool(bool),
    Num(f64),
    List(Vec<RecordValue>),
    Map(BTreeMap<String, RecordValue>),
}

impl RecordValue {
    pub fn str(s: impl Into<String>) -> Self {
        RecordValue::Str(s.into())
    }
}

impl From<&FieldValue> for RecordValue {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Text(s) => RecordValue::Str(s.clone()),
            FieldValue::Boolean(b) => RecordValue::Bool(*b),
            FieldValue::Number(n) => RecordValue::Num(*n),
            FieldValue::Timestamp(t) => RecordValue::Str(format_timestamp(t)),
            FieldValue::Binary(b) => RecordValue::Str(encode_binary(b)),
        }
    }
}

/// Field map in envelope form.
pub fn fields_to_record(fields: &FieldValues) -> RecordValue {
    RecordValue::Map(
        fields
            .iter()
            .map(|(id, v)| (id.clone(), RecordValue::from(v)))
            .collect(),
    )
}

pub fn strings_to_record(map: &BTreeMap<String, String>) -> RecordValue {
    RecordValue::Map(
        map.iter()
            .map(|(k, v)| (k.clone(), RecordValue::Str(v.clone())))
            .collect(),
    )
}
