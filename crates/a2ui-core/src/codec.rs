//! Schema-directed decoding of wire values.
//!
//! The native JSON form of a value is ambiguous on its own (a string may be
//! text, a timestamp or base64), so decoding asks the schema what each id is.
use crate::error::{A2uiError, Result};
use crate::schema::{UIComponent, UISchema};
use crate::value::{FieldValue, FieldValues};
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Decode a JSON object of `id -> value` into typed values.
///
/// `null` means absent. Ids that are not schema fields fall back to the JSON
/// shape (string, bool or number).
pub fn decode_values(schema: &UISchema, object: &Map<String, Value>) -> Result<FieldValues> {
    let mut fields: HashMap<&str, &UIComponent> = HashMap::new();
    for leaf in schema.leaves().filter(|c| c.is_value_bearing()) {
        if let Some(id) = leaf.id() {
            fields.entry(id).or_insert(leaf);
        }
    }

    let mut values = FieldValues::new();
    for (id, raw) in object {
        if raw.is_null() {
            continue;
        }
        let value = match fields.get(id.as_str()) {
            Some(component) => decode_field(id, component, raw)?,
            None => decode_untyped(id, raw)?,
        };
        values.insert(id.clone(), value);
    }
    Ok(values)
}

/// Decode from any JSON value, which must be an object.
pub fn decode_values_from(schema: &UISchema, value: &Value) -> Result<FieldValues> {
    match value {
        Value::Object(object) => decode_values(schema, object),
        Value::Null => Ok(FieldValues::new()),
        other => Err(A2uiError::MalformedValue {
            id: "<root>".to_string(),
            reason: format!("expected an object, got {}", json_kind(other)),
        }),
    }
}

/// Encode a value map to its native JSON object form.
pub fn encode_values(values: &FieldValues) -> Map<String, Value> {
    values
        .iter()
        .map(|(id, value)| (id.clone(), value.to_json()))
        .collect()
}

fn decode_field(id: &str, component: &UIComponent, raw: &Value) -> Result<FieldValue> {
    match component {
        UIComponent::TextField(_) | UIComponent::EnumField(_) => raw
            .as_str()
            .map(FieldValue::from)
            .ok_or_else(|| mismatch(id, "string", raw)),
        UIComponent::ToggleField(_) => raw
            .as_bool()
            .map(FieldValue::Boolean)
            .ok_or_else(|| mismatch(id, "boolean", raw)),
        UIComponent::SliderField(_) => raw
            .as_f64()
            .map(FieldValue::Number)
            .ok_or_else(|| mismatch(id, "number", raw)),
        UIComponent::DateField(_) => {
            let text = raw.as_str().ok_or_else(|| mismatch(id, "ISO-8601 string", raw))?;
            parse_timestamp(text)
                .map(FieldValue::Timestamp)
                .map_err(|reason| A2uiError::MalformedValue {
                    id: id.to_string(),
                    reason,
                })
        }
        UIComponent::ImageField(_) => {
            let text = raw.as_str().ok_or_else(|| mismatch(id, "base64 string", raw))?;
            base64::engine::general_purpose::STANDARD
                .decode(text)
                .map(FieldValue::Binary)
                .map_err(|e| A2uiError::MalformedValue {
                    id: id.to_string(),
                    reason: format!("invalid base64: {}", e),
                })
        }
        UIComponent::Section(_) | UIComponent::Button(_) => decode_untyped(id, raw),
    }
}

fn decode_untyped(id: &str, raw: &Value) -> Result<FieldValue> {
    match raw {
        Value::String(s) => Ok(FieldValue::Text(s.clone())),
        Value::Bool(b) => Ok(FieldValue::Boolean(*b)),
        Value::Number(n) => n
            .as_f64()
            .map(FieldValue::Number)
            .ok_or_else(|| mismatch(id, "finite number", raw)),
        other => Err(mismatch(id, "string, boolean or number", other)),
    }
}

pub fn parse_timestamp(text: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(text.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("invalid timestamp '{}': {}", text, e))
}

fn mismatch(id: &str, expected: &str, got: &Value) -> A2uiError {
    A2uiError::MalformedValue {
        id: id.to_string(),
        reason: format!("expected {}, got {}", expected, json_kind(got)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn schema() -> UISchema {
        UISchema::new(
            "s",
            "S",
            "t",
            vec![
                TextField::new("name", "Name").into(),
                EnumField::new("level", "Level", vec![EnumOption::new("low", "Low")]).into(),
                ToggleField::new("flag", "Flag", false).into(),
                SliderField::new("score", "Score", 0.0, 5.0, 1.0, 0.0).into(),
                DateField::new("when", "When", false).into(),
                ImageField::new("photo", "Photo").into(),
            ],
        )
    }

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_typed_by_schema() {
        let values = decode_values(
            &schema(),
            &object(json!({
                "name": "Dock 2",
                "level": "low",
                "flag": true,
                "score": 3,
                "when": "2024-03-04T05:06:07Z",
                "photo": "aGk=",
                "extra": "kept",
                "skipped": null
            })),
        )
        .unwrap();

        assert_eq!(values["name"], FieldValue::text("Dock 2"));
        assert_eq!(values["level"], FieldValue::text("low"));
        assert_eq!(values["flag"], FieldValue::Boolean(true));
        assert_eq!(values["score"], FieldValue::Number(3.0));
        assert_eq!(
            values["when"],
            FieldValue::Timestamp(Utc.with_ymd_and_hms(2024, 3, 4, 5, 6, 7).unwrap())
        );
        assert_eq!(values["photo"], FieldValue::Binary(b"hi".to_vec()));
        assert_eq!(values["extra"], FieldValue::text("kept"));
        assert!(!values.contains_key("skipped"));
    }

    #[test]
    fn test_shape_mismatch_names_the_field() {
        let err = decode_values(&schema(), &object(json!({ "flag": "yes" }))).unwrap_err();
        match err {
            A2uiError::MalformedValue { id, reason } => {
                assert_eq!(id, "flag");
                assert!(reason.contains("boolean"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(decode_values(&schema(), &object(json!({ "photo": "%%%" }))).is_err());
        assert!(decode_values(&schema(), &object(json!({ "when": "yesterday" }))).is_err());
    }

    #[test]
    fn test_encode_then_decode_preserves_typed_values() {
        let schema = schema();
        let mut values = FieldValues::new();
        values.insert("photo".into(), FieldValue::Binary(vec![1, 2, 3]));
        values.insert(
            "when".into(),
            FieldValue::Timestamp(Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap()),
        );
        let encoded = encode_values(&values);
        assert_eq!(decode_values(&schema, &encoded).unwrap(), values);
    }

    #[test]
    fn test_sub_second_timestamp_survives_the_wire() {
        let schema = schema();
        let at = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap()
            + chrono::Duration::microseconds(1_500);
        let mut values = FieldValues::new();
        values.insert("when".into(), FieldValue::Timestamp(at));

        let encoded = encode_values(&values);
        assert_eq!(encoded["when"], json!("2023-12-31T23:59:59.001500Z"));
        assert_eq!(decode_values(&schema, &encoded).unwrap(), values);
    }

    #[test]
    fn test_root_must_be_object() {
        assert!(decode_values_from(&schema(), &json!([1, 2])).is_err());
        assert!(decode_values_from(&schema(), &Value::Null).unwrap().is_empty());
    }
}
