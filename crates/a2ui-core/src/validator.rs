//! Validator: required-field checks that gate every execution.
//!
//! Required ids are collected in the same pre-order as seeding. Validation
//! never trims, coerces or filters: a successful payload carries the whole
//! supplied map unchanged. Numbers must be finite, since no wire or record
//! form can carry NaN or infinity.
use crate::data_model::ValidatedPayload;
use crate::error::{A2uiError, Result};
use crate::schema::UISchema;
use crate::value::{FieldValue, FieldValues};
use crate::visit::required_ids;

/// Check `values` against `schema`, failing on the first missing required id,
/// then on the first non-finite number.
///
/// Takes the map by value: the caller hands its snapshot over and the
/// payload owns it from here on.
pub fn validate(schema: &UISchema, values: FieldValues) -> Result<ValidatedPayload> {
    if let Some(id) = first_missing(schema, &values) {
        tracing::warn!(schema = %schema.id, field = %id, "required field missing");
        return Err(A2uiError::MissingRequiredField(id.to_string()));
    }
    if let Some((id, n)) = first_non_finite(&values) {
        tracing::warn!(schema = %schema.id, field = %id, value = %n, "non-finite number");
        return Err(A2uiError::MalformedValue {
            id: id.to_string(),
            reason: format!("number must be finite, got {}", n),
        });
    }

    tracing::debug!(schema = %schema.id, fields = values.len(), "values validated");
    Ok(ValidatedPayload::new(
        schema.task_type.clone(),
        values,
        schema.metadata.clone(),
    ))
}

/// Every missing required id, in traversal order. Empty means `validate` would succeed.
pub fn validate_all<'s>(schema: &'s UISchema, values: &FieldValues) -> Vec<&'s str> {
    required_ids(&schema.components)
        .into_iter()
        .filter(|id| is_missing(id, values))
        .collect()
}

fn first_missing<'s>(schema: &'s UISchema, values: &FieldValues) -> Option<&'s str> {
    required_ids(&schema.components)
        .into_iter()
        .find(|id| is_missing(id, values))
}

fn first_non_finite(values: &FieldValues) -> Option<(&str, f64)> {
    values.iter().find_map(|(id, value)| match value {
        FieldValue::Number(n) if !n.is_finite() => Some((id.as_str(), *n)),
        _ => None,
    })
}

fn is_missing(id: &str, values: &FieldValues) -> bool {
    values.get(id).map_or(true, |v| v.is_blank())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;

    fn incident() -> UISchema {
        UISchema::new(
            "incident",
            "Incident",
            "warehouse_incident",
            vec![
                TextField::new("location", "Location").required().into(),
                ToggleField::new("hazardous", "Hazardous", false).required().into(),
            ],
        )
        .with_metadata("generated_by", "test")
    }

    #[test]
    fn test_missing_then_fixed() {
        let schema = incident();
        let mut values = FieldValues::new();
        values.insert("hazardous".into(), FieldValue::Boolean(false));

        let err = validate(&schema, values.clone()).unwrap_err();
        assert_eq!(err, A2uiError::MissingRequiredField("location".into()));

        values.insert("location".into(), FieldValue::text("Aisle 4"));
        let payload = validate(&schema, values.clone()).unwrap();
        assert_eq!(payload.fields(), &values);
        assert_eq!(payload.task_type(), "warehouse_incident");
        assert_eq!(payload.metadata().get("generated_by").map(String::as_str), Some("test"));
    }

    #[test]
    fn test_whitespace_text_is_missing() {
        let schema = incident();
        let mut values = FieldValues::new();
        values.insert("location".into(), FieldValue::text(" \t\n "));
        values.insert("hazardous".into(), FieldValue::Boolean(true));
        assert_eq!(
            validate(&schema, values).unwrap_err(),
            A2uiError::MissingRequiredField("location".into())
        );
    }

    #[test]
    fn test_empty_image_is_missing() {
        let schema = UISchema::new(
            "s",
            "S",
            "t",
            vec![ImageField::new("photo", "Photo").required().into()],
        );
        let mut values = FieldValues::new();
        values.insert("photo".into(), FieldValue::Binary(vec![]));
        assert_eq!(
            validate(&schema, values.clone()).unwrap_err(),
            A2uiError::MissingRequiredField("photo".into())
        );
        values.insert("photo".into(), FieldValue::Binary(vec![0xFF, 0xD8]));
        assert!(validate(&schema, values).is_ok());
    }

    #[test]
    fn test_first_missing_in_traversal_order() {
        let schema = UISchema::new(
            "s",
            "S",
            "t",
            vec![
                Section::new("A", vec![TextField::new("first", "F").required().into()]).into(),
                TextField::new("second", "S").required().into(),
            ],
        );
        assert_eq!(
            validate(&schema, FieldValues::new()).unwrap_err(),
            A2uiError::MissingRequiredField("first".into())
        );
        assert_eq!(validate_all(&schema, &FieldValues::new()), vec!["first", "second"]);
    }

    #[test]
    fn test_extra_and_optional_values_are_kept() {
        let schema = incident();
        let mut values = FieldValues::new();
        values.insert("location".into(), FieldValue::text("Dock"));
        values.insert("hazardous".into(), FieldValue::Boolean(false));
        values.insert("not_in_schema".into(), FieldValue::Number(1.0));
        let payload = validate(&schema, values).unwrap();
        assert!(payload.fields().contains_key("not_in_schema"));
    }

    #[test]
    fn test_type_mismatch_is_not_checked() {
        // presence only: a number in a text field satisfies `required`
        let schema = incident();
        let mut values = FieldValues::new();
        values.insert("location".into(), FieldValue::Number(4.0));
        values.insert("hazardous".into(), FieldValue::Boolean(false));
        assert!(validate(&schema, values).is_ok());
    }

    #[test]
    fn test_non_finite_numbers_are_rejected() {
        let schema = UISchema::new(
            "s",
            "S",
            "t",
            vec![SliderField::new("score", "Score", 0.0, 5.0, 1.0, 0.0).required().into()],
        );
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut values = FieldValues::new();
            values.insert("score".into(), FieldValue::Number(bad));
            match validate(&schema, values).unwrap_err() {
                A2uiError::MalformedValue { id, reason } => {
                    assert_eq!(id, "score");
                    assert!(reason.contains("finite"));
                }
                other => panic!("unexpected error: {:?}", other),
            }
        }

        // optional and out-of-schema ids are checked too
        let mut values = FieldValues::new();
        values.insert("score".into(), FieldValue::Number(2.0));
        values.insert("extra".into(), FieldValue::Number(f64::NAN));
        assert!(matches!(
            validate(&schema, values).unwrap_err(),
            A2uiError::MalformedValue { id, .. } if id == "extra"
        ));
    }

    #[test]
    fn test_missing_field_reported_before_bad_number() {
        let schema = incident();
        let mut values = FieldValues::new();
        values.insert("hazardous".into(), FieldValue::Boolean(true));
        values.insert("extra".into(), FieldValue::Number(f64::INFINITY));
        assert_eq!(
            validate(&schema, values).unwrap_err(),
            A2uiError::MissingRequiredField("location".into())
        );
    }
}
