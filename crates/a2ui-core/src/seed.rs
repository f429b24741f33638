//! Default Seeding: initial value map from declared defaults.
use crate::schema::{UIComponent, UISchema};
use crate::value::{FieldValue, FieldValues};
use chrono::{DateTime, Utc};

/// Seed a fresh value map, resolving `defaultNow` dates to the current instant.
pub fn seed(schema: &UISchema) -> FieldValues {
    seed_at(schema, Utc::now())
}

/// Seed a fresh value map against an explicit clock. Pure in `schema` and `now`.
pub fn seed_at(schema: &UISchema, now: DateTime<Utc>) -> FieldValues {
    let mut values = FieldValues::new();
    seed_into_at(schema, &mut values, now);
    values
}

/// Fill keys missing from a live map; values already present are never touched.
/// Returns how many keys were added.
pub fn seed_into(schema: &UISchema, values: &mut FieldValues) -> usize {
    seed_into_at(schema, values, Utc::now())
}

pub fn seed_into_at(schema: &UISchema, values: &mut FieldValues, now: DateTime<Utc>) -> usize {
    let mut added = 0;
    for leaf in schema.leaves() {
        let Some((id, value)) = default_for(leaf, now) else {
            continue;
        };
        if !values.contains_key(id) {
            values.insert(id.to_string(), value);
            added += 1;
        }
    }
    tracing::debug!(schema = %schema.id, added, total = values.len(), "seeded defaults");
    added
}

/// Declared default of a single leaf, if it has one.
pub fn default_for(component: &UIComponent, now: DateTime<Utc>) -> Option<(&str, FieldValue)> {
    match component {
        UIComponent::TextField(f) => f
            .default_value
            .as_ref()
            .map(|dv| (f.id.as_str(), FieldValue::Text(dv.clone()))),
        UIComponent::ToggleField(f) => Some((f.id.as_str(), FieldValue::Boolean(f.default_value))),
        UIComponent::SliderField(f) => Some((f.id.as_str(), FieldValue::Number(f.default_value))),
        UIComponent::DateField(f) => f.default_now.then(|| (f.id.as_str(), FieldValue::Timestamp(now))),
        UIComponent::EnumField(f) => f
            .default_value
            .as_ref()
            .or_else(|| f.options.first().map(|o| &o.value))
            .map(|dv| (f.id.as_str(), FieldValue::Text(dv.clone()))),
        UIComponent::ImageField(_) | UIComponent::Button(_) | UIComponent::Section(_) => None,
    }
}
