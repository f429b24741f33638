//! Schema Model: recursive UI component tree and its wire format.
//!
//! Every component encodes as `{"type": <discriminant>, "payload": {...}}`.
//! Decoding reads the discriminant first and then the payload shape that
//! belongs to it, so an unknown discriminant is an error rather than a
//! silent fallback.
use crate::error::{A2uiError, Result};
use crate::visit::Leaves;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// What a button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UIAction {
    Submit,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumOption {
    pub value: String,
    pub label: String,
}

impl EnumOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Container only: no id, never required on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub title: String,
    pub components: Vec<UIComponent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextField {
    pub id: String,
    pub label: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleField {
    pub id: String,
    pub label: String,
    pub required: bool,
    pub default_value: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderField {
    pub id: String,
    pub label: String,
    pub required: bool,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateField {
    pub id: String,
    pub label: String,
    pub required: bool,
    /// Seed with the current instant.
    pub default_now: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumField {
    pub id: String,
    pub label: String,
    pub required: bool,
    pub options: Vec<EnumOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageField {
    pub id: String,
    pub label: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    pub id: String,
    pub label: String,
    pub action: UIAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum UIComponent {
    Section(Section),
    TextField(TextField),
    ToggleField(ToggleField),
    SliderField(SliderField),
    DateField(DateField),
    EnumField(EnumField),
    ImageField(ImageField),
    Button(Button),
}

impl UIComponent {
    /// Wire discriminant of this component.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Section(_) => "section",
            Self::TextField(_) => "textField",
            Self::ToggleField(_) => "toggleField",
            Self::SliderField(_) => "sliderField",
            Self::DateField(_) => "dateField",
            Self::EnumField(_) => "enumField",
            Self::ImageField(_) => "imageField",
            Self::Button(_) => "button",
        }
    }

    /// Id of a leaf component. Sections have none.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Section(_) => None,
            Self::TextField(f) => Some(&f.id),
            Self::ToggleField(f) => Some(&f.id),
            Self::SliderField(f) => Some(&f.id),
            Self::DateField(f) => Some(&f.id),
            Self::EnumField(f) => Some(&f.id),
            Self::ImageField(f) => Some(&f.id),
            Self::Button(b) => Some(&b.id),
        }
    }

    /// Section title or leaf label.
    pub fn label(&self) -> &str {
        match self {
            Self::Section(s) => &s.title,
            Self::TextField(f) => &f.label,
            Self::ToggleField(f) => &f.label,
            Self::SliderField(f) => &f.label,
            Self::DateField(f) => &f.label,
            Self::EnumField(f) => &f.label,
            Self::ImageField(f) => &f.label,
            Self::Button(b) => &b.label,
        }
    }

    /// Sections and buttons never carry a value.
    pub fn is_value_bearing(&self) -> bool {
        !matches!(self, Self::Section(_) | Self::Button(_))
    }

    /// Required flag of a value-bearing leaf; always false for sections and buttons.
    pub fn is_required(&self) -> bool {
        match self {
            Self::Section(_) | Self::Button(_) => false,
            Self::TextField(f) => f.required,
            Self::ToggleField(f) => f.required,
            Self::SliderField(f) => f.required,
            Self::DateField(f) => f.required,
            Self::EnumField(f) => f.required,
            Self::ImageField(f) => f.required,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| A2uiError::MalformedSchema(e.to_string()))
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| A2uiError::MalformedSchema(e.to_string()))
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// A complete form produced by one inference call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UISchema {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Routing tag shared with the executor.
    pub task_type: String,
    pub components: Vec<UIComponent>,
    /// Provenance such as `generated_by` and the caller's role.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl UISchema {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        task_type: impl Into<String>,
        components: Vec<UIComponent>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: None,
            task_type: task_type.into(),
            components,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Leaf components in pre-order, sections expanded in place.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves::new(&self.components)
    }

    /// First value-bearing leaf with this id.
    pub fn field(&self, id: &str) -> Option<&UIComponent> {
        self.leaves()
            .find(|c| c.is_value_bearing() && c.id() == Some(id))
    }

    /// Rejects schemas where two value-bearing leaves share an id.
    pub fn ensure_unique_ids(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for leaf in self.leaves().filter(|c| c.is_value_bearing()) {
            if let Some(id) = leaf.id() {
                if !seen.insert(id) {
                    return Err(A2uiError::DuplicateFieldId(id.to_string()));
                }
            }
        }
        Ok(())
    }

    /// Decode a schema document and check id uniqueness.
    pub fn from_json(json: &str) -> Result<Self> {
        let schema: Self =
            serde_json::from_str(json).map_err(|e| A2uiError::MalformedSchema(e.to_string()))?;
        schema.ensure_unique_ids()?;
        Ok(schema)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let schema: Self =
            serde_json::from_value(value).map_err(|e| A2uiError::MalformedSchema(e.to_string()))?;
        schema.ensure_unique_ids()?;
        Ok(schema)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// Builders keep hand-written schemas readable.

impl Section {
    pub fn new(title: impl Into<String>, components: Vec<UIComponent>) -> Self {
        Self {
            title: title.into(),
            components,
        }
    }
}

impl TextField {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            required: false,
            placeholder: None,
            default_value: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn default_value(mut self, value: Option<String>) -> Self {
        self.default_value = value;
        self
    }
}

impl ToggleField {
    pub fn new(id: impl Into<String>, label: impl Into<String>, default_value: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            required: false,
            default_value,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl SliderField {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        min: f64,
        max: f64,
        step: f64,
        default_value: f64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            required: false,
            min,
            max,
            step,
            default_value,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl DateField {
    pub fn new(id: impl Into<String>, label: impl Into<String>, default_now: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            required: false,
            default_now,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl EnumField {
    pub fn new(id: impl Into<String>, label: impl Into<String>, options: Vec<EnumOption>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            required: false,
            options,
            default_value: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: Option<String>) -> Self {
        self.default_value = value;
        self
    }
}

impl ImageField {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl Button {
    pub fn new(id: impl Into<String>, label: impl Into<String>, action: UIAction) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            action,
        }
    }
}

macro_rules! into_component {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for UIComponent {
                fn from(inner: $ty) -> Self {
                    UIComponent::$ty(inner)
                }
            }
        )*
    };
}

into_component!(Section, TextField, ToggleField, SliderField, DateField, EnumField, ImageField, Button);
