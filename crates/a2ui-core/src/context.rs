//! Task Context: caller-supplied, immutable input to inference and execution
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCALE: &str = "en_US";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskContext {
    pub user_role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_hint: Option<String>,
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

impl TaskContext {
    pub fn new(user_role: impl Into<String>) -> Self {
        Self {
            user_role: user_role.into(),
            location_hint: None,
            locale: default_locale(),
        }
    }

    pub fn with_location_hint(mut self, hint: impl Into<String>) -> Self {
        self.location_hint = Some(hint.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}
