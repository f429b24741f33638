//! Environment configuration, read once at startup.
use a2ui_core::TaskContext;
use std::path::PathBuf;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8787";
pub const DEFAULT_OUTPUT_DIR: &str = "./a2ui-records";
pub const DEFAULT_ROLE: &str = "warehouse_worker";
pub const DEFAULT_LOG_FILTER: &str = "a2ui=info,tower_http=info";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// `A2UI_ADDR`
    pub addr: String,
    /// `A2UI_OUTPUT_DIR`
    pub output_dir: PathBuf,
    /// `A2UI_ROLE`
    pub user_role: String,
    /// `A2UI_LOCATION_HINT`
    pub location_hint: Option<String>,
    /// `A2UI_LOCALE`
    pub locale: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            user_role: DEFAULT_ROLE.to_string(),
            location_hint: None,
            locale: None,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            addr: get("A2UI_ADDR").unwrap_or(defaults.addr),
            output_dir: get("A2UI_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            user_role: get("A2UI_ROLE").unwrap_or(defaults.user_role),
            location_hint: get("A2UI_LOCATION_HINT"),
            locale: get("A2UI_LOCALE"),
        }
    }

    /// Context used when a request or demo session does not bring its own.
    pub fn default_context(&self) -> TaskContext {
        let mut context = TaskContext::new(self.user_role.as_str());
        if let Some(hint) = &self.location_hint {
            context = context.with_location_hint(hint.as_str());
        }
        if let Some(locale) = &self.locale {
            context = context.with_locale(locale.as_str());
        }
        context
    }
}
