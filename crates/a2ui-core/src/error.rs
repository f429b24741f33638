//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum A2uiError {
    /// A required field is absent, blank text, or an empty blob.
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("AGENT/{0}")]
    AgentInferenceFailure(String),

    #[error("EXEC/{0}")]
    ExecutorFailure(String),

    #[error("SCHEMA/{0}")]
    MalformedSchema(String),

    #[error("SCHEMA/duplicate field id: {0}")]
    DuplicateFieldId(String),

    #[error("VALUE/{id}: {reason}")]
    MalformedValue { id: String, reason: String },
}

impl A2uiError {
    /// Stable short code, used by transports that need a machine-readable kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequiredField(_) => "missing_required_field",
            Self::AgentInferenceFailure(_) => "agent_inference_failure",
            Self::ExecutorFailure(_) => "executor_failure",
            Self::MalformedSchema(_) => "malformed_schema",
            Self::DuplicateFieldId(_) => "duplicate_field_id",
            Self::MalformedValue { .. } => "malformed_value",
        }
    }

    pub fn agent(reason: impl Into<String>) -> Self {
        Self::AgentInferenceFailure(reason.into())
    }

    pub fn executor(reason: impl Into<String>) -> Self {
        Self::ExecutorFailure(reason.into())
    }
}

impl From<serde_json::Error> for A2uiError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedSchema(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, A2uiError>;
