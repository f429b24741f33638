//! API errors and their HTTP mapping.
use a2ui_core::A2uiError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] A2uiError),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Core(A2uiError::MissingRequiredField(_))
            | Self::Core(A2uiError::AgentInferenceFailure(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Core(A2uiError::MalformedSchema(_))
            | Self::Core(A2uiError::DuplicateFieldId(_))
            | Self::Core(A2uiError::MalformedValue { .. })
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Core(A2uiError::ExecutorFailure(_)) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Core(e) => e.code(),
            Self::BadRequest(_) => "bad_request",
            Self::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        } else {
            tracing::warn!(code = self.code(), error = %self, "request rejected");
        }
        let body = ErrorBody {
            code: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(serde_json::json!({ "error": body }))).into_response()
    }
}
