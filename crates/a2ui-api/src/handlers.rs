//! API Handlers
use crate::error::ApiError;
use crate::AppState;
use a2ui_core::{
    decode_values_from, encode_values, seed, A2uiError, ExecutionResult, TaskContext, TaskIntent,
    UISchema, A2UI_VERSION,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferRequest {
    pub input: String,
    #[serde(default)]
    pub context: Option<TaskContext>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRequest {
    pub schema: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    pub task_type: String,
    pub schema: Value,
    /// `id -> value` object; `null` or absent means no values.
    #[serde(default)]
    pub values: Value,
    #[serde(default)]
    pub context: Option<TaskContext>,
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(inner)| inner)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Collaborators are synchronous; keep them off the async workers.
async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> a2ui_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}

pub async fn infer(
    State(state): State<AppState>,
    payload: Result<Json<InferRequest>, JsonRejection>,
) -> Result<Json<TaskIntent>, ApiError> {
    let request = body(payload)?;
    let context = request
        .context
        .unwrap_or_else(|| state.config.default_context());

    let engine = state.engine.clone();
    let intent = blocking(move || engine.infer_task(&request.input, &context)).await?;
    state.metrics.inferences.inc();
    Ok(Json(intent))
}

pub async fn seed_values(
    payload: Result<Json<SeedRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = body(payload)?;
    let schema = UISchema::from_value(request.schema)?;
    let values = seed(&schema);
    tracing::debug!(schema = %schema.id, seeded = values.len(), "schema seeded");
    Ok(Json(json!({ "values": encode_values(&values) })))
}

pub async fn execute(
    State(state): State<AppState>,
    payload: Result<Json<ExecuteRequest>, JsonRejection>,
) -> Result<Json<ExecutionResult>, ApiError> {
    let request = body(payload)?;
    let schema = UISchema::from_value(request.schema)?;
    let values = decode_values_from(&schema, &request.values)?;
    let context = request
        .context
        .unwrap_or_else(|| state.config.default_context());

    let engine = state.engine.clone();
    let task_type = request.task_type;
    let outcome =
        blocking(move || engine.execute(&task_type, &schema, values, &context)).await;

    state.metrics.record_execution(match &outcome {
        Ok(_) => "ok",
        Err(ApiError::Core(
            A2uiError::MissingRequiredField(_) | A2uiError::MalformedValue { .. },
        )) => "invalid",
        Err(_) => "failed",
    });
    outcome.map(Json)
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "version": A2UI_VERSION })),
    )
}

pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let text = state
        .metrics
        .encode()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        text,
    ))
}
