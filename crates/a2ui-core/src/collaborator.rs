//! Collaborator contracts: the seams the engine is built around.
use crate::context::TaskContext;
use crate::data_model::{ExecutionResult, TaskIntent, ValidatedPayload};
use crate::error::Result;
use crate::schema::UISchema;
use crate::value::FieldValues;

/// Turns free text into a task type and a freshly generated schema.
pub trait Agent: Send + Sync {
    /// Fails with `AgentInferenceFailure` on unrecoverable input.
    fn infer(&self, input: &str, context: &TaskContext) -> Result<TaskIntent>;
}

/// Durably processes a payload that already passed validation.
pub trait Executor: Send + Sync {
    /// Fails with `ExecutorFailure` when the backend cannot persist.
    fn execute(
        &self,
        task_type: &str,
        payload: ValidatedPayload,
        context: &TaskContext,
    ) -> Result<ExecutionResult>;
}

/// Presents a schema and collects the final value map.
///
/// The renderer owns `initial` exclusively while editing. On confirmation it
/// hands the finished map to `on_complete`, which can run at most once. A
/// cancelled session returns without calling it.
pub trait Renderer {
    type Error: std::error::Error;

    fn render<F>(
        &mut self,
        schema: &UISchema,
        initial: FieldValues,
        on_complete: F,
    ) -> std::result::Result<(), Self::Error>
    where
        F: FnOnce(FieldValues);
}
