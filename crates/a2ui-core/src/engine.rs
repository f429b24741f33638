//! Engine: binds inference, validation and execution.
use crate::collaborator::{Agent, Executor};
use crate::context::TaskContext;
use crate::data_model::{ExecutionResult, TaskIntent};
use crate::error::Result;
use crate::schema::UISchema;
use crate::seed::seed;
use crate::validator::validate;
use crate::value::FieldValues;
use std::sync::Arc;

/// Stateless façade over one agent and one executor.
///
/// `execute` always validates first; an executor never observes a value map
/// that did not pass the validator.
#[derive(Clone)]
pub struct Engine {
    agent: Arc<dyn Agent>,
    executor: Arc<dyn Executor>,
}

impl Engine {
    pub fn new(agent: Arc<dyn Agent>, executor: Arc<dyn Executor>) -> Self {
        Self { agent, executor }
    }

    pub fn infer_task(&self, input: &str, context: &TaskContext) -> Result<TaskIntent> {
        let intent = self.agent.infer(input, context).map_err(|e| {
            tracing::error!(error = %e, "inference failed");
            e
        })?;
        tracing::info!(
            task_type = %intent.task_type,
            confidence = intent.confidence,
            schema = %intent.ui_schema.id,
            "task inferred"
        );
        Ok(intent)
    }

    /// Initial values for an inferred schema.
    pub fn seed_for(&self, intent: &TaskIntent) -> FieldValues {
        seed(&intent.ui_schema)
    }

    pub fn execute(
        &self,
        task_type: &str,
        schema: &UISchema,
        values: FieldValues,
        context: &TaskContext,
    ) -> Result<ExecutionResult> {
        let payload = validate(schema, values)?;

        let result = self
            .executor
            .execute(task_type, payload, context)
            .map_err(|e| {
                tracing::error!(task_type, error = %e, "execution failed");
                e
            })?;
        tracing::info!(
            task_type,
            reference = %result.reference_id,
            warnings = result.warnings.len(),
            "task executed"
        );
        Ok(result)
    }
}
