//! A2UI-IN: Free Text to Task Intent
//!
//! This crate provides the reference [`Agent`]: a rule-based inference step
//! that reads a free-text incident report and produces a task type, a few
//! extracted signals, and a form schema tailored to the report.
//!
//! # Example
//!
//! ```ignore
//! use a2ui_core::{Agent, TaskContext};
//! use a2ui_in::RuleBasedIncidentAgent;
//!
//! let agent = RuleBasedIncidentAgent::new();
//! let context = TaskContext::new("warehouse_worker").with_location_hint("Aisle 4");
//!
//! let intent = agent.infer("Broken pallet in aisle 4, leaking, urgent", &context)?;
//! assert_eq!(intent.task_type, "warehouse_incident");
//! println!("signals: {:?}", intent.extracted);
//! ```

pub mod entities;
pub mod incident;
pub mod normalizer;

use a2ui_core::{A2uiError, Agent, Result, TaskContext, TaskIntent};

pub use entities::{extract_signals, signal_map, Signal};
pub use incident::{incident_schema, SCHEMA_ID, TASK_TYPE};

/// Confidence reported for every rule-based match
pub const RULE_CONFIDENCE: f64 = 0.92;

const AGENT_NAME: &str = "RuleBasedIncidentAgent";

/// String-matching agent that always routes to the warehouse incident form.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedIncidentAgent;

impl RuleBasedIncidentAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Agent for RuleBasedIncidentAgent {
    fn infer(&self, input: &str, context: &TaskContext) -> Result<TaskIntent> {
        if normalizer::is_blank(input) {
            return Err(A2uiError::agent("empty input"));
        }

        let normalized = normalizer::normalize(input);
        let extracted = signal_map(&normalized);
        tracing::debug!(signals = extracted.len(), "signals extracted");

        let ui_schema = incident_schema(input, context, &extracted, AGENT_NAME);
        ui_schema.ensure_unique_ids()?;

        Ok(TaskIntent {
            task_type: TASK_TYPE.to_string(),
            confidence: RULE_CONFIDENCE,
            extracted,
            ui_schema,
        })
    }
}
