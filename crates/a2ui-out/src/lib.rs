//! A2UI-OUT: Reference Executor and Presentation
//!
//! This crate provides what sits on either side of a filled-in form:
//! renderers that collect values from a person (or a script), a text view of
//! schemas and results, and a local executor that persists each validated
//! payload as one JSON record.
//!
//! # Example
//!
//! ```ignore
//! use a2ui_core::{Renderer, seed};
//! use a2ui_out::{LocalJsonExecutor, PromptRenderer};
//!
//! let mut renderer = PromptRenderer::new(std::io::stdin().lock(), std::io::stdout())?;
//! renderer.render(&intent.ui_schema, seed(&intent.ui_schema), |values| {
//!     submitted = Some(values);
//! })?;
//!
//! let executor = LocalJsonExecutor::new("./a2ui-records");
//! ```

pub mod executor;
pub mod prompt;
pub mod record;
pub mod scripted;
pub mod view;

use thiserror::Error;

pub use executor::{build_envelope, LocalJsonExecutor, DEFAULT_INLINE_LIMIT};
pub use prompt::{parse_answer, PromptRenderer};
pub use record::{fields_to_record, RecordValue};
pub use scripted::ScriptedRenderer;
pub use view::{display_value, FormView};

/// Errors that can occur while presenting a form
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template load failed: {0}")]
    Template(String),
    #[error("Render failed: {0}")]
    Render(String),
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
