//! A2UI Core: schema-driven form model, seeding, validation and task engine
//!
//! A task-specific form travels through four steps:
//!
//! ```text
//! input text ─▶ Agent ─▶ TaskIntent{UISchema} ─▶ seed ─▶ Renderer ─▶ values
//!                                                                     │
//!           ExecutionResult ◀─ Executor ◀─ ValidatedPayload ◀─ validate
//! ```
//!
//! Only [`validate`] can produce a [`ValidatedPayload`], and [`Engine::execute`]
//! always runs it before the executor sees anything.

pub mod codec;
pub mod collaborator;
pub mod context;
pub mod data_model;
pub mod engine;
pub mod error;
pub mod schema;
pub mod seed;
pub mod validator;
pub mod value;
pub mod visit;

pub use codec::{decode_values, decode_values_from, encode_values};
pub use collaborator::{Agent, Executor, Renderer};
pub use context::TaskContext;
pub use data_model::{ExecutionResult, TaskIntent, ValidatedPayload};
pub use engine::Engine;
pub use error::{A2uiError, Result};
pub use schema::{
    Button, DateField, EnumField, EnumOption, ImageField, Section, SliderField, TextField,
    ToggleField, UIAction, UIComponent, UISchema,
};
pub use seed::{seed, seed_at, seed_into, seed_into_at};
pub use validator::{validate, validate_all};
pub use value::{FieldValue, FieldValues};
pub use visit::{required_ids, Leaves};

/// Version of the A2UI runtime
pub const A2UI_VERSION: &str = "0.1.0";
