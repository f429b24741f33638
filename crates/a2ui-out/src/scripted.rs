//! Headless renderer that applies preset edits.
use a2ui_core::{FieldValue, FieldValues, Renderer, UISchema};
use std::convert::Infallible;

#[derive(Debug, Clone, Default)]
pub struct ScriptedRenderer {
    edits: FieldValues,
    removals: Vec<String>,
    cancel: bool,
}

impl ScriptedRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, id: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.edits.insert(id.into(), value.into());
        self
    }

    pub fn clear(mut self, id: impl Into<String>) -> Self {
        self.removals.push(id.into());
        self
    }

    /// End the session without completing.
    pub fn cancelled(mut self) -> Self {
        self.cancel = true;
        self
    }
}

impl Renderer for ScriptedRenderer {
    type Error = Infallible;

    fn render<F>(
        &mut self,
        schema: &UISchema,
        initial: FieldValues,
        on_complete: F,
    ) -> Result<(), Infallible>
    where
        F: FnOnce(FieldValues),
    {
        if self.cancel {
            return Ok(());
        }
        let mut values = initial;
        for id in &self.removals {
            values.remove(id);
        }
        values.extend(self.edits.iter().map(|(k, v)| (k.clone(), v.clone())));
        tracing::debug!(schema = %schema.id, fields = values.len(), "scripted render complete");
        on_complete(values);
        Ok(())
    }
}
