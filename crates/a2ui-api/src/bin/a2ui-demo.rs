//! Interactive demo: describe an incident, fill the generated form, record it.
//!
//! The description comes from the command line, or from the first line of
//! stdin when no arguments are given.
use a2ui_api::{init_tracing, ApiConfig};
use a2ui_core::{Engine, Renderer};
use a2ui_in::RuleBasedIncidentAgent;
use a2ui_out::{FormView, LocalJsonExecutor, PromptRenderer};
use anyhow::Context;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = ApiConfig::from_env();
    let context = config.default_context();
    let executor = Arc::new(LocalJsonExecutor::new(config.output_dir.clone()));
    let engine = Engine::new(Arc::new(RuleBasedIncidentAgent::new()), executor.clone());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let description = if args.is_empty() {
        write!(stdout, "Describe the incident: ")?;
        stdout.flush()?;
        let mut line = String::new();
        input.read_line(&mut line).context("read description")?;
        line.trim().to_string()
    } else {
        args.join(" ")
    };

    let intent = engine.infer_task(&description, &context)?;
    let view = FormView::new()?;
    writeln!(stdout, "{}", view.intent(&intent)?)?;

    let initial = engine.seed_for(&intent);
    let mut submitted = None;
    let mut renderer = PromptRenderer::new(input, stdout)?;
    renderer.render(&intent.ui_schema, initial, |values| submitted = Some(values))?;
    let mut stdout = renderer.into_output();

    let Some(values) = submitted else {
        writeln!(stdout, "Cancelled, nothing recorded.")?;
        return Ok(());
    };

    let result = engine.execute(&intent.task_type, &intent.ui_schema, values, &context)?;
    writeln!(stdout, "{}", view.result(&result)?)?;
    writeln!(
        stdout,
        "Saved to {}",
        executor.record_path(&result.reference_id).display()
    )?;
    Ok(())
}
