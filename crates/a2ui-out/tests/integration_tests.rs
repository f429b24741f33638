//! Integration tests for A2UI-OUT: renderers and executor behind the engine.

use a2ui_core::{
    seed, A2uiError, Agent, Engine, FieldValue, FieldValues, ImageField, Renderer, Result,
    Section, TaskContext, TaskIntent, TextField, ToggleField, UISchema,
};
use a2ui_out::{FormView, LocalJsonExecutor, PromptRenderer, ScriptedRenderer};
use std::collections::{BTreeMap, HashSet};
use std::io::Cursor;
use std::sync::{Arc, Barrier};
use std::thread;

fn incident_schema() -> UISchema {
    UISchema::new(
        "incident_v1",
        "Report Incident",
        "warehouse_incident",
        vec![
            Section::new(
                "Evidence",
                vec![ImageField::new("photo", "Photo").required().into()],
            )
            .into(),
            Section::new(
                "Details",
                vec![
                    TextField::new("location", "Location")
                        .required()
                        .default_value(Some("Aisle 4".into()))
                        .into(),
                    ToggleField::new("hazardous", "Hazardous", true).required().into(),
                ],
            )
            .into(),
        ],
    )
    .with_metadata("generated_by", "integration")
}

struct FixedAgent;

impl Agent for FixedAgent {
    fn infer(&self, _input: &str, _context: &TaskContext) -> Result<TaskIntent> {
        Ok(TaskIntent {
            task_type: "warehouse_incident".into(),
            confidence: 0.92,
            extracted: BTreeMap::new(),
            ui_schema: incident_schema(),
        })
    }
}

fn engine(dir: &std::path::Path) -> Engine {
    Engine::new(Arc::new(FixedAgent), Arc::new(LocalJsonExecutor::new(dir)))
}

fn collect<R: Renderer>(renderer: &mut R, schema: &UISchema, initial: FieldValues) -> Option<FieldValues> {
    let mut submitted = None;
    renderer
        .render(schema, initial, |values| submitted = Some(values))
        .ok()?;
    submitted
}

// ============================================================================
// Scripted sessions
// ============================================================================

#[test]
fn test_scripted_session_is_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine(dir.path());
    let context = TaskContext::new("warehouse_worker");

    let intent = engine.infer_task("pallet fell", &context).unwrap();
    let values = collect(
        &mut ScriptedRenderer::new().set("photo", FieldValue::Binary(b"jpeg".to_vec())),
        &intent.ui_schema,
        engine.seed_for(&intent),
    )
    .unwrap();

    let result = engine
        .execute(&intent.task_type, &intent.ui_schema, values, &context)
        .unwrap();
    assert!(result.ok);

    let record: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join(format!("a2ui-{}.json", result.reference_id))).unwrap())
            .unwrap();
    assert_eq!(record["fields"]["photo"], "anBlZw==");
    assert_eq!(record["fields"]["location"], "Aisle 4");
    assert_eq!(record["fields"]["hazardous"], true);
    assert_eq!(record["metadata"]["generated_by"], "integration");
}

#[test]
fn test_missing_photo_never_reaches_disk() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine(dir.path());
    let schema = incident_schema();

    let values = collect(&mut ScriptedRenderer::new(), &schema, seed(&schema)).unwrap();
    let err = engine
        .execute("warehouse_incident", &schema, values, &TaskContext::new("worker"))
        .unwrap_err();

    assert_eq!(err, A2uiError::MissingRequiredField("photo".into()));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_cancelled_session_produces_nothing() {
    let schema = incident_schema();
    assert!(collect(&mut ScriptedRenderer::new().cancelled(), &schema, seed(&schema)).is_none());
}

#[test]
fn test_parallel_executions_keep_every_record() {
    const SUBMISSIONS: usize = 24;
    let dir = tempfile::tempdir().unwrap();
    let engine = engine(dir.path());
    let barrier = Arc::new(Barrier::new(SUBMISSIONS));

    let handles: Vec<_> = (0..SUBMISSIONS)
        .map(|i| {
            let engine = engine.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let schema = incident_schema();
                let mut values = seed(&schema);
                values.insert("photo".into(), FieldValue::Binary(vec![i as u8 + 1]));
                barrier.wait();
                engine.execute(
                    "warehouse_incident",
                    &schema,
                    values,
                    &TaskContext::new("worker"),
                )
            })
        })
        .collect();

    let references: HashSet<String> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap().reference_id)
        .collect();
    assert_eq!(references.len(), SUBMISSIONS);

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), SUBMISSIONS);
    for reference in &references {
        let path = dir.path().join(format!("a2ui-{}.json", reference));
        let record: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(record["referenceId"], reference.as_str());
    }
}

// ============================================================================
// Prompt sessions
// ============================================================================

#[test]
fn test_prompt_session_reads_photo_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let photo = dir.path().join("photo.jpg");
    std::fs::write(&photo, b"\xff\xd8jpeg").unwrap();

    let schema = incident_schema();
    let script = format!("{}\n\nno\n", photo.display());
    let mut renderer = PromptRenderer::new(Cursor::new(script.into_bytes()), Vec::new()).unwrap();
    let values = collect(&mut renderer, &schema, seed(&schema)).unwrap();

    assert_eq!(values["photo"], FieldValue::Binary(b"\xff\xd8jpeg".to_vec()));
    assert_eq!(values["location"], FieldValue::text("Aisle 4"));
    assert_eq!(values["hazardous"], FieldValue::Boolean(false));

    let transcript = String::from_utf8(renderer.into_output()).unwrap();
    assert!(transcript.contains("Report Incident"));
    assert!(transcript.contains("[EVIDENCE]"));
}

#[test]
fn test_prompt_rejects_unreadable_photo_then_accepts() {
    let dir = tempfile::tempdir().unwrap();
    let photo = dir.path().join("photo.jpg");
    std::fs::write(&photo, b"img").unwrap();

    let schema = incident_schema();
    let script = format!("/definitely/not/here.jpg\n{}\n\n\n", photo.display());
    let mut renderer = PromptRenderer::new(Cursor::new(script.into_bytes()), Vec::new()).unwrap();
    let values = collect(&mut renderer, &schema, seed(&schema)).unwrap();
    assert_eq!(values["photo"], FieldValue::Binary(b"img".to_vec()));

    let transcript = String::from_utf8(renderer.into_output()).unwrap();
    assert!(transcript.contains("cannot read /definitely/not/here.jpg"));
}

// ============================================================================
// Views
// ============================================================================

#[test]
fn test_intent_view_lists_signals() {
    let mut extracted = BTreeMap::new();
    extracted.insert("aisle".to_string(), "4".to_string());
    let intent = TaskIntent {
        task_type: "warehouse_incident".into(),
        confidence: 0.92,
        extracted,
        ui_schema: incident_schema(),
    };
    let text = FormView::new().unwrap().intent(&intent).unwrap();
    assert!(text.contains("Task: warehouse_incident (92% confidence)"));
    assert!(text.contains("- aisle: 4"));
}
