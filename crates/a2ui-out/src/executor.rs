//! Local JSON executor: one pretty-printed record file per execution.
use crate::record::{fields_to_record, strings_to_record, RecordValue};
use a2ui_core::value::format_timestamp;
use a2ui_core::{A2uiError, ExecutionResult, Executor, FieldValue, Result, TaskContext, ValidatedPayload};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Inline blobs above this size are persisted but flagged.
pub const DEFAULT_INLINE_LIMIT: usize = 5 * 1024 * 1024;

const REFERENCE_PREFIX: &str = "INC-";
const FILE_PREFIX: &str = "a2ui-";
/// Collision suffixes tried within one second before giving up.
const MAX_SUFFIX: u32 = 10_000;

#[derive(Debug, Clone)]
pub struct LocalJsonExecutor {
    output_dir: PathBuf,
    inline_limit: usize,
}

impl LocalJsonExecutor {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            inline_limit: DEFAULT_INLINE_LIMIT,
        }
    }

    pub fn with_inline_limit(mut self, bytes: usize) -> Self {
        self.inline_limit = bytes;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File a record with this reference id is written to.
    pub fn record_path(&self, reference_id: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}{}.json", FILE_PREFIX, reference_id))
    }

    fn warnings(&self, payload: &ValidatedPayload) -> Vec<String> {
        payload
            .fields()
            .iter()
            .filter_map(|(id, value)| match value {
                FieldValue::Binary(bytes) if bytes.len() > self.inline_limit => Some(format!(
                    "field '{}' stores {} bytes inline; large attachments belong in blob storage",
                    id,
                    bytes.len()
                )),
                _ => None,
            })
            .collect()
    }

    /// Write one record under the first free reference for `now`.
    ///
    /// `INC-<epoch seconds>` is tried first, then `-1`, `-2`, ... Each name is
    /// claimed with a no-clobber persist of a private temp file, so concurrent
    /// writers never share a reference or replace each other's record.
    fn write_record(
        &self,
        now: DateTime<Utc>,
        task_type: &str,
        payload: &ValidatedPayload,
        context: &TaskContext,
    ) -> Result<(String, Vec<u8>)> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            A2uiError::executor(format!(
                "cannot create {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let base = format!("{}{}", REFERENCE_PREFIX, now.timestamp());
        for n in 0..=MAX_SUFFIX {
            let reference = if n == 0 {
                base.clone()
            } else {
                format!("{}-{}", base, n)
            };
            let path = self.record_path(&reference);
            if path.exists() {
                continue;
            }

            let envelope = build_envelope(&reference, task_type, now, payload, context);
            let data = serde_json::to_vec_pretty(&envelope)
                .map_err(|e| A2uiError::executor(format!("encode record: {}", e)))?;

            let mut tmp = NamedTempFile::new_in(&self.output_dir)
                .and_then(|mut tmp| tmp.write_all(&data).map(|_| tmp))
                .map_err(|e| {
                    A2uiError::executor(format!(
                        "stage record in {}: {}",
                        self.output_dir.display(),
                        e
                    ))
                })?;
            tmp.flush()
                .map_err(|e| A2uiError::executor(format!("stage record: {}", e)))?;

            match tmp.persist_noclobber(&path) {
                Ok(_) => return Ok((reference, data)),
                Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                    tracing::debug!(%reference, "reference taken, trying next");
                }
                Err(e) => {
                    return Err(A2uiError::executor(format!(
                        "write {}: {}",
                        path.display(),
                        e.error
                    )))
                }
            }
        }
        Err(A2uiError::executor(format!(
            "no free reference left for {}",
            base
        )))
    }
}

/// Persisted document for one execution.
pub fn build_envelope(
    reference_id: &str,
    task_type: &str,
    timestamp: DateTime<Utc>,
    payload: &ValidatedPayload,
    context: &TaskContext,
) -> RecordValue {
    let mut envelope = BTreeMap::new();
    envelope.insert("referenceId".to_string(), RecordValue::str(reference_id));
    envelope.insert("taskType".to_string(), RecordValue::str(task_type));
    envelope.insert(
        "timestamp".to_string(),
        RecordValue::str(format_timestamp(&timestamp)),
    );
    envelope.insert("userRole".to_string(), RecordValue::str(context.user_role.as_str()));
    envelope.insert("fields".to_string(), fields_to_record(payload.fields()));
    envelope.insert("metadata".to_string(), strings_to_record(payload.metadata()));
    RecordValue::Map(envelope)
}

impl Executor for LocalJsonExecutor {
    fn execute(
        &self,
        task_type: &str,
        payload: ValidatedPayload,
        context: &TaskContext,
    ) -> Result<ExecutionResult> {
        let (reference, data) = self.write_record(Utc::now(), task_type, &payload, context)?;
        tracing::info!(
            reference = %reference,
            path = %self.record_path(&reference).display(),
            bytes = data.len(),
            "record written"
        );

        let mut result =
            ExecutionResult::success(reference, String::from_utf8_lossy(&data).into_owned());
        for warning in self.warnings(&payload) {
            tracing::warn!(%warning, "record written with warning");
            result = result.with_warning(warning);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a2ui_core::{validate, FieldValues, TextField, UISchema};
    use std::collections::HashSet;
    use std::sync::{Arc, Barrier};
    use std::thread;

    fn payload(extra: Option<(&str, FieldValue)>) -> ValidatedPayload {
        let schema = UISchema::new(
            "s",
            "S",
            "warehouse_incident",
            vec![TextField::new("location", "Location").required().into()],
        )
        .with_metadata("generated_by", "test");
        let mut values = FieldValues::new();
        values.insert("location".into(), FieldValue::text("Aisle 4"));
        if let Some((id, v)) = extra {
            values.insert(id.into(), v);
        }
        validate(&schema, values).unwrap()
    }

    #[test]
    fn test_writes_record_named_after_reference() {
        let dir = tempfile::tempdir().unwrap();
        let executor = LocalJsonExecutor::new(dir.path().join("records"));
        let result = executor
            .execute("warehouse_incident", payload(None), &TaskContext::new("worker"))
            .unwrap();

        assert!(result.ok);
        assert!(result.reference_id.starts_with("INC-"));
        assert!(result.warnings.is_empty());

        let path = executor.record_path(&result.reference_id);
        let on_disk = fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, result.payload_preview);

        let json: serde_json::Value = serde_json::from_str(&on_disk).unwrap();
        assert_eq!(json["referenceId"], result.reference_id.as_str());
        assert_eq!(json["taskType"], "warehouse_incident");
        assert_eq!(json["userRole"], "worker");
        assert_eq!(json["fields"]["location"], "Aisle 4");
        assert_eq!(json["metadata"]["generated_by"], "test");
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_same_second_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let executor = LocalJsonExecutor::new(dir.path());
        let context = TaskContext::new("worker");
        let now = Utc::now();

        let (first, _) = executor.write_record(now, "t", &payload(None), &context).unwrap();
        let (second, _) = executor.write_record(now, "t", &payload(None), &context).unwrap();
        assert_eq!(second, format!("{}-1", first));
        assert!(executor.record_path(&first).exists());
        assert!(executor.record_path(&second).exists());
    }

    #[test]
    fn test_concurrent_writers_in_one_second_get_distinct_records() {
        const WRITERS: usize = 16;
        let dir = tempfile::tempdir().unwrap();
        let executor = Arc::new(LocalJsonExecutor::new(dir.path()));
        let barrier = Arc::new(Barrier::new(WRITERS));
        let now = Utc::now();

        let handles: Vec<_> = (0..WRITERS)
            .map(|_| {
                let executor = Arc::clone(&executor);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    executor
                        .write_record(now, "t", &payload(None), &TaskContext::new("worker"))
                        .map(|(reference, _)| reference)
                })
            })
            .collect();
        let references: HashSet<String> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();

        assert_eq!(references.len(), WRITERS);
        let files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(files.len(), WRITERS);
        for reference in &references {
            let json: serde_json::Value =
                serde_json::from_str(&fs::read_to_string(executor.record_path(reference)).unwrap())
                    .unwrap();
            assert_eq!(json["referenceId"], reference.as_str());
        }
    }

    #[test]
    fn test_large_inline_blob_is_flagged() {
        let dir = tempfile::tempdir().unwrap();
        let executor = LocalJsonExecutor::new(dir.path()).with_inline_limit(4);
        let result = executor
            .execute(
                "warehouse_incident",
                payload(Some(("photo", FieldValue::Binary(vec![0; 16])))),
                &TaskContext::new("worker"),
            )
            .unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("photo"));
    }

    #[test]
    fn test_unwritable_directory_is_executor_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, b"file").unwrap();
        let executor = LocalJsonExecutor::new(blocker.join("records"));
        let err = executor
            .execute("warehouse_incident", payload(None), &TaskContext::new("worker"))
            .unwrap_err();
        assert!(matches!(err, A2uiError::ExecutorFailure(_)));
    }
}
