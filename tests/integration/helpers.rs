//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use content_core::config::content::ContentConfig;
use content_core::error::AppError;
use content_core::result::AppResult;
use content_core::traits::{ChangeSink, RenderSurface, SnapshotSource};
use content_core::types::{FileId, FilePriority, FileRecord, RowPatch, RowView};
use content_service::ContentSession;

/// Snapshot source fed from a queue of prepared payloads
#[derive(Debug, Default)]
pub struct ScriptedSource {
    queue: Mutex<VecDeque<AppResult<Vec<FileRecord>>>>,
}

impl ScriptedSource {
    pub fn push(&self, records: Vec<FileRecord>) {
        self.queue.lock().unwrap().push_back(Ok(records));
    }

    pub fn push_json(&self, payload: serde_json::Value) {
        let records = serde_json::from_value(payload).map_err(AppError::from);
        self.queue.lock().unwrap().push_back(records);
    }

    pub fn fail(&self, message: &str) {
        self.queue
            .lock()
            .unwrap()
            .push_back(Err(AppError::external(message)));
    }
}

#[async_trait]
impl SnapshotSource for ScriptedSource {
    async fn fetch(&self) -> AppResult<Vec<FileRecord>> {
        self.queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::external("snapshot queue empty")))
    }
}

/// Render surface that remembers every call
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub replaced: Mutex<Vec<Vec<RowView>>>,
    pub patched: Mutex<Vec<Vec<RowPatch>>>,
}

impl RecordingSurface {
    pub fn replace_count(&self) -> usize {
        self.replaced.lock().unwrap().len()
    }

    pub fn last_rows(&self) -> Vec<RowView> {
        self.replaced.lock().unwrap().last().cloned().unwrap_or_default()
    }

    pub fn patch_batches(&self) -> Vec<Vec<RowPatch>> {
        self.patched.lock().unwrap().clone()
    }
}

impl RenderSurface for RecordingSurface {
    fn replace(&self, rows: &[RowView]) {
        self.replaced.lock().unwrap().push(rows.to_vec());
    }

    fn patch(&self, patches: &[RowPatch]) {
        self.patched.lock().unwrap().push(patches.to_vec());
    }
}

/// Change sink that remembers every call
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub calls: Mutex<Vec<(Vec<FileId>, FilePriority)>>,
}

impl ChangeSink for RecordingSink {
    fn priority_changed(&self, file_ids: &[FileId], priority: FilePriority) -> AppResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((file_ids.to_vec(), priority));
        Ok(())
    }
}

/// Test session wired to recording collaborators
pub struct TestSession {
    pub session: ContentSession,
    pub source: Arc<ScriptedSource>,
    pub surface: Arc<RecordingSurface>,
    pub sink: Arc<RecordingSink>,
}

impl TestSession {
    pub fn new() -> Self {
        Self::with_config(ContentConfig::default())
    }

    pub fn with_config(config: ContentConfig) -> Self {
        let source = Arc::new(ScriptedSource::default());
        let surface = Arc::new(RecordingSurface::default());
        let sink = Arc::new(RecordingSink::default());
        let session = ContentSession::new(
            &config,
            source.clone(),
            surface.clone(),
            Some(sink.clone()),
        );
        Self {
            session,
            source,
            surface,
            sink,
        }
    }
}

/// Three files in two folders: a(0) a/x(1) a/y(2) b(3) b/z(4)
pub fn scenario() -> Vec<FileRecord> {
    vec![
        FileRecord::new("a/x", 100, FilePriority::Normal),
        FileRecord::new("a/y", 100, FilePriority::Normal),
        FileRecord::new("b/z", 100, FilePriority::Ignored),
    ]
}
