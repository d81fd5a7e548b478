use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{upsert, PersistenceError, WorkflowStore};
use crate::batch::SterilizationBatch;
use crate::packaging::PackagingSession;

const BATCHES_FILE: &str = "batches.json";
const SESSIONS_FILE: &str = "sessions.json";

/// Stores records as pretty-printed JSON arrays in a data directory
#[derive(Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    async fn read_records<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, PersistenceError> {
        let path = self.data_dir.join(name);
        if !fs::try_exists(&path).await? {
            debug!(file = ?path, "No records file yet");
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    async fn write_records<T: Serialize>(&self, name: &str, records: &[T]) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.data_dir).await?;
        let path = self.data_dir.join(name);
        let serialized = serde_json::to_string_pretty(records)?;

        // Write to a temporary file first, then rename over the original
        let temp_path = self.data_dir.join(format!("{name}.tmp"));
        fs::write(&temp_path, serialized).await?;
        fs::rename(&temp_path, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl WorkflowStore for JsonFileStore {
    async fn save_batch(&self, batch: &SterilizationBatch) -> Result<(), PersistenceError> {
        let _guard = self.write_lock.lock().await;
        let mut batches: Vec<SterilizationBatch> = self.read_records(BATCHES_FILE).await?;
        upsert(&mut batches, batch, |b| b.id.as_str());
        self.write_records(BATCHES_FILE, &batches).await?;

        info!(
            batch_id = %batch.id,
            batch_code = %batch.batch_code,
            status = ?batch.status,
            "Batch saved"
        );
        Ok(())
    }

    async fn get_batch(&self, id: &str) -> Result<Option<SterilizationBatch>, PersistenceError> {
        let batches: Vec<SterilizationBatch> = self.read_records(BATCHES_FILE).await?;
        Ok(batches.into_iter().find(|b| b.id == id))
    }

    async fn list_batches(&self) -> Result<Vec<SterilizationBatch>, PersistenceError> {
        self.read_records(BATCHES_FILE).await
    }

    async fn save_session(&self, session: &PackagingSession) -> Result<(), PersistenceError> {
        let _guard = self.write_lock.lock().await;
        let mut sessions: Vec<PackagingSession> = self.read_records(SESSIONS_FILE).await?;
        upsert(&mut sessions, session, |s| s.id.as_str());
        self.write_records(SESSIONS_FILE, &sessions).await?;

        info!(session_id = %session.id, operator = %session.operator, "Packaging session saved");
        Ok(())
    }

    async fn list_sessions(&self) -> Result<Vec<PackagingSession>, PersistenceError> {
        self.read_records(SESSIONS_FILE).await
    }
}
