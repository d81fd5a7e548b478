//! Persistence seam for batches and packaging sessions
//!
//! The workflow types never touch storage themselves. Callers hand finished
//! records to a [`WorkflowStore`]. Saving a record with an existing id
//! replaces it (last write wins).

use async_trait::async_trait;
use thiserror::Error;

use crate::batch::SterilizationBatch;
use crate::packaging::PackagingSession;

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[async_trait]
pub trait WorkflowStore: Send + Sync {
    async fn save_batch(&self, batch: &SterilizationBatch) -> Result<(), PersistenceError>;

    async fn get_batch(&self, id: &str) -> Result<Option<SterilizationBatch>, PersistenceError>;

    /// First stored batch whose code matches exactly
    async fn find_batch_by_code(
        &self,
        code: &str,
    ) -> Result<Option<SterilizationBatch>, PersistenceError> {
        let batches = self.list_batches().await?;
        Ok(crate::batch::get_batch_by_code(code, &batches).cloned())
    }

    async fn list_batches(&self) -> Result<Vec<SterilizationBatch>, PersistenceError>;

    async fn save_session(&self, session: &PackagingSession) -> Result<(), PersistenceError>;

    async fn list_sessions(&self) -> Result<Vec<PackagingSession>, PersistenceError>;
}

/// Replace the record with a matching id, or append it
pub(crate) fn upsert<T: Clone>(records: &mut Vec<T>, record: &T, id_of: impl Fn(&T) -> &str) {
    match records.iter_mut().find(|r| id_of(r) == id_of(record)) {
        Some(existing) => *existing = record.clone(),
        None => records.push(record.clone()),
    }
}
