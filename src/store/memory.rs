use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{upsert, PersistenceError, WorkflowStore};
use crate::batch::SterilizationBatch;
use crate::packaging::PackagingSession;

/// In-process store, insertion ordered
#[derive(Debug, Default)]
pub struct MemoryStore {
    batches: RwLock<Vec<SterilizationBatch>>,
    sessions: RwLock<Vec<PackagingSession>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkflowStore for MemoryStore {
    async fn save_batch(&self, batch: &SterilizationBatch) -> Result<(), PersistenceError> {
        let mut batches = self.batches.write().await;
        upsert(&mut *batches, batch, |b| b.id.as_str());
        Ok(())
    }

    async fn get_batch(&self, id: &str) -> Result<Option<SterilizationBatch>, PersistenceError> {
        let batches = self.batches.read().await;
        Ok(batches.iter().find(|b| b.id == id).cloned())
    }

    async fn list_batches(&self) -> Result<Vec<SterilizationBatch>, PersistenceError> {
        Ok(self.batches.read().await.clone())
    }

    async fn save_session(&self, session: &PackagingSession) -> Result<(), PersistenceError> {
        let mut sessions = self.sessions.write().await;
        upsert(&mut *sessions, session, |s| s.id.as_str());
        Ok(())
    }

    async fn list_sessions(&self) -> Result<Vec<PackagingSession>, PersistenceError> {
        Ok(self.sessions.read().await.clone())
    }
}
