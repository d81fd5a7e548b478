//! JSON file store tests
//!
//! Each test works in its own temporary data directory.

use chrono::Utc;
use cliniio::{
    BatchLifecycle, BatchStatus, JsonFileStore, PackagingSessionManager, SterilizationBatch,
    WorkflowStore,
};
use tempfile::TempDir;

fn packaged_batch(code: &str, tools: &[&str]) -> SterilizationBatch {
    let mut sessions = PackagingSessionManager::new();
    sessions.start_packaging_session("Dr. Smith", tools.len() > 1, None);
    for tool in tools {
        sessions.add_tool_to_session(tool);
    }
    let session = sessions.end_packaging_session().unwrap();
    SterilizationBatch::from_session(&session, code, Utc::now())
}

#[tokio::test]
async fn test_empty_directory_has_no_records() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("data"));

    assert!(store.list_batches().await.unwrap().is_empty());
    assert!(store.list_sessions().await.unwrap().is_empty());
    assert!(store.get_batch("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_batch_round_trips_through_disk() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path());

    let batch = packaged_batch("20240301-1030-A1B", &["T-001", "T-002"]);
    store.save_batch(&batch).await.unwrap();

    // A second store over the same directory sees the record
    let reopened = JsonFileStore::new(dir.path());
    let loaded = reopened.get_batch(&batch.id).await.unwrap().unwrap();
    assert_eq!(loaded, batch);
    assert_eq!(loaded.audit_trail().len(), 1);
}

#[tokio::test]
async fn test_saving_progressed_batch_replaces_record() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path());

    let batch = packaged_batch("20240301-1030-A1B", &["T-001"]);
    store.save_batch(&batch).await.unwrap();

    let mut lifecycle = BatchLifecycle::new(batch, "Dr. Smith");
    lifecycle.mark_ready();
    lifecycle.load_autoclave("CYC-1", "AC-2");
    store.save_batch(&lifecycle.snapshot()).await.unwrap();

    let batches = store.list_batches().await.unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].status, BatchStatus::InAutoclave);
    assert_eq!(batches[0].audit_trail().len(), 3);
}

#[tokio::test]
async fn test_stored_batch_can_resume_lifecycle() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path());

    let mut lifecycle = BatchLifecycle::new(packaged_batch("20240301-1030-A1B", &["T-001"]), "Dr. Smith");
    lifecycle.mark_ready();
    store.save_batch(&lifecycle.snapshot()).await.unwrap();

    let stored = store
        .find_batch_by_code("20240301-1030-A1B")
        .await
        .unwrap()
        .unwrap();
    let mut resumed = BatchLifecycle::new(stored, "Nurse Lee");
    assert_eq!(resumed.load_autoclave("CYC-7", "AC-3"), BatchStatus::InAutoclave);
    assert_eq!(resumed.complete_cycle(121.0, 103.0), BatchStatus::Completed);
}

#[tokio::test]
async fn test_find_by_code_returns_first_stored_match() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path());

    let first = packaged_batch("20240301-1030-DUP", &["T-001"]);
    let second = packaged_batch("20240301-1030-DUP", &["T-002"]);
    store.save_batch(&first).await.unwrap();
    store.save_batch(&second).await.unwrap();

    let found = store.find_batch_by_code("20240301-1030-DUP").await.unwrap().unwrap();
    assert_eq!(found.id, first.id);
}

#[tokio::test]
async fn test_sessions_are_stored() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path());

    let mut sessions = PackagingSessionManager::new();
    sessions.start_packaging_session("Dr. Smith", false, None);
    sessions.add_tool_to_session("T-001");
    let session = sessions.end_packaging_session().unwrap();

    store.save_session(&session).await.unwrap();
    store.save_session(&session).await.unwrap();

    let stored = store.list_sessions().await.unwrap();
    assert_eq!(stored, vec![session]);
}
