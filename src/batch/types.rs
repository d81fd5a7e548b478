// Sterilization batch records handed to the persistence collaborator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::packaging::PackagingSession;

/// Lifecycle status of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Creating,
    Ready,
    InAutoclave,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub package_type: String,
    pub package_size: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SterilizationInfo {
    pub cycle_id: Option<String>,
    pub autoclave_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub temperature: Option<f64>,
    pub pressure: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchAuditAction {
    Created,
    ToolAdded,
    ToolRemoved,
    MarkedReady,
    LoadedIntoAutoclave,
    CycleCompleted,
    CycleFailed,
}

/// One entry of a batch's audit trail. Never mutated once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchAuditEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub action: BatchAuditAction,
    pub operator: String,
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SterilizationBatch {
    pub id: String,
    pub batch_code: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub status: BatchStatus,
    pub tool_ids: Vec<String>,
    pub package_info: PackageInfo,
    pub sterilization_info: SterilizationInfo,
    // Append-only: only `record` writes to it
    audit_trail: Vec<BatchAuditEvent>,
}

impl SterilizationBatch {
    pub fn new(batch_code: &str, created_by: &str, now: DateTime<Utc>) -> Self {
        let mut batch = Self {
            id: Uuid::new_v4().to_string(),
            batch_code: batch_code.to_string(),
            created_by: created_by.to_string(),
            created_at: now,
            status: BatchStatus::Creating,
            tool_ids: Vec::new(),
            package_info: PackageInfo::default(),
            sterilization_info: SterilizationInfo::default(),
            audit_trail: Vec::new(),
        };
        batch.record(BatchAuditAction::Created, created_by, Some(format!("Batch {batch_code} created")));
        batch
    }

    /// Build a batch holding every tool scanned into `session`.
    pub fn from_session(session: &PackagingSession, batch_code: &str, now: DateTime<Utc>) -> Self {
        let mut batch = Self::new(batch_code, &session.operator, now);
        batch.tool_ids = session.tool_ids();
        batch
    }

    pub fn audit_trail(&self) -> &[BatchAuditEvent] {
        &self.audit_trail
    }

    pub fn tool_count(&self) -> usize {
        self.tool_ids.len()
    }

    pub(crate) fn record(&mut self, action: BatchAuditAction, operator: &str, details: Option<String>) {
        self.audit_trail.push(BatchAuditEvent {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            action,
            operator: operator.to_string(),
            details,
        });
    }
}
