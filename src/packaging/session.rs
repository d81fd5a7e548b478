use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Processing status of a physical instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    #[default]
    Dirty,
    Clean,
    Packaged,
    Sterilized,
    InUse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    /// Display label; empty until the calling layer hydrates it
    pub name: String,
    pub status: ToolStatus,
}

impl Tool {
    /// A tool known only by its scanned id
    pub fn stub(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: String::new(),
            status: ToolStatus::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Completed,
    Cancelled,
}

/// An operator's in-progress tool scanning activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackagingSession {
    pub id: String,
    pub operator: String,
    pub started_at: DateTime<Utc>,
    pub status: SessionStatus,
    pub tools: Vec<Tool>,
    pub is_batch_mode: bool,
    pub batch_id: Option<String>,
}

impl PackagingSession {
    pub fn new(
        operator: &str,
        is_batch_mode: bool,
        batch_id: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("session-{}", now.timestamp_millis()),
            operator: operator.to_string(),
            started_at: now,
            status: SessionStatus::Active,
            tools: Vec::new(),
            is_batch_mode,
            batch_id,
        }
    }

    pub fn tool_ids(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.id.clone()).collect()
    }
}
