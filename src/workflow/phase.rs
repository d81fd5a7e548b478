// Sterilization cycle phases and per-phase bookkeeping

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Named stages of one physical sterilization cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    Idle,
    Preparation,
    Cleaning,
    Sterilization,
    Cooling,
    Completion,
}

impl WorkflowPhase {
    pub const ALL: [WorkflowPhase; 6] = [
        WorkflowPhase::Idle,
        WorkflowPhase::Preparation,
        WorkflowPhase::Cleaning,
        WorkflowPhase::Sterilization,
        WorkflowPhase::Cooling,
        WorkflowPhase::Completion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowPhase::Idle => "idle",
            WorkflowPhase::Preparation => "preparation",
            WorkflowPhase::Cleaning => "cleaning",
            WorkflowPhase::Sterilization => "sterilization",
            WorkflowPhase::Cooling => "cooling",
            WorkflowPhase::Completion => "completion",
        }
    }
}

impl fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown workflow phase: {0}")]
pub struct ParsePhaseError(pub String);

impl FromStr for WorkflowPhase {
    type Err = ParsePhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkflowPhase::ALL
            .iter()
            .copied()
            .find(|phase| phase.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParsePhaseError(s.to_string()))
    }
}

/// Status of a single phase instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Failed,
    Paused,
}

/// Expected duration of each phase, in minutes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub preparation: u32,
    pub cleaning: u32,
    pub sterilization: u32,
    pub cooling: u32,
    pub completion: u32,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            preparation: 15,
            cleaning: 30,
            sterilization: 45,
            cooling: 20,
            completion: 5,
        }
    }
}

impl PhaseDurations {
    pub fn minutes_for(&self, phase: WorkflowPhase) -> u32 {
        match phase {
            WorkflowPhase::Idle => 0,
            WorkflowPhase::Preparation => self.preparation,
            WorkflowPhase::Cleaning => self.cleaning,
            WorkflowPhase::Sterilization => self.sterilization,
            WorkflowPhase::Cooling => self.cooling,
            WorkflowPhase::Completion => self.completion,
        }
    }
}

/// One phase instance within a workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub phase: WorkflowPhase,
    pub duration_minutes: u32,
    pub tools: Vec<String>,
    pub is_active: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub status: PhaseStatus,
}

impl PhaseRecord {
    pub fn new(phase: WorkflowPhase, duration_minutes: u32) -> Self {
        Self {
            phase,
            duration_minutes,
            tools: Vec::new(),
            is_active: false,
            started_at: None,
            ended_at: None,
            status: PhaseStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_parse_and_display_agree() {
        for phase in WorkflowPhase::ALL {
            let parsed: WorkflowPhase = phase.to_string().parse().unwrap();
            assert_eq!(parsed, phase);
        }
        assert_eq!("  Cooling ".parse::<WorkflowPhase>(), Ok(WorkflowPhase::Cooling));
    }

    #[test]
    fn test_unknown_phase_rejected() {
        let err = "drying".parse::<WorkflowPhase>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown workflow phase: drying");
    }

    #[test]
    fn test_phase_serializes_snake_case() {
        let json = serde_json::to_string(&WorkflowPhase::Sterilization).unwrap();
        assert_eq!(json, "\"sterilization\"");
        let status: PhaseStatus = serde_json::from_str("\"paused\"").unwrap();
        assert_eq!(status, PhaseStatus::Paused);
    }

    #[test]
    fn test_idle_has_no_duration() {
        let durations = PhaseDurations::default();
        assert_eq!(durations.minutes_for(WorkflowPhase::Idle), 0);
        assert_eq!(durations.minutes_for(WorkflowPhase::Sterilization), 45);
    }
}
