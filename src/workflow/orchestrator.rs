// Workflow state container exposed to the operator-facing layer
//
// Mutators here never consult the transition table or the compliance checker.
// Callers validate first and commit second.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::phase::{PhaseDurations, PhaseRecord, PhaseStatus, WorkflowPhase};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SterilizationWorkflow {
    pub current_phase: WorkflowPhase,
    pub is_active: bool,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    phases: Vec<PhaseRecord>,
}

impl Default for SterilizationWorkflow {
    fn default() -> Self {
        Self::new(&PhaseDurations::default())
    }
}

impl SterilizationWorkflow {
    pub fn new(durations: &PhaseDurations) -> Self {
        let phases = WorkflowPhase::ALL
            .iter()
            .map(|phase| PhaseRecord::new(*phase, durations.minutes_for(*phase)))
            .collect();

        Self {
            current_phase: WorkflowPhase::Idle,
            is_active: false,
            start_time: None,
            end_time: None,
            phases,
        }
    }

    pub fn start_workflow(&mut self, phase: WorkflowPhase) {
        self.start_workflow_at(phase, Utc::now());
    }

    pub fn start_workflow_at(&mut self, phase: WorkflowPhase, now: DateTime<Utc>) {
        tracing::info!(phase = %phase, previous = %self.current_phase, "Workflow started");
        self.current_phase = phase;
        self.is_active = true;
        self.start_time = Some(now);
        self.end_time = None;
    }

    pub fn end_workflow(&mut self) {
        self.end_workflow_at(Utc::now());
    }

    pub fn end_workflow_at(&mut self, now: DateTime<Utc>) {
        tracing::info!(phase = %self.current_phase, "Workflow ended");
        self.is_active = false;
        self.end_time = Some(now);
    }

    /// Return to the idle baseline regardless of the current phase.
    pub fn reset_workflow(&mut self) {
        tracing::debug!(phase = %self.current_phase, "Workflow reset");
        self.current_phase = WorkflowPhase::Idle;
        self.is_active = false;
        self.start_time = None;
        self.end_time = None;
    }

    /// Record for `phase`. A deserialized workflow may lack some phases.
    pub fn phase(&self, phase: WorkflowPhase) -> Option<&PhaseRecord> {
        self.phases.iter().find(|r| r.phase == phase)
    }

    pub fn phases(&self) -> &[PhaseRecord] {
        &self.phases
    }

    /// Set a phase's status, stamping start/end times as the status implies.
    pub fn set_phase_status(&mut self, phase: WorkflowPhase, status: PhaseStatus) {
        let now = Utc::now();
        let record = self.phase_mut(phase);
        record.status = status;
        record.is_active = status == PhaseStatus::Active;
        match status {
            PhaseStatus::Active => {
                record.started_at.get_or_insert(now);
                record.ended_at = None;
            }
            PhaseStatus::Completed | PhaseStatus::Failed => {
                record.ended_at = Some(now);
            }
            PhaseStatus::Pending => {
                record.started_at = None;
                record.ended_at = None;
            }
            PhaseStatus::Paused => {}
        }
    }

    pub fn add_tool_to_phase(&mut self, phase: WorkflowPhase, tool_id: &str) {
        let record = self.phase_mut(phase);
        if !record.tools.iter().any(|t| t == tool_id) {
            record.tools.push(tool_id.to_string());
        }
    }

    fn phase_mut(&mut self, phase: WorkflowPhase) -> &mut PhaseRecord {
        let index = match self.phases.iter().position(|r| r.phase == phase) {
            Some(index) => index,
            None => {
                let minutes = PhaseDurations::default().minutes_for(phase);
                self.phases.push(PhaseRecord::new(phase, minutes));
                self.phases.len() - 1
            }
        };
        &mut self.phases[index]
    }
}
