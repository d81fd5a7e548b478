use chrono::Utc;
use serde::{Deserialize, Serialize};
use statig::prelude::*;

use super::types::{BatchAuditAction, BatchStatus, SterilizationBatch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BatchEvent {
    AddTool { tool_id: String },
    RemoveTool { tool_id: String },
    MarkReady,
    LoadAutoclave { cycle_id: String, autoclave_id: String },
    CompleteCycle { temperature: f64, pressure: f64 },
    FailCycle { reason: String },
}

/// What the machine actually receives. `Restore` jumps straight to a
/// persisted status and is only sent by `BatchLifecycle::new`.
#[derive(Debug)]
enum TrackerEvent {
    Batch(BatchEvent),
    Restore(BatchStatus),
}

/// Shared storage for the batch state machine
struct BatchTracker {
    batch: SterilizationBatch,
    operator: String,
}

impl BatchTracker {
    fn reject(&self, event: &TrackerEvent, state: &str) {
        tracing::warn!(
            batch_code = %self.batch.batch_code,
            state = state,
            event = ?event,
            "Batch event rejected"
        );
    }

    fn enter(&mut self, status: BatchStatus, action: BatchAuditAction, details: Option<String>) {
        tracing::info!(
            batch_code = %self.batch.batch_code,
            from = ?self.batch.status,
            to = ?status,
            "Batch status changed"
        );
        self.batch.status = status;
        let operator = self.operator.clone();
        self.batch.record(action, &operator, details);
    }

    fn restore(&mut self, status: BatchStatus) -> Outcome<State> {
        tracing::debug!(
            batch_code = %self.batch.batch_code,
            status = ?status,
            "Batch restored"
        );
        self.batch.status = status;
        match status {
            BatchStatus::Creating => Handled,
            BatchStatus::Ready => Transition(State::ready()),
            BatchStatus::InAutoclave => Transition(State::in_autoclave()),
            BatchStatus::Completed => Transition(State::completed()),
            BatchStatus::Failed => Transition(State::failed()),
        }
    }
}

#[state_machine(initial = "State::creating()", state(derive(Debug)))]
impl BatchTracker {
    #[state]
    fn creating(&mut self, event: &TrackerEvent) -> Outcome<State> {
        match event {
            TrackerEvent::Batch(BatchEvent::AddTool { tool_id }) => {
                self.batch.tool_ids.push(tool_id.clone());
                let operator = self.operator.clone();
                self.batch.record(BatchAuditAction::ToolAdded, &operator, Some(tool_id.clone()));
                Handled
            }
            TrackerEvent::Batch(BatchEvent::RemoveTool { tool_id }) => {
                if self.batch.tool_ids.iter().any(|t| t == tool_id) {
                    self.batch.tool_ids.retain(|t| t != tool_id);
                    let operator = self.operator.clone();
                    self.batch.record(BatchAuditAction::ToolRemoved, &operator, Some(tool_id.clone()));
                }
                Handled
            }
            TrackerEvent::Batch(BatchEvent::MarkReady) if !self.batch.tool_ids.is_empty() => {
                let details = format!("{} tools packaged", self.batch.tool_ids.len());
                self.enter(BatchStatus::Ready, BatchAuditAction::MarkedReady, Some(details));
                Transition(State::ready())
            }
            TrackerEvent::Restore(status) => self.restore(*status),
            _ => {
                self.reject(event, "creating");
                Handled
            }
        }
    }

    #[state]
    fn ready(&mut self, event: &TrackerEvent) -> Outcome<State> {
        match event {
            TrackerEvent::Batch(BatchEvent::LoadAutoclave { cycle_id, autoclave_id }) => {
                let info = &mut self.batch.sterilization_info;
                info.cycle_id = Some(cycle_id.clone());
                info.autoclave_id = Some(autoclave_id.clone());
                info.started_at = Some(Utc::now());
                self.enter(
                    BatchStatus::InAutoclave,
                    BatchAuditAction::LoadedIntoAutoclave,
                    Some(format!("Cycle {cycle_id} on autoclave {autoclave_id}")),
                );
                Transition(State::in_autoclave())
            }
            _ => {
                self.reject(event, "ready");
                Handled
            }
        }
    }

    #[state]
    fn in_autoclave(&mut self, event: &TrackerEvent) -> Outcome<State> {
        match event {
            TrackerEvent::Batch(BatchEvent::CompleteCycle { temperature, pressure }) => {
                let info = &mut self.batch.sterilization_info;
                info.temperature = Some(*temperature);
                info.pressure = Some(*pressure);
                info.ended_at = Some(Utc::now());
                self.enter(
                    BatchStatus::Completed,
                    BatchAuditAction::CycleCompleted,
                    Some(format!("{temperature}°C at {pressure} kPa")),
                );
                Transition(State::completed())
            }
            TrackerEvent::Batch(BatchEvent::FailCycle { reason }) => {
                self.batch.sterilization_info.ended_at = Some(Utc::now());
                self.enter(BatchStatus::Failed, BatchAuditAction::CycleFailed, Some(reason.clone()));
                Transition(State::failed())
            }
            _ => {
                self.reject(event, "in_autoclave");
                Handled
            }
        }
    }

    #[state]
    fn completed(&mut self, event: &TrackerEvent) -> Outcome<State> {
        self.reject(event, "completed");
        Handled
    }

    #[state]
    fn failed(&mut self, event: &TrackerEvent) -> Outcome<State> {
        self.reject(event, "failed");
        Handled
    }
}

/// Drives a batch through `creating → ready → in_autoclave → completed | failed`.
///
/// Every accepted event appends one audit entry; rejected events leave the
/// batch untouched.
pub struct BatchLifecycle {
    machine: StateMachine<BatchTracker>,
}

impl BatchLifecycle {
    /// Track a batch, attributing events to `operator`. A batch loaded from
    /// a store resumes at its persisted status without a new audit entry.
    pub fn new(batch: SterilizationBatch, operator: &str) -> Self {
        let mut lifecycle = Self {
            machine: BatchTracker {
                batch,
                operator: operator.to_string(),
            }
            .state_machine(),
        };
        let status = lifecycle.batch().status;
        if status != BatchStatus::Creating {
            lifecycle.machine.handle(&TrackerEvent::Restore(status));
        }
        lifecycle
    }

    pub fn handle(&mut self, event: BatchEvent) -> BatchStatus {
        self.machine.handle(&TrackerEvent::Batch(event));
        self.status()
    }

    pub fn add_tool(&mut self, tool_id: &str) -> BatchStatus {
        self.handle(BatchEvent::AddTool { tool_id: tool_id.to_string() })
    }

    pub fn remove_tool(&mut self, tool_id: &str) -> BatchStatus {
        self.handle(BatchEvent::RemoveTool { tool_id: tool_id.to_string() })
    }

    pub fn mark_ready(&mut self) -> BatchStatus {
        self.handle(BatchEvent::MarkReady)
    }

    pub fn load_autoclave(&mut self, cycle_id: &str, autoclave_id: &str) -> BatchStatus {
        self.handle(BatchEvent::LoadAutoclave {
            cycle_id: cycle_id.to_string(),
            autoclave_id: autoclave_id.to_string(),
        })
    }

    pub fn complete_cycle(&mut self, temperature: f64, pressure: f64) -> BatchStatus {
        self.handle(BatchEvent::CompleteCycle { temperature, pressure })
    }

    pub fn fail_cycle(&mut self, reason: &str) -> BatchStatus {
        self.handle(BatchEvent::FailCycle { reason: reason.to_string() })
    }

    pub fn status(&self) -> BatchStatus {
        self.batch().status
    }

    pub fn batch(&self) -> &SterilizationBatch {
        &self.machine.batch
    }

    /// Copy of the tracked batch, for handing to a store
    pub fn snapshot(&self) -> SterilizationBatch {
        self.batch().clone()
    }
}
