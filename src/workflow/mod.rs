// Sterilization workflow: phases, transition table, compliance and the
// orchestrating state container

pub mod compliance;
pub mod orchestrator;
pub mod phase;
pub mod transitions;

pub use compliance::{calculate_workflow_duration, check_compliance, ComplianceReport, WorkflowTelemetry};
pub use orchestrator::SterilizationWorkflow;
pub use phase::{ParsePhaseError, PhaseDurations, PhaseRecord, PhaseStatus, WorkflowPhase};
pub use transitions::{allowed_transitions, validate_phase_transition, TransitionValidation};
