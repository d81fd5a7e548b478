// Cliniio Library - Sterilization workflow and batch tracking
// This exposes the core components for testing and integration

pub mod batch;
pub mod config;
pub mod packaging;
pub mod store;
pub mod telemetry;
pub mod workflow;

// Re-export key types for easy access
pub use batch::{
    get_batch_by_code, validate_batch_code, BatchAuditAction, BatchAuditEvent, BatchCodeGeneration,
    BatchCodeGenerator, BatchEvent, BatchLifecycle, BatchStatus, PackageInfo, SterilizationBatch,
    SterilizationInfo,
};
pub use config::CliniioConfig;
pub use packaging::{PackagingSession, PackagingSessionManager, SessionStatus, Tool, ToolStatus};
pub use store::{JsonFileStore, MemoryStore, PersistenceError, WorkflowStore};
pub use telemetry::{create_workflow_span, generate_correlation_id, init_telemetry};
pub use workflow::{
    allowed_transitions, calculate_workflow_duration, check_compliance, validate_phase_transition,
    ComplianceReport, PhaseDurations, PhaseRecord, PhaseStatus, SterilizationWorkflow,
    TransitionValidation, WorkflowPhase, WorkflowTelemetry,
};
