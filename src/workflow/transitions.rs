// Phase transition table for the sterilization cycle
//
// Validation is advisory: nothing here mutates a workflow. Callers check a
// move with `validate_phase_transition` and then commit it on the orchestrator.

use serde::{Deserialize, Serialize};

use super::phase::WorkflowPhase;

/// Outcome of checking a requested phase move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionValidation {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransitionValidation {
    fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    fn rejected(current: WorkflowPhase, target: WorkflowPhase) -> Self {
        Self {
            is_valid: false,
            error: Some(format!("Cannot transition from {current} to {target}")),
        }
    }
}

/// Phases reachable from `phase` in a single step
pub fn allowed_transitions(phase: WorkflowPhase) -> &'static [WorkflowPhase] {
    use WorkflowPhase::*;

    match phase {
        Idle => &[Preparation, Cleaning, Sterilization],
        Preparation => &[Cleaning, Idle],
        Cleaning => &[Sterilization, Idle],
        Sterilization => &[Cooling, Idle],
        Cooling => &[Completion, Idle],
        Completion => &[Idle],
    }
}

/// Check whether moving from `current` to `target` is permitted.
///
/// Self-transitions are not listed anywhere in the table, so they are rejected
/// like any other unlisted pair.
pub fn validate_phase_transition(
    current: WorkflowPhase,
    target: WorkflowPhase,
) -> TransitionValidation {
    if allowed_transitions(current).contains(&target) {
        TransitionValidation::valid()
    } else {
        TransitionValidation::rejected(current, target)
    }
}
