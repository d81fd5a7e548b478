// Property-Based Testing for the sterilization workflow
// Checks code format, transition table and session invariants for arbitrary inputs

use cliniio::{
    allowed_transitions, check_compliance, validate_batch_code, validate_phase_transition,
    BatchCodeGenerator, PackagingSessionManager, SessionStatus, WorkflowPhase, WorkflowTelemetry,
};
use proptest::prelude::*;
use regex::Regex;

fn phase_strategy() -> impl Strategy<Value = WorkflowPhase> {
    prop::sample::select(WorkflowPhase::ALL.to_vec())
}

fn tool_id_strategy() -> impl Strategy<Value = String> {
    "T-[0-9]{3}"
}

proptest! {
    #[test]
    fn prop_generated_codes_match_format(tool_count in 0usize..500, operator in "[A-Za-z. ]{1,20}") {
        let pattern = Regex::new(r"^\d{8}-\d{4}-[A-Z0-9]{3}$").unwrap();
        let mut generator = BatchCodeGenerator::new();
        let code = generator.generate_batch_code(&operator, tool_count);

        prop_assert!(pattern.is_match(&code));
        prop_assert!(validate_batch_code(&code));

        let record = generator.last_generated().unwrap();
        prop_assert_eq!(record.is_single_tool, tool_count == 1);
        prop_assert_eq!(record.tool_count, tool_count);
    }

    #[test]
    fn prop_transition_validity_matches_table(current in phase_strategy(), target in phase_strategy()) {
        let result = validate_phase_transition(current, target);
        if allowed_transitions(current).contains(&target) {
            prop_assert!(result.is_valid);
            prop_assert!(result.error.is_none());
        } else {
            prop_assert!(!result.is_valid);
            prop_assert_eq!(
                result.error,
                Some(format!("Cannot transition from {} to {}", current, target))
            );
        }
    }

    #[test]
    fn prop_start_session_always_active_and_empty(
        prior_tools in prop::collection::vec(tool_id_strategy(), 0..10),
        had_session in any::<bool>(),
        batch_mode in any::<bool>(),
    ) {
        let mut manager = PackagingSessionManager::new();
        if had_session {
            manager.start_packaging_session("Dr. Smith", !batch_mode, None);
            for tool in &prior_tools {
                manager.add_tool_to_session(tool);
            }
        }

        let session = manager.start_packaging_session("Nurse Lee", batch_mode, None);
        prop_assert_eq!(session.status, SessionStatus::Active);
        prop_assert!(session.tools.is_empty());
        prop_assert_eq!(session.is_batch_mode, batch_mode);
    }

    #[test]
    fn prop_add_then_remove_restores_length(
        existing in prop::collection::vec(tool_id_strategy(), 0..10),
        tool in tool_id_strategy(),
    ) {
        let mut manager = PackagingSessionManager::new();
        manager.start_packaging_session("Dr. Smith", false, None);
        for id in &existing {
            manager.add_tool_to_session(id);
        }
        let before = manager.current_session().unwrap().tools.len();

        manager.add_tool_to_session(&tool);
        manager.remove_tool_from_session(&tool);
        prop_assert_eq!(manager.current_session().unwrap().tools.len(), before);
    }

    #[test]
    fn prop_rescanning_present_tool_then_removing_keeps_list(
        existing in prop::collection::vec(tool_id_strategy(), 1..10),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut manager = PackagingSessionManager::new();
        manager.start_packaging_session("Dr. Smith", false, None);
        for id in &existing {
            manager.add_tool_to_session(id);
        }
        let tool = existing[pick.index(existing.len())].clone();

        manager.add_tool_to_session(&tool);
        manager.remove_tool_from_session(&tool);
        prop_assert_eq!(manager.current_session().unwrap().tool_ids(), existing);
    }

    #[test]
    fn prop_tool_mutations_without_session_are_noops(tool in tool_id_strategy()) {
        let mut manager = PackagingSessionManager::new();
        manager.add_tool_to_session(&tool);
        manager.remove_tool_from_session(&tool);
        prop_assert!(manager.current_session().is_none());
    }

    #[test]
    fn prop_compliance_counts_missing_fields(
        temperature in prop::option::of(-50.0f64..300.0),
        pressure in prop::option::of(0.0f64..400.0),
        duration in prop::option::of(0.0f64..120.0),
    ) {
        let telemetry = WorkflowTelemetry { temperature, pressure, duration };
        let missing = [temperature.is_none(), pressure.is_none(), duration.is_none()]
            .iter()
            .filter(|m| **m)
            .count();

        let report = check_compliance(&telemetry);
        prop_assert_eq!(report.issues.len(), missing);
        prop_assert_eq!(report.compliant, missing == 0);
    }
}
