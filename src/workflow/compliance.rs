// Minimum monitoring checks for a sterilization cycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MISSING_TEMPERATURE: &str = "Temperature monitoring is required";
pub const MISSING_PRESSURE: &str = "Pressure monitoring is required";
pub const MISSING_DURATION: &str = "Cycle duration must be recorded";

/// Telemetry captured for one cycle. Only presence is checked, not range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowTelemetry {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub compliant: bool,
    pub issues: Vec<String>,
}

pub fn check_compliance(data: &WorkflowTelemetry) -> ComplianceReport {
    let mut issues = Vec::new();

    if data.temperature.is_none() {
        issues.push(MISSING_TEMPERATURE.to_string());
    }
    if data.pressure.is_none() {
        issues.push(MISSING_PRESSURE.to_string());
    }
    if data.duration.is_none() {
        issues.push(MISSING_DURATION.to_string());
    }

    ComplianceReport {
        compliant: issues.is_empty(),
        issues,
    }
}

/// Milliseconds between `start` and `end`.
///
/// An `end` earlier than `start` yields a negative value; callers that care
/// must check the ordering themselves.
pub fn calculate_workflow_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_milliseconds()
}
