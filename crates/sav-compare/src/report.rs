//! Aggregated consistency reports.

use serde::{Deserialize, Serialize};

use crate::diff::FieldMismatch;

/// Outcome of one consistency comparison, suitable for logging during
/// development or failing a post-load check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsistencyReport {
    /// Descriptive label (e.g. "pre-save vs post-load, turn 12").
    pub label: String,
    pub mismatches: Vec<FieldMismatch>,
}

impl ConsistencyReport {
    pub fn new(label: impl Into<String>, mismatches: Vec<FieldMismatch>) -> Self {
        Self {
            label: label.into(),
            mismatches,
        }
    }

    /// True if no field disagreed.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("Consistency check: {}", self.label);
        println!("Result: {}", if self.passed() { "PASS" } else { "FAIL" });
        for mismatch in &self.mismatches {
            println!("  {mismatch}");
        }
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}
