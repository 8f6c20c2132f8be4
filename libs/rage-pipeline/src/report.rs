//! # Export Report
//!
//! Aggregated outcome of a multi-item export. One failed item never aborts
//! its siblings; the report carries every failure for the summary message.

use serde::{Deserialize, Serialize};

/// One failed item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFailure {
    /// Name of the object or archetype that failed.
    pub item: String,
    /// Rendered error detail.
    pub error: String,
}

/// Aggregated export outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    /// Number of items exported successfully.
    pub succeeded: usize,
    /// Per-item failures, in processing order.
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a success.
    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    /// Records a failure with the item name and error detail.
    pub fn record_failure(&mut self, item: impl Into<String>, error: impl ToString) {
        self.failures.push(ExportFailure {
            item: item.into(),
            error: error.to_string(),
        });
    }

    /// Whether every item succeeded.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable one-line summary.
    pub fn summary(&self) -> String {
        format!("{} exported, {} failed", self.succeeded, self.failures.len())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut report = ExportReport::new();
        report.record_success();
        report.record_success();
        report.record_failure("Cube.003", "unsupported bound kind 'nurbs'");
        assert_eq!(report.summary(), "2 exported, 1 failed");
        assert!(!report.is_success());
    }

    #[test]
    fn test_empty_report_is_success() {
        assert!(ExportReport::new().is_success());
    }
}
