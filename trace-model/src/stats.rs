//! Per-run processing summary returned alongside a pipeline's graph/report
//! output (spec §7 "per-stage stats summary").

use serde::{Deserialize, Serialize};

/// Counts accumulated over one pipeline run, surfaced in logs and in the
/// CLI's final report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStats {
    pub requirements_processed: u32,
    pub design_elements_processed: u32,
    pub code_components_processed: u32,
    pub edges_created: u32,
    pub edges_removed: u32,
    pub batches_attempted: u32,
    pub batches_failed: u32,
    pub llm_retries: u32,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, other: &ProcessingStats) {
        self.requirements_processed += other.requirements_processed;
        self.design_elements_processed += other.design_elements_processed;
        self.code_components_processed += other.code_components_processed;
        self.edges_created += other.edges_created;
        self.edges_removed += other.edges_removed;
        self.batches_attempted += other.batches_attempted;
        self.batches_failed += other.batches_failed;
        self.llm_retries += other.llm_retries;
    }

    /// Fraction of attempted batches that ultimately failed (0.0 when none
    /// were attempted), used for the CLI's non-zero exit-code thresholding.
    pub fn batch_failure_rate(&self) -> f64 {
        if self.batches_attempted == 0 {
            0.0
        } else {
            f64::from(self.batches_failed) / f64::from(self.batches_attempted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_sums_fields() {
        let mut total = ProcessingStats::new();
        total.merge(&ProcessingStats {
            requirements_processed: 3,
            batches_attempted: 2,
            batches_failed: 1,
            ..Default::default()
        });
        total.merge(&ProcessingStats {
            requirements_processed: 1,
            batches_attempted: 1,
            ..Default::default()
        });
        assert_eq!(total.requirements_processed, 4);
        assert_eq!(total.batches_attempted, 3);
        assert_eq!(total.batches_failed, 1);
        assert!((total.batch_failure_rate() - (1.0 / 3.0)).abs() < 1e-9);
    }
}
