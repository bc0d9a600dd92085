use sha2::{Digest, Sha256};
use std::collections::HashSet;

use super::{CleaningStep, StepResult};
use crate::domain::{Cell, Dataset};

/// Content fingerprint of a whole row as it will be written. Each rendered
/// field is length-prefixed so cell boundaries cannot shift.
pub fn row_fingerprint(row: &[Cell]) -> String {
    let mut hasher = Sha256::new();
    for cell in row {
        let value = cell.render();
        hasher.update((value.len() as u64).to_le_bytes());
        hasher.update(value.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Drops rows identical in every column to an earlier row
pub struct DeduplicateStep;

impl CleaningStep for DeduplicateStep {
    fn apply(&self, dataset: &mut Dataset) -> StepResult {
        let mut seen = HashSet::with_capacity(dataset.len());
        let removed = dataset.retain_rows(|row| seen.insert(row_fingerprint(row)));

        crate::observability::metrics::pipeline::rows_dropped("duplicate", removed);
        StepResult::new(format!("removed {} duplicate rows", removed))
    }

    fn step_name(&self) -> &'static str {
        "deduplicate"
    }
}
