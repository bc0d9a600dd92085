use super::{CleaningStep, StepResult};
use crate::constants::STRING_COLUMNS;
use crate::domain::{Cell, Dataset};

/// Canonical form of a raw header: trimmed, lower-cased, spaces to underscores.
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// Renames every column to its canonical form
pub struct NormalizeColumnsStep;

impl CleaningStep for NormalizeColumnsStep {
    fn apply(&self, dataset: &mut Dataset) -> StepResult {
        let mut renamed = 0;
        dataset.rename_columns(|name| {
            let normalized = normalize_column_name(name);
            if normalized != name {
                renamed += 1;
            }
            normalized
        });
        StepResult::new(format!("normalized {} column names", renamed))
    }

    fn step_name(&self) -> &'static str {
        "normalize_columns"
    }
}

/// Strips surrounding whitespace from the known string columns. A value that
/// is blank after trimming becomes missing, like an empty raw field.
pub struct TrimStringsStep;

impl CleaningStep for TrimStringsStep {
    fn apply(&self, dataset: &mut Dataset) -> StepResult {
        let mut present = Vec::new();
        for column in STRING_COLUMNS {
            let touched = dataset.update_column(column, |cell| {
                if matches!(cell, Cell::Text(text) if text.trim().is_empty()) {
                    *cell = Cell::Missing;
                } else if let Cell::Text(text) = cell {
                    let trimmed = text.trim();
                    if trimmed.len() != text.len() {
                        *text = trimmed.to_string();
                    }
                }
            });
            if touched {
                present.push(column);
            }
        }
        StepResult::new(format!("trimmed {} string columns", present.len()))
            .with_metadata("columns", present.join(","))
    }

    fn step_name(&self) -> &'static str {
        "trim_strings"
    }
}
