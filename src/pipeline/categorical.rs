use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::{CleaningStep, StepResult};
use crate::constants::{AI_ADOPTION_LEVEL, AUTOMATION_RISK, COMPANY_SIZE, LOCATION, REMOTE_FRIENDLY};
use crate::domain::{Cell, Dataset};

/// Fixed lookup from lower-cased free text to a canonical label for one column.
#[derive(Debug)]
pub struct SynonymTable {
    pub column: &'static str,
    entries: HashMap<&'static str, &'static str>,
}

impl SynonymTable {
    pub fn new(column: &'static str, pairs: &[(&'static str, &'static str)]) -> Self {
        Self {
            column,
            entries: pairs.iter().copied().collect(),
        }
    }

    /// Canonical label for a raw value, if the table knows it
    pub fn lookup(&self, raw: &str) -> Option<&'static str> {
        self.entries.get(raw.to_lowercase().as_str()).copied()
    }

    /// Map a raw value onto its canonical label. Unknown values come back
    /// exactly as given, original casing included.
    pub fn canonicalize<'a>(&self, raw: &'a str) -> &'a str {
        self.lookup(raw).unwrap_or(raw)
    }
}

pub static ADOPTION_LEVELS: Lazy<SynonymTable> = Lazy::new(|| {
    SynonymTable::new(
        AI_ADOPTION_LEVEL,
        &[
            ("low", "Low"),
            ("medium", "Medium"),
            ("high", "High"),
            ("emerging", "Low"),
            ("intermediate", "Medium"),
            ("advanced", "High"),
        ],
    )
});

pub static AUTOMATION_RISKS: Lazy<SynonymTable> = Lazy::new(|| {
    SynonymTable::new(
        AUTOMATION_RISK,
        &[
            ("low", "Low"),
            ("moderate", "Medium"),
            ("medium", "Medium"),
            ("high", "High"),
        ],
    )
});

pub static COMPANY_SIZES: Lazy<SynonymTable> = Lazy::new(|| {
    SynonymTable::new(
        COMPANY_SIZE,
        &[
            ("small", "Small"),
            ("medium", "Medium"),
            ("large", "Large"),
            ("startup", "Small"),
            ("smb", "Medium"),
            ("enterprise", "Large"),
        ],
    )
});

pub static REMOTE_FLAGS: Lazy<SynonymTable> = Lazy::new(|| {
    SynonymTable::new(
        REMOTE_FRIENDLY,
        &[
            ("yes", "Yes"),
            ("y", "Yes"),
            ("true", "Yes"),
            ("no", "No"),
            ("n", "No"),
            ("false", "No"),
        ],
    )
});

/// Remaps every configured categorical column through its synonym table
pub struct CategoricalStep {
    tables: Vec<&'static SynonymTable>,
}

impl CategoricalStep {
    pub fn new(tables: Vec<&'static SynonymTable>) -> Self {
        Self { tables }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            &*ADOPTION_LEVELS,
            &*AUTOMATION_RISKS,
            &*COMPANY_SIZES,
            &*REMOTE_FLAGS,
        ])
    }
}

impl CleaningStep for CategoricalStep {
    fn apply(&self, dataset: &mut Dataset) -> StepResult {
        let mut result = StepResult::new(String::new());
        let mut mapped_columns = 0;

        for table in &self.tables {
            let mut recognized = 0usize;
            let mut unrecognized = 0usize;
            let present = dataset.update_column(table.column, |cell| {
                if let Cell::Text(raw) = cell {
                    if table.lookup(raw).is_some() {
                        recognized += 1;
                    } else {
                        unrecognized += 1;
                    }
                    let canonical = table.canonicalize(raw);
                    if canonical != raw.as_str() {
                        *raw = canonical.to_string();
                    }
                }
            });

            if present {
                mapped_columns += 1;
                result = result.with_metadata(
                    table.column,
                    format!("{} recognized, {} unrecognized", recognized, unrecognized),
                );
            }
        }

        result.message = format!("remapped {} categorical columns", mapped_columns);
        result
    }

    fn step_name(&self) -> &'static str {
        "categorical_mapping"
    }
}

/// Title-case a string: the first cased character of every run of cased
/// characters is upper-cased, the rest lower-cased.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut previous_cased = false;
    for c in s.chars() {
        if previous_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_cased = c.is_lowercase() || c.is_uppercase();
    }
    out
}

/// Title-cases the location column
pub struct LocationFormatStep;

impl CleaningStep for LocationFormatStep {
    fn apply(&self, dataset: &mut Dataset) -> StepResult {
        let present = dataset.update_column(LOCATION, |cell| {
            if let Cell::Text(location) = cell {
                *location = title_case(location);
            }
        });
        if present {
            StepResult::new("title-cased locations")
        } else {
            StepResult::skipped(LOCATION)
        }
    }

    fn step_name(&self) -> &'static str {
        "location_format"
    }
}
