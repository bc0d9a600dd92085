use std::collections::BTreeSet;

use crate::constants::{
    ADOPTION_SCORE, AI_ADOPTION_LEVEL, AUTOMATION_RISK, INDUSTRY, RISK_SCORE, SALARY_BAND,
    SALARY_USD,
};
use crate::domain::{Cell, Dataset};

/// The fields of one clean record the dashboard filters and aggregates on
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobRow {
    pub industry: Option<String>,
    pub adoption_level: Option<String>,
    pub automation_risk: Option<String>,
    pub salary: Option<f64>,
    pub adoption_score: Option<f64>,
    pub risk_score: Option<f64>,
    pub salary_band: Option<String>,
}

/// The clean dataset as loaded by the dashboard: the verbatim table for
/// display plus a typed projection for filtering.
#[derive(Debug, Clone)]
pub struct JobTable {
    dataset: Dataset,
    rows: Vec<JobRow>,
}

impl JobTable {
    pub fn from_dataset(dataset: Dataset) -> Self {
        let text = |row: usize, column: &str| -> Option<String> {
            dataset
                .get(row, column)
                .and_then(Cell::as_text)
                .map(str::to_string)
        };
        let number = |row: usize, column: &str| -> Option<f64> {
            dataset.get(row, column).and_then(Cell::as_number)
        };

        let rows = (0..dataset.len())
            .map(|i| JobRow {
                industry: text(i, INDUSTRY),
                adoption_level: text(i, AI_ADOPTION_LEVEL),
                automation_risk: text(i, AUTOMATION_RISK),
                salary: number(i, SALARY_USD),
                adoption_score: number(i, ADOPTION_SCORE),
                risk_score: number(i, RISK_SCORE),
                salary_band: text(i, SALARY_BAND),
            })
            .collect();

        Self { dataset, rows }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn rows(&self) -> &[JobRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct industries in sorted order
    pub fn industries(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|r| r.industry.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
