use super::{CleaningStep, StepResult};
use crate::constants::{SALARY_BAND, SALARY_USD};
use crate::domain::{Cell, Dataset};

/// Coerces `salary_usd` to a number and drops rows outside `[min, max]`.
/// Unparseable or missing salaries never satisfy the range, so those rows go too.
pub struct SalaryFilterStep {
    min: f64,
    max: f64,
}

impl SalaryFilterStep {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn in_range(&self, salary: Option<f64>) -> bool {
        salary.is_some_and(|s| s >= self.min && s <= self.max)
    }
}

impl CleaningStep for SalaryFilterStep {
    fn apply(&self, dataset: &mut Dataset) -> StepResult {
        let mut unparseable = 0usize;
        let coerced = dataset.update_column(SALARY_USD, |cell| {
            *cell = match cell.as_number() {
                Some(n) => Cell::Number(n),
                None => {
                    if !cell.is_missing() {
                        unparseable += 1;
                    }
                    Cell::Missing
                }
            };
        });
        if !coerced {
            return StepResult::skipped(SALARY_USD);
        }

        let idx = dataset.column_index(SALARY_USD);
        let dropped = dataset.retain_rows(|row| {
            let salary = idx.and_then(|i| row[i].as_number());
            self.in_range(salary)
        });

        crate::observability::metrics::pipeline::rows_dropped("salary_range", dropped);
        StepResult::new(format!(
            "dropped {} rows outside [{}, {}]",
            dropped, self.min, self.max
        ))
        .with_metadata("unparseable", unparseable.to_string())
    }

    fn step_name(&self) -> &'static str {
        "salary_filter"
    }
}

/// Upper bounds (inclusive) and labels of the salary bands. The last band is
/// open-ended.
pub const SALARY_BANDS: [(f64, &str); 5] = [
    (50_000.0, "<50k"),
    (100_000.0, "50-100k"),
    (150_000.0, "100-150k"),
    (200_000.0, "150-200k"),
    (f64::INFINITY, ">200k"),
];

/// Band label for a salary. Bins are left-open, right-closed starting at zero,
/// so a salary equal to a bin edge belongs to the lower band.
pub fn salary_band(salary: f64) -> Option<&'static str> {
    if salary.is_nan() || salary <= 0.0 {
        return None;
    }
    SALARY_BANDS
        .iter()
        .find(|(upper, _)| salary <= *upper)
        .map(|(_, label)| *label)
}

/// Position of a band label in band order, for sorting
pub fn band_rank(label: &str) -> Option<usize> {
    SALARY_BANDS.iter().position(|(_, l)| *l == label)
}

/// Derives `salary_band` from `salary_usd`
pub struct SalaryBandStep;

impl CleaningStep for SalaryBandStep {
    fn apply(&self, dataset: &mut Dataset) -> StepResult {
        let bands: Vec<Cell> = match dataset.column(SALARY_USD) {
            Some(salaries) => salaries
                .map(|cell| {
                    cell.as_number()
                        .and_then(salary_band)
                        .map(Cell::from)
                        .unwrap_or_default()
                })
                .collect(),
            None => return StepResult::skipped(SALARY_USD),
        };

        dataset.set_column(SALARY_BAND, bands);
        StepResult::new("assigned salary bands")
    }

    fn step_name(&self) -> &'static str {
        "salary_bands"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges_fall_in_lower_band() {
        assert_eq!(salary_band(50_000.0), Some("<50k"));
        assert_eq!(salary_band(50_001.0), Some("50-100k"));
        assert_eq!(salary_band(100_000.0), Some("50-100k"));
        assert_eq!(salary_band(150_000.0), Some("100-150k"));
        assert_eq!(salary_band(200_000.0), Some("150-200k"));
        assert_eq!(salary_band(200_000.5), Some(">200k"));
        assert_eq!(salary_band(250_000.0), Some(">200k"));
        assert_eq!(salary_band(0.0), None);
        assert_eq!(salary_band(f64::NAN), None);
    }

    #[test]
    fn test_filter_is_inclusive_and_drops_missing() {
        let mut dataset = Dataset::from_rows(
            vec!["salary_usd".into()],
            vec![
                vec![Cell::from("10000")],
                vec![Cell::from("500000")],
                vec![Cell::from("9999.99")],
                vec![Cell::from("500000.01")],
                vec![Cell::from("not a number")],
                vec![Cell::Missing],
            ],
        );

        let result = SalaryFilterStep::new(10_000.0, 500_000.0).apply(&mut dataset);

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get(0, "salary_usd"), Some(&Cell::Number(10_000.0)));
        assert_eq!(dataset.get(1, "salary_usd"), Some(&Cell::Number(500_000.0)));
        assert_eq!(result.metadata, vec![("unparseable".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_filter_without_salary_column_keeps_rows() {
        let mut dataset =
            Dataset::from_rows(vec!["industry".into()], vec![vec![Cell::from("Retail")]]);
        SalaryFilterStep::new(10_000.0, 500_000.0).apply(&mut dataset);
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_band_step_appends_column() {
        let mut dataset = Dataset::from_rows(
            vec!["salary_usd".into()],
            vec![vec![Cell::Number(75_000.0)], vec![Cell::Missing]],
        );
        SalaryBandStep.apply(&mut dataset);
        assert_eq!(dataset.get(0, "salary_band"), Some(&Cell::from("50-100k")));
        assert_eq!(dataset.get(1, "salary_band"), Some(&Cell::Missing));
    }
}
