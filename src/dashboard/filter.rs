use serde::Serialize;

use super::table::{JobRow, JobTable};
use crate::config::DashboardConfig;
use crate::constants::LEVELS;

/// An interactive filter selection. A row matches when every criterion holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardFilter {
    pub industries: Vec<String>,
    pub adoption_levels: Vec<String>,
    pub risk_levels: Vec<String>,
    /// Inclusive salary range
    pub salary_min: f64,
    pub salary_max: f64,
}

impl DashboardFilter {
    /// Initial selection: the first few industries in sorted order, every
    /// adoption and risk level, and the default salary window.
    pub fn defaults(table: &JobTable, config: &DashboardConfig) -> Self {
        Self {
            industries: table
                .industries()
                .into_iter()
                .take(config.default_industry_count)
                .collect(),
            adoption_levels: LEVELS.iter().map(|s| s.to_string()).collect(),
            risk_levels: LEVELS.iter().map(|s| s.to_string()).collect(),
            salary_min: config.default_salary_min,
            salary_max: config.default_salary_max,
        }
    }

    pub fn matches(&self, row: &JobRow) -> bool {
        fn selected(options: &[String], value: &Option<String>) -> bool {
            value
                .as_deref()
                .is_some_and(|v| options.iter().any(|o| o == v))
        }

        selected(&self.industries, &row.industry)
            && selected(&self.adoption_levels, &row.adoption_level)
            && selected(&self.risk_levels, &row.automation_risk)
            && row
                .salary
                .is_some_and(|s| s >= self.salary_min && s <= self.salary_max)
    }

    /// Indices of matching rows, in dataset order
    pub fn apply(&self, table: &JobTable) -> Vec<usize> {
        table
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| self.matches(row))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Raw filter controls as submitted by the page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterParams {
    /// Set once the form has been submitted; an empty multi-select then
    /// means nothing is selected rather than "use the defaults"
    pub applied: bool,
    pub industries: Vec<String>,
    pub adoption_levels: Vec<String>,
    pub risk_levels: Vec<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
}

impl FilterParams {
    /// Collect repeated query pairs (`industry=a&industry=b`)
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "applied" => params.applied = true,
                "industry" => params.industries.push(value.clone()),
                "adoption" => params.adoption_levels.push(value.clone()),
                "risk" => params.risk_levels.push(value.clone()),
                "salary_min" => params.salary_min = value.trim().parse().ok(),
                "salary_max" => params.salary_max = value.trim().parse().ok(),
                _ => {}
            }
        }
        params
    }

    /// Resolve against the defaults, clamping the salary window into the
    /// allowed bounds.
    pub fn resolve(&self, table: &JobTable, config: &DashboardConfig) -> DashboardFilter {
        let mut filter = DashboardFilter::defaults(table, config);
        if self.applied {
            filter.industries = self.industries.clone();
            filter.adoption_levels = self.adoption_levels.clone();
            filter.risk_levels = self.risk_levels.clone();
        }

        let clamp = |v: f64| v.clamp(config.salary_floor, config.salary_ceiling);
        let mut low = clamp(self.salary_min.unwrap_or(filter.salary_min));
        let mut high = clamp(self.salary_max.unwrap_or(filter.salary_max));
        if low > high {
            std::mem::swap(&mut low, &mut high);
        }
        filter.salary_min = low;
        filter.salary_max = high;
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cell, Dataset};

    fn table() -> JobTable {
        let columns = ["industry", "ai_adoption_level", "automation_risk", "salary_usd"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let row = |i: &str, a: &str, r: &str, s: &str| {
            vec![Cell::from(i), Cell::from(a), Cell::from(r), Cell::from(s)]
        };
        JobTable::from_dataset(Dataset::from_rows(
            columns,
            vec![
                row("Tech", "High", "Low", "120000"),
                row("Finance", "Low", "High", "50000"),
                row("Retail", "Medium", "Medium", "200001"),
                row("Energy", "High", "Low", "90000"),
                row("Education", "Low", "Low", "60000"),
                row("Healthcare", "Medium", "High", "70000"),
                row("Telecom", "High", "Medium", "80000"),
            ],
        ))
    }

    #[test]
    fn test_defaults_take_first_five_sorted_industries() {
        let filter = DashboardFilter::defaults(&table(), &DashboardConfig::default());
        assert_eq!(
            filter.industries,
            vec!["Education", "Energy", "Finance", "Healthcare", "Retail"]
        );
        assert_eq!(filter.adoption_levels, vec!["Low", "Medium", "High"]);
        assert_eq!((filter.salary_min, filter.salary_max), (50_000.0, 200_000.0));
    }

    #[test]
    fn test_default_filter_is_inclusive_on_salary() {
        let table = table();
        let filter = DashboardFilter::defaults(&table, &DashboardConfig::default());
        // Finance at exactly 50000 matches; Retail above 200000 and Tech/Telecom
        // outside the default industries do not
        assert_eq!(filter.apply(&table), vec![1, 3, 4, 5]);
    }

    #[test]
    fn test_applied_empty_selection_matches_nothing() {
        let table = table();
        let params = FilterParams::from_pairs(&[
            ("applied".to_string(), "1".to_string()),
            ("adoption".to_string(), "High".to_string()),
        ]);
        let filter = params.resolve(&table, &DashboardConfig::default());
        assert!(filter.industries.is_empty());
        assert!(filter.apply(&table).is_empty());
    }

    #[test]
    fn test_salary_window_is_clamped_and_ordered() {
        let params = FilterParams::from_pairs(&[
            ("salary_min".to_string(), "900000".to_string()),
            ("salary_max".to_string(), "1000".to_string()),
        ]);
        let filter = params.resolve(&table(), &DashboardConfig::default());
        assert_eq!((filter.salary_min, filter.salary_max), (30_000.0, 250_000.0));
    }
}
