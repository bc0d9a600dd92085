use serde::Serialize;
use std::collections::BTreeMap;

use super::filter::DashboardFilter;
use super::table::JobTable;
use crate::constants::LEVELS;
use crate::domain::Cell;
use crate::pipeline::salary::{band_rank, SALARY_BANDS};

/// One point of the salary-vs-adoption chart: a single industry and adoption
/// level combination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryPoint {
    pub industry: String,
    pub adoption_level: String,
    pub median_salary: f64,
    pub avg_adoption_score: Option<f64>,
    pub count: usize,
}

/// One bar segment of the band histogram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandCount {
    pub salary_band: String,
    pub adoption_level: String,
    pub count: usize,
}

/// Everything the page renders for one filter selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub records: usize,
    pub median_salary: Option<f64>,
    pub avg_adoption_score: Option<f64>,
    pub avg_risk_score: Option<f64>,
    pub industry_points: Vec<IndustryPoint>,
    pub band_counts: Vec<BandCount>,
    pub sample_columns: Vec<String>,
    pub sample_rows: Vec<Vec<String>>,
}

impl DashboardSummary {
    pub fn compute(table: &JobTable, filter: &DashboardFilter, sample_size: usize) -> Self {
        let selected = filter.apply(table);
        let rows: Vec<_> = selected.iter().map(|&i| &table.rows()[i]).collect();

        let salaries: Vec<f64> = rows.iter().filter_map(|r| r.salary).collect();
        let adoption: Vec<f64> = rows.iter().filter_map(|r| r.adoption_score).collect();
        let risk: Vec<f64> = rows.iter().filter_map(|r| r.risk_score).collect();

        let mut groups: BTreeMap<(String, String), (Vec<f64>, Vec<f64>, usize)> = BTreeMap::new();
        let mut bands: BTreeMap<(usize, usize, String), usize> = BTreeMap::new();
        for row in &rows {
            let (Some(industry), Some(level)) = (&row.industry, &row.adoption_level) else {
                continue;
            };
            let group = groups
                .entry((industry.clone(), level.clone()))
                .or_default();
            group.0.extend(row.salary);
            group.1.extend(row.adoption_score);
            group.2 += 1;

            if let Some(band) = row.salary_band.as_deref() {
                if let Some(rank) = band_rank(band) {
                    *bands.entry((rank, level_rank(level), level.clone())).or_default() += 1;
                }
            }
        }

        let industry_points = groups
            .into_iter()
            .filter_map(|((industry, adoption_level), (salaries, scores, count))| {
                Some(IndustryPoint {
                    industry,
                    adoption_level,
                    median_salary: median(&salaries)?,
                    avg_adoption_score: mean(&scores),
                    count,
                })
            })
            .collect();

        let band_counts = bands
            .into_iter()
            .filter_map(|((rank, _, adoption_level), count)| {
                let (_, salary_band) = SALARY_BANDS.get(rank)?;
                Some(BandCount {
                    salary_band: salary_band.to_string(),
                    adoption_level,
                    count,
                })
            })
            .collect();

        let dataset = table.dataset();
        let sample_rows = selected
            .iter()
            .take(sample_size)
            .map(|&i| dataset.rows()[i].iter().map(Cell::render).collect())
            .collect();

        Self {
            records: rows.len(),
            median_salary: median(&salaries),
            avg_adoption_score: mean(&adoption),
            avg_risk_score: mean(&risk),
            industry_points,
            band_counts,
            sample_columns: dataset.columns().to_vec(),
            sample_rows,
        }
    }

    pub fn median_salary_display(&self) -> String {
        self.median_salary
            .map(format_currency)
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn avg_adoption_display(&self) -> String {
        format_score(self.avg_adoption_score)
    }

    pub fn avg_risk_display(&self) -> String {
        format_score(self.avg_risk_score)
    }
}

/// Known levels first in Low/Medium/High order, anything else after
fn level_rank(level: &str) -> usize {
    LEVELS
        .iter()
        .position(|l| *l == level)
        .unwrap_or(LEVELS.len())
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// `$NN,NNN`, truncating any cents
pub fn format_currency(value: f64) -> String {
    let whole = value.trunc() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn format_score(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::domain::Dataset;

    fn clean_table() -> JobTable {
        let columns = [
            "job_title",
            "industry",
            "ai_adoption_level",
            "automation_risk",
            "salary_usd",
            "adoption_score",
            "risk_score",
            "salary_band",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let row = |title: &str,
                   industry: &str,
                   adoption: &str,
                   salary: &str,
                   a: &str,
                   band: &str|
         -> Vec<Cell> {
            [title, industry, adoption, "Low", salary, a, "1", band]
                .iter()
                .map(|v| Cell::from_raw(v))
                .collect()
        };
        JobTable::from_dataset(Dataset::from_rows(
            columns,
            vec![
                row("Analyst", "Tech", "High", "80000", "3", "50-100k"),
                row("Engineer", "Tech", "High", "120000.5", "3", "100-150k"),
                row("Designer", "Tech", "Low", "60000", "1", "50-100k"),
                row("Clerk", "Finance", "Medium", "55000", "", "50-100k"),
            ],
        ))
    }

    fn filter_all(table: &JobTable) -> DashboardFilter {
        let mut filter = DashboardFilter::defaults(table, &DashboardConfig::default());
        filter.salary_min = 30_000.0;
        filter.salary_max = 250_000.0;
        filter
    }

    #[test]
    fn test_headline_metrics() {
        let table = clean_table();
        let summary = DashboardSummary::compute(&table, &filter_all(&table), 10);

        assert_eq!(summary.records, 4);
        // median of 55000, 60000, 80000, 120000.5
        assert_eq!(summary.median_salary_display(), "$70,000");
        // missing score for the Finance row is ignored
        assert_eq!(summary.avg_adoption_display(), "2.33");
        assert_eq!(summary.avg_risk_display(), "1.00");
    }

    #[test]
    fn test_groups_and_histogram() {
        let table = clean_table();
        let summary = DashboardSummary::compute(&table, &filter_all(&table), 10);

        let tech_high = summary
            .industry_points
            .iter()
            .find(|p| p.industry == "Tech" && p.adoption_level == "High")
            .unwrap();
        assert_eq!(tech_high.count, 2);
        assert_eq!(tech_high.median_salary, 100_000.25);
        assert_eq!(tech_high.avg_adoption_score, Some(3.0));

        let order: Vec<_> = summary
            .band_counts
            .iter()
            .map(|b| (b.salary_band.as_str(), b.adoption_level.as_str(), b.count))
            .collect();
        assert_eq!(
            order,
            vec![
                ("50-100k", "Low", 1),
                ("50-100k", "Medium", 1),
                ("50-100k", "High", 1),
                ("100-150k", "High", 1),
            ]
        );
    }

    #[test]
    fn test_sample_is_verbatim_and_limited() {
        let table = clean_table();
        let summary = DashboardSummary::compute(&table, &filter_all(&table), 2);
        assert_eq!(summary.sample_rows.len(), 2);
        assert_eq!(summary.sample_rows[1][4], "120000.5");
        assert_eq!(summary.sample_columns.len(), 8);
    }

    #[test]
    fn test_empty_selection_reports_not_available() {
        let table = clean_table();
        let mut filter = filter_all(&table);
        filter.industries.clear();
        let summary = DashboardSummary::compute(&table, &filter, 10);

        assert_eq!(summary.records, 0);
        assert_eq!(summary.median_salary_display(), "N/A");
        assert_eq!(summary.avg_adoption_display(), "N/A");
        assert_eq!(summary.avg_risk_display(), "N/A");
        assert!(summary.sample_rows.is_empty());
        assert!(summary.industry_points.is_empty());
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.99), "$999");
        assert_eq!(format_currency(1_234_567.0), "$1,234,567");
    }
}
