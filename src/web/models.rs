use serde::Serialize;

use crate::dashboard::summary::{format_currency, BandCount, IndustryPoint};
use crate::dashboard::{DashboardFilter, DashboardSummary};

/// One entry of a multi-select control
#[derive(Debug, Clone, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn list<S: AsRef<str>>(values: &[S], selected: &[String]) -> Vec<Self> {
        values
            .iter()
            .map(|v| SelectOption {
                value: v.as_ref().to_string(),
                selected: selected.iter().any(|s| s == v.as_ref()),
            })
            .collect()
    }
}

/// Headline tiles, already formatted for display
#[derive(Debug, Clone, Serialize)]
pub struct MetricTiles {
    pub records: usize,
    pub median_salary: String,
    pub avg_adoption_score: String,
    pub avg_risk_score: String,
}

impl From<&DashboardSummary> for MetricTiles {
    fn from(summary: &DashboardSummary) -> Self {
        Self {
            records: summary.records,
            median_salary: summary.median_salary_display(),
            avg_adoption_score: summary.avg_adoption_display(),
            avg_risk_score: summary.avg_risk_display(),
        }
    }
}

/// A row of the salary-vs-adoption view with a bar scaled to the largest
/// median in the selection
#[derive(Debug, Clone)]
pub struct ScatterRow {
    pub industry: String,
    pub adoption_level: String,
    pub avg_adoption_score: String,
    pub median_salary: String,
    pub count: usize,
    pub bar_pct: u32,
}

impl ScatterRow {
    pub fn from_points(points: &[IndustryPoint]) -> Vec<Self> {
        let max = points
            .iter()
            .map(|p| p.median_salary)
            .fold(0.0_f64, f64::max);
        points
            .iter()
            .map(|p| ScatterRow {
                industry: p.industry.clone(),
                adoption_level: p.adoption_level.clone(),
                avg_adoption_score: p
                    .avg_adoption_score
                    .map(|v| format!("{v:.2}"))
                    .unwrap_or_else(|| "N/A".to_string()),
                median_salary: format_currency(p.median_salary),
                count: p.count,
                bar_pct: percent(p.median_salary, max),
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct BandRow {
    pub salary_band: String,
    pub adoption_level: String,
    pub count: usize,
    pub bar_pct: u32,
}

impl BandRow {
    pub fn from_counts(counts: &[BandCount]) -> Vec<Self> {
        let max = counts.iter().map(|b| b.count).max().unwrap_or(0) as f64;
        counts
            .iter()
            .map(|b| BandRow {
                salary_band: b.salary_band.clone(),
                adoption_level: b.adoption_level.clone(),
                count: b.count,
                bar_pct: percent(b.count as f64, max),
            })
            .collect()
    }
}

fn percent(value: f64, max: f64) -> u32 {
    if max <= 0.0 {
        0
    } else {
        ((value / max) * 100.0).round() as u32
    }
}

/// Body of `GET /api/summary`
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub filter: DashboardFilter,
    pub metrics: MetricTiles,
    pub summary: DashboardSummary,
}
